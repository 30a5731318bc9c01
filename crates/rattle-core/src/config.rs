//! Engine configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the registry and its engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RattleConfig {
    pub sample_rate: f64,
    /// Frames rendered per engine tick.
    pub render_quantum: usize,
    /// Slots reserved up front in the node table.
    pub initial_slots: usize,
    /// Fail startup when no audio output device can be opened.
    pub require_output_device: bool,
}

impl Default for RattleConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            render_quantum: 128,
            initial_slots: 64,
            require_output_device: false,
        }
    }
}

impl RattleConfig {
    pub fn validate(&self) -> Result<()> {
        if !(8000.0..=384000.0).contains(&self.sample_rate) {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }
        if self.render_quantum == 0 {
            return Err(Error::InvalidConfig("render_quantum must be > 0".into()));
        }
        Ok(())
    }

    /// Length of one render quantum in seconds.
    pub fn quantum_seconds(&self) -> f64 {
        self.render_quantum as f64 / self.sample_rate
    }
}
