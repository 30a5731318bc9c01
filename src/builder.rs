//! Builder for configuring and constructing a `RattleEngine`.

use crate::command::Reply;
use crate::context::Context;
use crate::{RattleEngine, Result};
use crossbeam_channel::Sender;
use rattle_core::{host_channel, CallBridge, Engine, Error as CoreError, HostEvent, RattleConfig};
use rattle_nodes::{probe_output_device, EngineProfile, SoftEngine};

/// Startup happens once: the engine is probed, slot 0 is filled with its
/// destination and [`HostEvent::Ready`] is sent. If the engine cannot run
/// at all a single [`HostEvent::Fatal`] is sent instead and `build` fails
/// with `EngineUnavailable`.
///
/// Without [`engine`](Self::engine) a [`SoftEngine`] with the chosen
/// [`EngineProfile`] is used.
///
/// # Example
///
/// ```ignore
/// use rattle::prelude::*;
///
/// let (tx, rx) = host_channel();
/// let engine = RattleEngine::builder()
///     .sample_rate(48000.0)
///     .events(tx)
///     .build()?;
///
/// assert_eq!(rx.try_recv()?, HostEvent::Ready);
/// ```
#[derive(Default)]
pub struct RattleEngineBuilder {
    config: RattleConfig,
    profile: EngineProfile,
    engine: Option<Box<dyn Engine>>,
    events: Option<Sender<HostEvent<Reply>>>,
}

impl RattleEngineBuilder {
    /// Replace the whole config.
    pub fn config(mut self, config: RattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: 44100
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Default: 128 frames
    pub fn render_quantum(mut self, frames: usize) -> Self {
        self.config.render_quantum = frames;
        self
    }

    /// Default: 64
    pub fn initial_slots(mut self, slots: usize) -> Self {
        self.config.initial_slots = slots;
        self
    }

    /// Fail startup when no output device can be opened. Default: false
    pub fn require_output_device(mut self, required: bool) -> Self {
        self.config.require_output_device = required;
        self
    }

    /// Capability level of the built-in engine. Default: `Modern`
    pub fn profile(mut self, profile: EngineProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Use a custom engine instead of the built-in one.
    pub fn engine(mut self, engine: impl Engine + 'static) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    /// Send host events to `sender` instead of an internal channel.
    pub fn events(mut self, sender: Sender<HostEvent<Reply>>) -> Self {
        self.events = Some(sender);
        self
    }

    pub fn build(self) -> Result<RattleEngine> {
        self.config.validate()?;

        let (sender, receiver) = match self.events {
            Some(sender) => (sender, None),
            None => {
                let (tx, rx) = host_channel();
                (tx, Some(rx))
            }
        };
        let bridge = CallBridge::new(sender);

        let engine: Box<dyn Engine> = match self.engine {
            Some(engine) => engine,
            None => Box::new(SoftEngine::with_config(self.profile, &self.config)),
        };

        if let Err(e) = check_engine(engine.as_ref(), &self.config) {
            bridge.fatal(e.to_string());
            return Err(e.into());
        }

        let context = Context::new(engine, self.config.initial_slots);
        tracing::info!(
            sample_rate = self.config.sample_rate,
            node_types = context.engine().node_types().len(),
            "rattle engine ready"
        );
        bridge.ready();

        Ok(RattleEngine::from_parts(context, bridge, receiver, self.config))
    }
}

/// Startup contract: the engine must be able to construct nodes at all.
fn check_engine(engine: &dyn Engine, config: &RattleConfig) -> rattle_core::Result<()> {
    if engine.node_types().is_empty() {
        return Err(CoreError::EngineUnavailable(
            "audio engine offers no node constructors".into(),
        ));
    }

    if config.require_output_device {
        let device = probe_output_device()?;
        tracing::debug!(device = %device, "output device found");
    }
    Ok(())
}
