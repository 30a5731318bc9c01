//! Engine clock shared between the control thread and the render context.

use crate::compat::{Arc, Ordering};
use atomic_float::AtomicF64;

/// Monotonic engine time in seconds.
///
/// Cloning shares the underlying value: the render context advances it while
/// the control thread reads it to timestamp automation events.
#[derive(Debug, Clone)]
pub struct EngineClock {
    seconds: Arc<AtomicF64>,
}

impl EngineClock {
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    pub fn starting_at(seconds: f64) -> Self {
        Self {
            seconds: Arc::new(AtomicF64::new(seconds.max(0.0))),
        }
    }

    /// Current engine time in seconds.
    #[inline]
    pub fn now(&self) -> f64 {
        self.seconds.load(Ordering::Acquire)
    }

    /// Advance by `delta` seconds and return the new time.
    ///
    /// Non-positive or non-finite deltas leave the clock untouched.
    #[inline]
    pub fn advance(&self, delta: f64) -> f64 {
        if !(delta.is_finite() && delta > 0.0) {
            return self.now();
        }
        self.seconds.fetch_add(delta, Ordering::AcqRel) + delta
    }
}

impl Default for EngineClock {
    fn default() -> Self {
        Self::new()
    }
}
