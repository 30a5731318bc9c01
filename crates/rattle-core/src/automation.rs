//! Time-scheduled parameter automation.
//!
//! An [`AudioParam`] holds a timeline of [`AutomationEvent`]s stamped in
//! engine time. The control thread schedules events; the render context
//! samples [`AudioParam::value_at`] when it produces audio.
//!
//! # Example
//!
//! ```
//! use rattle_core::{AudioParam, EngineClock};
//!
//! let clock = EngineClock::new();
//! let mut gain = AudioParam::new("gain", 1.0, 0.0, 10.0, clock.clone());
//!
//! // Fade to silence over two seconds
//! gain.linear_ramp_to_value_at_time(0.0, clock.now() + 2.0).unwrap();
//!
//! clock.advance(1.0);
//! assert!((gain.value() - 0.5).abs() < 1e-9);
//! ```

use crate::clock::EngineClock;
use crate::compat::{String, ToString, Vec};
use crate::error::EngineError;
use serde::Serialize;

/// A scheduled change on an [`AudioParam`] timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AutomationEvent {
    /// Step to `value` at `time`.
    SetValue { value: f64, time: f64 },

    /// Interpolate linearly from (`start_time`, `start_value`) to (`time`, `value`).
    LinearRamp {
        start_value: f64,
        start_time: f64,
        value: f64,
        time: f64,
    },
}

impl AutomationEvent {
    /// Time at which the event's target value is reached.
    pub fn time(&self) -> f64 {
        match *self {
            Self::SetValue { time, .. } | Self::LinearRamp { time, .. } => time,
        }
    }

    /// Target value of the event.
    pub fn value(&self) -> f64 {
        match *self {
            Self::SetValue { value, .. } | Self::LinearRamp { value, .. } => value,
        }
    }

    pub fn is_ramp(&self) -> bool {
        matches!(self, Self::LinearRamp { .. })
    }
}

/// An automatable node parameter.
///
/// Values outside `min..=max` are accepted when scheduled and clamped when
/// read, so hosts never see an out-of-range value.
#[derive(Debug, Clone)]
pub struct AudioParam {
    name: String,
    default: f64,
    min: f64,
    max: f64,
    clock: EngineClock,
    events: Vec<AutomationEvent>,
}

impl AudioParam {
    pub fn new(
        name: impl Into<String>,
        default: f64,
        min: f64,
        max: f64,
        clock: EngineClock,
    ) -> Self {
        debug_assert!(max >= min, "max must not be below min");

        Self {
            name: name.into(),
            default: default.clamp(min, max),
            min,
            max,
            clock,
            events: Vec::new(),
        }
    }

    /// Parameter with no nominal range.
    pub fn unbounded(name: impl Into<String>, default: f64, clock: EngineClock) -> Self {
        Self::new(name, default, f64::MIN, f64::MAX, clock)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> f64 {
        self.default
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Scheduled events, ordered by time.
    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    /// Most recently scheduled event.
    pub fn last_event(&self) -> Option<&AutomationEvent> {
        self.events.last()
    }

    /// Value at the current engine time.
    pub fn value(&self) -> f64 {
        self.value_at(self.clock.now())
    }

    /// Value the timeline produces at `time`.
    pub fn value_at(&self, time: f64) -> f64 {
        let mut value = self.default;

        for event in &self.events {
            match *event {
                AutomationEvent::SetValue { value: v, time: t } => {
                    if t > time {
                        break;
                    }
                    value = v;
                }
                AutomationEvent::LinearRamp {
                    start_value,
                    start_time,
                    value: v,
                    time: t,
                } => {
                    if t <= time {
                        value = v;
                        continue;
                    }
                    if time < start_time {
                        break;
                    }
                    let frac = (time - start_time) / (t - start_time);
                    return self.clamp(start_value + (v - start_value) * frac);
                }
            }
        }

        self.clamp(value)
    }

    /// Step to `value` at `time`.
    ///
    /// A ramp still in flight at `time` continues from the new value, so the
    /// step is never swallowed by an older trajectory.
    pub fn set_value_at_time(&mut self, value: f64, time: f64) -> Result<(), EngineError> {
        self.check_finite(value)?;
        self.check_finite(time)?;

        for event in &mut self.events {
            if let AutomationEvent::LinearRamp {
                start_value,
                start_time,
                time: end,
                ..
            } = event
            {
                if *start_time <= time && time < *end {
                    *start_value = value;
                    *start_time = time;
                }
            }
        }

        let event = AutomationEvent::SetValue { value, time };
        let at = self.events.partition_point(|e| e.time() <= time);
        self.events.insert(at, event);
        self.prune(self.clock.now());
        Ok(())
    }

    /// Ramp linearly to `value`, arriving at `end_time`.
    ///
    /// The ramp starts from the parameter's value at the current engine time
    /// and supersedes anything scheduled after now. An `end_time` at or
    /// before now makes the ramp a same-tick jump.
    pub fn linear_ramp_to_value_at_time(
        &mut self,
        value: f64,
        end_time: f64,
    ) -> Result<(), EngineError> {
        self.check_finite(value)?;
        self.check_finite(end_time)?;

        let now = self.clock.now();
        let start_value = self.value_at(now);

        self.events.retain(|e| e.time() <= now);
        self.events.push(AutomationEvent::LinearRamp {
            start_value,
            start_time: now,
            value,
            time: end_time.max(now),
        });
        self.prune(now);

        tracing::trace!(
            param = %self.name,
            from = start_value,
            to = value,
            start = now,
            end = end_time,
            "scheduled linear ramp"
        );
        Ok(())
    }

    /// Drop every event scheduled at or after `time`.
    pub fn cancel_scheduled_values(&mut self, time: f64) {
        self.events.retain(|e| e.time() < time);
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn check_finite(&self, value: f64) -> Result<(), EngineError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(EngineError::InvalidValue {
                field: self.name.to_string(),
                value: value.to_string(),
            })
        }
    }

    // Events that completed before the last one reached by `now` no longer
    // affect any value at or after `now`.
    fn prune(&mut self, now: f64) {
        let reached = self.events.partition_point(|e| e.time() <= now);
        if reached > 1 {
            self.events.drain(..reached - 1);
        }
    }
}
