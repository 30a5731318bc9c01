//! Tolerance constants for timeline testing.

/// Floating point rounding on engine time (sums of render quanta).
pub const TIME_EPSILON: f64 = 1e-9;

/// Interpolated param values read mid-ramp.
pub const RAMP_EPSILON: f64 = 1e-6;
