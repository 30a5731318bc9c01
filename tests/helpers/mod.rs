//! Test helpers and fixtures for rattle integration tests
//!
//! Engines built here use the software engine only, so no audio hardware
//! is touched in CI.
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `TIME_EPSILON` (1e-9): Engine clock readings
//! - `RAMP_EPSILON` (1e-6): Param values sampled during a ramp

#![allow(dead_code)]

pub mod tolerances;

use rattle::prelude::*;
use rattle::{AutomationEvent, ParamHost};
use std::sync::Once;

/// Default test sample rate (matches common hardware)
pub const TEST_SAMPLE_RATE: f64 = 48000.0;

/// Render quantum used by test engines
pub const TEST_QUANTUM: usize = 480;

static TRACING: Once = Once::new();

/// Install a fmt subscriber once per test binary, writing to the test capture.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Create a basic test engine with the modern software engine.
pub fn test_engine() -> RattleEngine {
    test_engine_with_profile(EngineProfile::Modern)
}

/// Create a test engine with a specific capability level.
pub fn test_engine_with_profile(profile: EngineProfile) -> RattleEngine {
    init_tracing();
    RattleEngine::builder()
        .sample_rate(TEST_SAMPLE_RATE)
        .render_quantum(TEST_QUANTUM)
        .profile(profile)
        .build()
        .expect("Failed to create test engine")
}

/// Test engine plus an external host channel.
pub fn test_engine_with_events() -> (RattleEngine, crossbeam_channel::Receiver<HostEvent<Reply>>) {
    init_tracing();
    let (tx, rx) = host_channel();
    let engine = RattleEngine::builder()
        .sample_rate(TEST_SAMPLE_RATE)
        .events(tx)
        .build()
        .expect("Failed to create test engine");
    (engine, rx)
}

/// Drain every pending event.
pub fn drain(rx: &crossbeam_channel::Receiver<HostEvent<Reply>>) -> Vec<HostEvent<Reply>> {
    rx.try_iter().collect()
}

/// Only the call notifications among `events`.
pub fn notifications(events: Vec<HostEvent<Reply>>) -> Vec<Notification<Reply>> {
    events
        .into_iter()
        .filter_map(|e| match e {
            HostEvent::Call(n) => Some(n),
            _ => None,
        })
        .collect()
}

/// (target value, arrival time) of the last event on `axis`, if it is a ramp.
pub fn last_ramp<H: ParamHost + ?Sized>(host: &H, axis: &str) -> Option<(f64, f64)> {
    match host.param(axis)?.last_event()? {
        AutomationEvent::LinearRamp { value, time, .. } => Some((*value, *time)),
        _ => None,
    }
}
