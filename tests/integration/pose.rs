//! Pose interpolation integration tests
//!
//! Listener and panner ramps on the modern engine, the single-set fallback on
//! the legacy engine, and ramp supersession while a ramp is in flight.

use crate::helpers::tolerances::*;
use crate::helpers::*;
use approx::assert_relative_eq;
use rattle::core::Error as CoreError;
use rattle::prelude::*;
use rattle::core::set_listener_pose;
use rattle::{Error, Orientation, ParamHost};

const AXES: [&str; 9] = [
    "positionX", "positionY", "positionZ", "forwardX", "forwardY", "forwardZ", "upX", "upY", "upZ",
];

fn full_pose() -> ListenerPose {
    ListenerPose::at([1.0, 2.0, 3.0]).facing([0.0, 0.0, -1.0], [0.0, 1.0, 0.0])
}

#[test]
fn test_listener_ramps_to_call_time_plus_smoothing() {
    let mut engine = test_engine();
    engine.advance(1.25);

    let report = engine.set_pose(&full_pose(), 2.5).unwrap();
    assert_relative_eq!(report.target_time, 3.75, epsilon = TIME_EPSILON);
    assert_eq!(report.position, PosePath::Ramped);
    assert_eq!(report.orientation, Some(PosePath::Ramped));

    let listener = engine.engine().listener();
    let expected = [1.0, 2.0, 3.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0];
    for (axis, value) in AXES.iter().zip(expected) {
        let (target, time) = last_ramp(listener, axis).unwrap();
        assert_relative_eq!(target, value, epsilon = RAMP_EPSILON);
        assert_relative_eq!(time, 3.75, epsilon = TIME_EPSILON);
    }
}

#[test]
fn test_listener_position_halfway_through_ramp() {
    let mut engine = test_engine();
    engine.set_pose(&ListenerPose::at([2.0, -4.0, 0.0]), 1.0).unwrap();

    engine.advance(0.5);
    let listener = engine.engine().listener();
    assert_relative_eq!(listener.param("positionX").unwrap().value(), 1.0, epsilon = RAMP_EPSILON);
    assert_relative_eq!(listener.param("positionY").unwrap().value(), -2.0, epsilon = RAMP_EPSILON);

    engine.advance(0.75);
    let listener = engine.engine().listener();
    assert_relative_eq!(listener.param("positionX").unwrap().value(), 2.0, epsilon = RAMP_EPSILON);
}

#[test]
fn test_position_only_leaves_orientation_alone() {
    let mut engine = test_engine();
    let report = engine.set_pose(&ListenerPose::at([0.0, 0.0, 5.0]), 0.1).unwrap();

    assert_eq!(report.orientation, None);
    let listener = engine.engine().listener();
    assert!(last_ramp(listener, "forwardZ").is_none());
    assert_relative_eq!(listener.param("forwardZ").unwrap().value(), -1.0);
}

#[test]
fn test_zero_smoothing_arrives_immediately() {
    let mut engine = test_engine();
    engine.advance(0.4);

    engine.set_pose(&ListenerPose::at([7.0, 0.0, 0.0]), 0.0).unwrap();
    let listener = engine.engine().listener();
    assert_relative_eq!(listener.param("positionX").unwrap().value(), 7.0, epsilon = RAMP_EPSILON);
}

#[test]
fn test_negative_smoothing_is_a_jump() {
    let mut engine = test_engine();
    engine.advance(2.0);

    let report = engine.set_pose(&ListenerPose::at([3.0, 0.0, 0.0]), -1.0).unwrap();
    assert_relative_eq!(report.target_time, 1.0, epsilon = TIME_EPSILON);

    let listener = engine.engine().listener();
    let (_, time) = last_ramp(listener, "positionX").unwrap();
    assert_relative_eq!(time, 2.0, epsilon = TIME_EPSILON);
    assert_relative_eq!(listener.param("positionX").unwrap().value(), 3.0, epsilon = RAMP_EPSILON);
}

#[test]
fn test_legacy_listener_takes_single_sets() {
    let mut engine = test_engine_with_profile(EngineProfile::Legacy);

    let report = engine.set_pose(&full_pose(), 2.5).unwrap();
    assert_eq!(report.position, PosePath::Immediate);
    assert_eq!(report.orientation, Some(PosePath::Immediate));
    assert!(engine.engine().listener().param("positionX").is_none());
}

/// Orientation on a legacy listener is one setOrientation call, not six ramps.
#[test]
fn test_legacy_orientation_set_once() {
    let mut soft = SoftEngine::new(EngineProfile::Legacy);
    let pose = ListenerPose {
        position: [0.0, 1.0, 0.0],
        orientation: Some(Orientation {
            forward: [1.0, 0.0, 0.0],
            up: [0.0, 0.0, 1.0],
        }),
    };

    set_listener_pose(&mut soft, &pose, 0.5).unwrap();

    let listener = soft.soft_listener();
    assert_eq!(listener.orientation_sets(), 1);
    assert_eq!(listener.position_sets(), 1);
    assert_eq!(listener.forward(), [1.0, 0.0, 0.0]);
    assert_eq!(listener.up(), [0.0, 0.0, 1.0]);
}

#[test]
fn test_panner_ramp_superseded_mid_flight() {
    let mut engine = test_engine();
    let panner = engine.create("Panner", None).unwrap();

    engine.set_panner_pose(panner, [10.0, 0.0, 0.0], 1.0).unwrap();
    engine.advance(0.5);

    let node = engine.nodes().get(panner).unwrap().node();
    assert_relative_eq!(node.param("positionX").unwrap().value(), 5.0, epsilon = RAMP_EPSILON);

    // New ramp starts from wherever the old one had got to
    engine.set_panner_pose(panner, [0.0, 0.0, 0.0], 1.0).unwrap();
    engine.advance(0.5);

    let node = engine.nodes().get(panner).unwrap().node();
    assert_relative_eq!(node.param("positionX").unwrap().value(), 2.5, epsilon = RAMP_EPSILON);
}

#[test]
fn test_legacy_panner_single_set() {
    let mut engine = test_engine_with_profile(EngineProfile::Legacy);
    let panner = engine.create("Panner", None).unwrap();

    let report = engine.set_panner_pose(panner, [1.0, 2.0, 3.0], 0.3).unwrap();
    assert_eq!(report.position, PosePath::Immediate);
}

#[test]
fn test_panner_pose_on_free_slot() {
    let mut engine = test_engine();
    let panner = engine.create("Panner", None).unwrap();
    engine.destroy(panner).unwrap();

    let err = engine.set_panner_pose(panner, [1.0, 0.0, 0.0], 0.1).unwrap_err();
    assert_eq!(err, Error::Core(CoreError::InvalidIndex(panner)));
}

#[test]
fn test_panner_pose_on_gain_is_unsupported() {
    let mut engine = test_engine();
    let gain = engine.create("Gain", None).unwrap();

    let err = engine.set_panner_pose(gain, [1.0, 0.0, 0.0], 0.1).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(CoreError::Unsupported { ref node_type, .. }) if node_type == "Gain"
    ));
}
