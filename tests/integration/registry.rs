//! Node registry integration tests
//!
//! Slot allocation, reuse, destroy semantics and randomized create/destroy
//! sequences against the software engine.

use crate::helpers::*;
use proptest::prelude::*;
use rattle::core::Error as CoreError;
use rattle::prelude::*;
use rattle::{AudioNode, Error};
use std::collections::BTreeSet;

fn invalid_index(result: rattle::Result<impl std::fmt::Debug>) -> Option<usize> {
    match result {
        Err(Error::Core(CoreError::InvalidIndex(i))) => Some(i),
        _ => None,
    }
}

/// create Oscillator → 1, destroy 1, create Gain → 1, create Gain → 2.
#[test]
fn test_slot_reuse_scenario() {
    let mut engine = test_engine();

    assert_eq!(engine.create("Oscillator", None).unwrap(), 1);

    engine.destroy(1).unwrap();
    assert_eq!(invalid_index(engine.get_node(1)), Some(1));

    assert_eq!(engine.create("Gain", None).unwrap(), 1);
    assert_eq!(engine.create("Gain", None).unwrap(), 2);
    assert_eq!(engine.get_node(1).unwrap().type_name, "Gain");
}

#[test]
fn test_destination_is_permanent() {
    let mut engine = test_engine();

    let info = engine.get_node(0).unwrap();
    assert_eq!(info.type_name, "Destination");

    assert_eq!(invalid_index(engine.destroy(0)), Some(0));
    assert!(engine.get_node(0).is_ok());
}

#[test]
fn test_never_allocated_index() {
    let engine = test_engine();
    assert_eq!(invalid_index(engine.get_node(3)), Some(3));
    assert_eq!(invalid_index(engine.get_node(usize::MAX)), Some(usize::MAX));
}

#[test]
fn test_unknown_node_type_message() {
    let mut engine = test_engine();
    let err = engine.create("Theremin", None).unwrap_err();

    assert_eq!(err.to_string(), "Invalid rattle Node class: Theremin");
    assert_eq!(engine.node_count(), 1);
}

#[test]
fn test_init_fields_across_profiles() {
    for profile in [EngineProfile::Modern, EngineProfile::Legacy] {
        let mut engine = test_engine_with_profile(profile);
        let init = params! { "frequency" => 220.0, "type" => "sawtooth" };

        let osc = engine.create("Oscillator", Some(&init)).unwrap();
        assert_eq!(
            engine.get_node_value(osc, "frequency").unwrap(),
            ParamValue::Float(220.0)
        );
        assert_eq!(
            engine.get_node_value(osc, "type").unwrap(),
            ParamValue::from("sawtooth")
        );
    }
}

/// A plain constructor succeeds, then a field fails: the node stays registered.
#[test]
fn test_partial_create_failure_keeps_node() {
    let mut engine = test_engine_with_profile(EngineProfile::Legacy);
    let init = params! { "type" => "kazoo" };

    let err = engine.create("Oscillator", Some(&init)).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(CoreError::ConstructionFailed(ref msg)) if msg.contains("index 1")
    ));

    assert_eq!(engine.get_node(1).unwrap().type_name, "Oscillator");
    engine.destroy(1).unwrap();
}

#[test]
fn test_set_node_value_schedules_at_current_time() {
    let mut engine = test_engine();
    let gain = engine.create("Gain", None).unwrap();
    engine.advance(0.75);

    engine
        .set_node_value(gain, "gain", ParamValue::Float(0.3))
        .unwrap();

    let node = engine.nodes().get(gain).unwrap().node();
    assert_eq!(
        node.param("gain").unwrap().last_event(),
        Some(&rattle::AutomationEvent::SetValue {
            value: 0.3,
            time: 0.75
        })
    );
}

#[test]
fn test_set_node_value_during_ramp_takes_effect() {
    let mut engine = test_engine();
    let panner = engine.create("Panner", None).unwrap();

    engine.set_panner_pose(panner, [10.0, 0.0, 0.0], 2.0).unwrap();
    engine.advance(1.0);
    engine
        .set_node_value(panner, "positionX", ParamValue::Float(-3.0))
        .unwrap();

    assert_eq!(
        engine.get_node_value(panner, "positionX").unwrap(),
        ParamValue::Float(-3.0)
    );

    // The ramp resumes from the written value toward its original target
    engine.advance(1.0);
    assert_eq!(
        engine.get_node_value(panner, "positionX").unwrap(),
        ParamValue::Float(10.0)
    );
}

#[test]
fn test_set_node_value_invalid_index() {
    let mut engine = test_engine();
    let result = engine.set_node_value(4, "gain", ParamValue::Float(1.0));
    assert_eq!(invalid_index(result), Some(4));
}

#[test]
fn test_start_source_from_host() {
    let mut engine = test_engine();
    let osc = engine.create("ConstantSource", None).unwrap();

    let json = serde_json::json!({ "op": "start", "index": osc });
    let cmd: Command = serde_json::from_value(json).unwrap();
    assert_eq!(engine.execute(cmd).unwrap(), Reply::None);
    assert!(engine.nodes().get(osc).unwrap().node().is_playing());

    engine.destroy(osc).unwrap();
    assert_eq!(invalid_index(engine.start(osc)), Some(osc));
}

#[test]
fn test_start_processor_is_unsupported() {
    let mut engine = test_engine();
    let gain = engine.create("Gain", None).unwrap();

    let err = engine.start(gain).unwrap_err();
    assert_eq!(err.to_string(), "Gain does not support start");
}

#[test]
fn test_connect_by_index() {
    let mut engine = test_engine();
    let osc = engine.create("Oscillator", None).unwrap();
    let filter = engine.create("BiquadFilter", None).unwrap();

    engine.connect(osc, filter).unwrap();
    engine.connect(filter, NodeTable::DESTINATION).unwrap();
    assert!(engine.connect(filter, osc).is_err());

    engine.disconnect(filter).unwrap();
    assert_eq!(invalid_index(engine.connect(osc, 9)), Some(9));
}

const TYPES: [&str; 3] = ["Oscillator", "Gain", "Panner"];

#[derive(Debug, Clone)]
enum Op {
    Create(usize),
    Destroy(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..TYPES.len()).prop_map(Op::Create),
        (0..16usize).prop_map(Op::Destroy),
    ]
}

proptest! {
    #[test]
    fn prop_create_destroy_sequences(ops in prop::collection::vec(op(), 1..60)) {
        let mut engine = test_engine();
        let mut live = BTreeSet::new();

        for op in ops {
            match op {
                Op::Create(t) => {
                    let lowest_free = (1..).find(|i| !live.contains(i)).unwrap();
                    let idx = engine.create(TYPES[t], None).unwrap();

                    prop_assert_eq!(idx, lowest_free);
                    prop_assert_eq!(engine.get_node(idx).unwrap().type_name, TYPES[t]);
                    live.insert(idx);
                }
                Op::Destroy(pick) if live.is_empty() => {
                    prop_assert!(engine.destroy(pick + 1).is_err());
                }
                Op::Destroy(pick) => {
                    let idx = *live.iter().nth(pick % live.len()).unwrap();
                    engine.destroy(idx).unwrap();
                    live.remove(&idx);

                    prop_assert_eq!(invalid_index(engine.get_node(idx)), Some(idx));
                }
            }

            prop_assert!(engine.get_node(0).is_ok());
            prop_assert_eq!(engine.node_count(), live.len() + 1);
        }
    }
}
