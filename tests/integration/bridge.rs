//! Host notification tests
//!
//! Every bridged call produces exactly one notification; startup produces
//! either Ready or a single Fatal.

use crate::helpers::*;
use rattle::prelude::*;
use rattle::ConstructorTable;

#[test]
fn test_ready_is_first_event() {
    let (mut engine, rx) = test_engine_with_events();
    engine.call(CallbackId(1), Command::Time);

    let events = drain(&rx);
    assert_eq!(events.first(), Some(&HostEvent::Ready));
    assert_eq!(events.len(), 2);
}

#[test]
fn test_one_notification_per_call() {
    let (mut engine, rx) = test_engine_with_events();
    drain(&rx);

    let ok = engine.call(
        CallbackId(10),
        Command::Create {
            type_name: "Gain".into(),
            init: None,
        },
    );
    assert!(ok);
    assert!(!engine.call(CallbackId(11), Command::Destroy { index: 42 }));
    assert!(engine.call(CallbackId(12), Command::Destroy { index: 1 }));

    let calls = notifications(drain(&rx));
    assert_eq!(calls.len(), 3);

    assert_eq!(calls[0].callback, CallbackId(10));
    assert_eq!(calls[0].value(), Some(&Reply::Index(1)));

    assert_eq!(calls[1].callback, CallbackId(11));
    assert!(!calls[1].success());
    assert_eq!(calls[1].message(), Some("Invalid node index: 42"));

    assert_eq!(calls[2].value(), Some(&Reply::None));
}

#[test]
fn test_unknown_type_failure_message() {
    let (mut engine, rx) = test_engine_with_events();
    drain(&rx);

    engine.call(
        CallbackId(3),
        Command::Create {
            type_name: "Theremin".into(),
            init: None,
        },
    );

    let calls = notifications(drain(&rx));
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].message(), Some("Invalid rattle Node class: Theremin"));
}

#[test]
fn test_call_with_composite_operation() {
    let (mut engine, rx) = test_engine_with_events();
    drain(&rx);

    let ok = engine.call_with(CallbackId(5), |ops| {
        let osc = ops.create("Oscillator", None)?;
        let gain = ops.create("Gain", Some(&params! { "gain" => 0.25 }))?;
        ops.connect(osc, gain)?;
        ops.connect(gain, NodeTable::DESTINATION)?;
        Ok(Reply::Index(gain))
    });

    assert!(ok);
    let calls = notifications(drain(&rx));
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].value(), Some(&Reply::Index(2)));
}

#[test]
fn test_panicking_operation_still_notifies() {
    let (mut engine, rx) = test_engine_with_events();
    drain(&rx);

    let ok = engine.call_with(CallbackId(9), |_| -> rattle::Result<Reply> {
        panic!("engine blew up");
    });
    assert!(!ok);

    let calls = notifications(drain(&rx));
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].callback, CallbackId(9));
    assert!(!calls[0].message().unwrap_or_default().is_empty());

    // The registry is still usable afterwards
    assert_eq!(engine.create("Gain", None).unwrap(), 1);
}

#[test]
fn test_calls_after_shutdown_fail() {
    let (mut engine, rx) = test_engine_with_events();
    drain(&rx);
    engine.shutdown();

    assert!(!engine.call(CallbackId(1), Command::GetNode { index: 0 }));
    let calls = notifications(drain(&rx));
    assert_eq!(calls.len(), 1);
    assert!(calls[0].message().is_some());
}

#[test]
fn test_fatal_sent_once_without_constructors() {
    init_tracing();
    let (tx, rx) = host_channel();
    let empty = SoftEngine::with_constructors(
        EngineProfile::Modern,
        &RattleConfig::default(),
        ConstructorTable::new(),
    );

    let result = RattleEngine::builder().engine(empty).events(tx).build();
    assert!(matches!(
        result,
        Err(rattle::Error::Core(rattle::core::Error::EngineUnavailable(_)))
    ));

    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], HostEvent::Fatal(msg) if !msg.is_empty()));
}

#[cfg(not(feature = "cpal"))]
#[test]
fn test_required_output_device_without_backend() {
    init_tracing();
    let (tx, rx) = host_channel();

    let result = RattleEngine::builder()
        .require_output_device(true)
        .events(tx)
        .build();
    assert!(result.is_err());

    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], HostEvent::Fatal(_)));
}

#[test]
fn test_invalid_config_is_not_fatal() {
    init_tracing();
    let (tx, rx) = host_channel();

    let result = RattleEngine::builder().sample_rate(0.0).events(tx).build();
    assert!(matches!(
        result,
        Err(rattle::Error::Core(rattle::core::Error::InvalidConfig(_)))
    ));
    assert!(drain(&rx).is_empty());
}
