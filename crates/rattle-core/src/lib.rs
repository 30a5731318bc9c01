//! Handle-based registry over a real-time audio graph.
//!
//! # Primary API
//!
//! - [`NodeTable`]: integer-indexed node slots with lowest-free-slot reuse
//! - [`set_field`] / [`set_field_by_index`]: immediate vs. automatable field writes
//! - [`set_listener_pose`] / [`set_panner_pose`]: smoothed spatial pose
//! - [`CallBridge`]: one [`HostEvent`] per host call, success or failure
//!
//! The audio engine itself sits behind the [`Engine`], [`AudioNode`] and
//! [`Listener`] traits; `rattle-nodes` ships a software implementation.
//!
//! # Example
//!
//! ```ignore
//! use rattle_core::prelude::*;
//!
//! let mut nodes = NodeTable::new(engine.destination());
//! let osc = nodes.create(&mut engine, "Oscillator", Some(&params! { "frequency" => 220.0 }))?;
//! nodes.connect(osc, NodeTable::DESTINATION)?;
//!
//! let now = engine.current_time();
//! set_panner_pose(&mut nodes, panner, [1.0, 0.0, 0.0], 0.5, now)?;
//! ```

pub mod compat;

pub mod error;
pub use error::{EngineError, Error, Result};

mod automation;
pub use automation::{AudioParam, AutomationEvent};

mod clock;
pub use clock::EngineClock;

pub mod config;
pub use config::RattleConfig;

mod params;
pub use params::{NodeParams, ParamValue};

mod node;
pub use node::{AudioNode, Constructed, Engine, FieldKind, GraphNodeId, Listener, ParamHost};

mod setter;
pub use setter::{get_field, get_field_by_index, set_field, set_field_by_index};

pub mod registry;
pub use registry::{NodeHandle, NodeIndex, NodeInfo, NodeTable};

pub mod pose;
pub use pose::{set_listener_pose, set_panner_pose, ListenerPose, Orientation, PosePath, PoseReport};

mod bridge;
pub use bridge::{host_channel, CallBridge, CallOutcome, CallbackId, HostEvent, Notification};


/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::params;
    pub use crate::{
        set_field, set_listener_pose, set_panner_pose, AudioNode, AudioParam, CallBridge,
        CallbackId, Engine, EngineClock, Error, FieldKind, HostEvent, ListenerPose, NodeIndex,
        NodeParams, NodeTable, ParamHost, ParamValue, PosePath, RattleConfig, Result,
    };
}
