//! # Rattle - index-addressed audio node registry
//!
//! Lets a scripting host drive a real-time audio graph through small
//! integer handles instead of object references.
//!
//! ## Architecture
//!
//! Rattle is an umbrella crate that coordinates:
//! - **rattle-core** - Node registry, value setter, pose interpolation, call bridge
//! - **rattle-nodes** - Software reference engine with the built-in node types
//!
//! ## Quick Start
//!
//! ```ignore
//! use rattle::prelude::*;
//!
//! let mut engine = RattleEngine::builder().build()?;
//!
//! // Index 0 is the destination
//! let osc = engine.create("Oscillator", Some(&params! { "frequency" => 220.0 }))?;
//! let panner = engine.create("Panner", None)?;
//! engine.connect(osc, panner)?;
//! engine.connect(panner, NodeTable::DESTINATION)?;
//!
//! // Glide the panner one unit right over half a second
//! engine.set_panner_pose(panner, [1.0, 0.0, 0.0], 0.5)?;
//!
//! // Host-facing calls always answer on the event channel
//! engine.call(CallbackId(7), Command::Destroy { index: osc });
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Software engine only
//! - `cpal` - Probe the system output device at startup

/// Re-export of rattle-core for direct access
pub use rattle_core as core;

/// Re-export of rattle-nodes for direct access
pub use rattle_nodes as nodes;

pub use rattle_core::{
    host_channel, params, AudioNode, AudioParam, AutomationEvent, CallBridge, CallOutcome,
    CallbackId, Engine, EngineClock, EngineError, FieldKind, GraphNodeId, HostEvent, Listener,
    ListenerPose, NodeIndex, NodeInfo, NodeParams, NodeTable, Notification, Orientation,
    ParamHost, ParamValue, PosePath, PoseReport, RattleConfig,
};

pub use rattle_nodes::{ConstructorTable, EngineProfile, SoftEngine, SoftNode};

mod error;
pub use error::{Error, Result};

mod command;
pub use command::{Command, Reply};

mod context;

mod builder;
mod engine;

pub use builder::RattleEngineBuilder;
pub use engine::{RattleEngine, RattleEngineOps};

/// Convenience prelude for common imports
pub mod prelude {
    // Main engine
    pub use crate::{RattleEngine, RattleEngineBuilder};

    // Host surface
    pub use crate::{Command, Reply};
    pub use crate::{host_channel, CallbackId, CallOutcome, HostEvent, Notification};

    // Registry and pose
    pub use crate::params;
    pub use crate::{
        ListenerPose, NodeIndex, NodeParams, NodeTable, ParamValue, PosePath, RattleConfig,
    };

    // Engine
    pub use crate::{Engine, EngineProfile, SoftEngine};
}
