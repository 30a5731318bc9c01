//! Engine boundary: node, listener and engine capability traits.
//!
//! The registry never looks inside an audio node. It asks the node what a
//! field *is* ([`FieldKind`]) and which optional operations it offers, then
//! picks the matching code path once per call.

use crate::automation::AudioParam;
use crate::clock::EngineClock;
use crate::compat::{Box, String, Vec};
use crate::error::EngineError;
use crate::params::{NodeParams, ParamValue};
use serde::{Deserialize, Serialize};

/// Engine-level identity of a node inside its processing graph.
///
/// Unrelated to the registry index the host sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphNodeId(pub u64);

/// How a node field must be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Plain value, assigned directly.
    Immediate,
    /// Time-scheduled [`AudioParam`]; writes go through its automation API.
    Automatable,
}

/// Anything exposing named fields: audio nodes and the listener.
pub trait ParamHost {
    /// Declared kind of `name`, or `None` if the field is not exposed.
    fn field_kind(&self, name: &str) -> Option<FieldKind>;

    fn param(&self, name: &str) -> Option<&AudioParam>;

    fn param_mut(&mut self, name: &str) -> Option<&mut AudioParam>;

    /// Assign an immediate field.
    fn set_property(&mut self, name: &str, value: ParamValue) -> Result<(), EngineError>;

    /// Read an immediate field back.
    fn property(&self, name: &str) -> Option<ParamValue>;

    /// Names of every exposed field.
    fn field_names(&self) -> Vec<String>;
}

/// An engine-constructed audio processing node.
pub trait AudioNode: ParamHost + Send {
    /// Type name the node was created with (e.g. `"Oscillator"`).
    fn type_name(&self) -> &str;

    fn graph_id(&self) -> GraphNodeId;

    /// Whether [`start`](Self::start) and [`stop`](Self::stop) are available.
    fn supports_stop(&self) -> bool {
        false
    }

    /// Begin playback of a source node.
    fn start(&mut self) -> Result<(), EngineError> {
        Err(EngineError::Unsupported("start"))
    }

    fn is_playing(&self) -> bool {
        false
    }

    /// Stop playback. Stopping a node that is not playing is not an error.
    fn stop(&mut self) -> Result<(), EngineError> {
        Err(EngineError::Unsupported("stop"))
    }

    /// Route this node's output into `destination`.
    fn connect(&self, destination: &dyn AudioNode) -> Result<(), EngineError>;

    /// Sever every incoming and outgoing link of this node.
    fn disconnect(&self);

    /// Non-interpolated position setter for nodes without per-axis params.
    fn set_position(&mut self, _position: [f64; 3]) -> Result<(), EngineError> {
        Err(EngineError::Unsupported("setPosition"))
    }
}

/// The engine's singleton listener.
pub trait Listener: ParamHost + Send {
    /// Non-interpolated position setter.
    fn set_position(&mut self, position: [f64; 3]);

    /// Non-interpolated orientation setter.
    fn set_orientation(&mut self, forward: [f64; 3], up: [f64; 3]);
}

/// Result of constructing a node.
pub struct Constructed {
    pub node: Box<dyn AudioNode>,
    /// `true` if the constructor consumed the init map itself.
    pub init_applied: bool,
}

impl Constructed {
    /// Node built by a plain constructor; init fields still need applying.
    pub fn plain(node: Box<dyn AudioNode>) -> Self {
        Self {
            node,
            init_applied: false,
        }
    }

    /// Node built by a constructor that accepted the init map.
    pub fn initialized(node: Box<dyn AudioNode>) -> Self {
        Self {
            node,
            init_applied: true,
        }
    }
}

/// The external audio engine.
pub trait Engine: Send {
    /// Whether a constructor exists for `type_name`.
    fn has_node_type(&self, type_name: &str) -> bool;

    /// Every constructible type name.
    fn node_types(&self) -> Vec<String>;

    /// Construct a node. `init` may be consumed by the constructor, see [`Constructed`].
    fn create_node(
        &mut self,
        type_name: &str,
        init: Option<&NodeParams>,
    ) -> Result<Constructed, EngineError>;

    /// The fixed output node. Called once, when the registry is created.
    fn destination(&mut self) -> Box<dyn AudioNode>;

    fn clock(&self) -> &EngineClock;

    /// Current engine time in seconds.
    fn current_time(&self) -> f64 {
        self.clock().now()
    }

    fn listener(&self) -> &dyn Listener;

    fn listener_mut(&mut self) -> &mut dyn Listener;
}
