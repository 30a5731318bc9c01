//! Error types for rattle-core.

use crate::node::GraphNodeId;
use thiserror::Error;

/// Error type for registry, setter, pose and bridge operations.
///
/// These are the failures a host sees (as a message) when a call is routed
/// through the [`CallBridge`](crate::CallBridge).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid node index: {0}")]
    InvalidIndex(usize),

    #[error("Invalid rattle Node class: {0}")]
    UnknownNodeType(String),

    #[error("Node construction failed: {0}")]
    ConstructionFailed(String),

    #[error("Audio engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("{node_type} does not support {capability}")]
    Unsupported {
        node_type: String,
        capability: &'static str,
    },

    #[error("Cannot connect node {from:?} to {to:?}: {reason}")]
    Connection {
        from: GraphNodeId,
        to: GraphNodeId,
        reason: String,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by an [`Engine`](crate::Engine) implementation.
///
/// The registry translates these into [`Error`] depending on which operation
/// was running when they occurred.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Construction failed: {0}")]
    ConstructionFailed(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("Connection refused: {0}")]
    Connection(String),
}

impl EngineError {
    /// Field-level failure (unknown field or rejected value) as a registry error.
    pub(crate) fn into_field_error(self, field: &str) -> Error {
        match self {
            EngineError::UnknownNodeType(name) => Error::UnknownNodeType(name),
            EngineError::ConstructionFailed(msg) => Error::ConstructionFailed(msg),
            other => Error::InvalidField {
                field: field.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
