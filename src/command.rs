//! Host command surface.
//!
//! Commands arrive from the scripting host as tagged records, e.g.
//! `{"op": "create", "typeName": "Gain", "init": {"gain": 0.5}}`.

use rattle_core::{ListenerPose, NodeIndex, NodeInfo, NodeParams, ParamValue};
use serde::{Deserialize, Serialize};

/// One host request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    GetNode {
        index: NodeIndex,
    },
    Create {
        type_name: String,
        #[serde(default)]
        init: Option<NodeParams>,
    },
    Destroy {
        index: NodeIndex,
    },
    /// Begin playback of a source node.
    Start {
        index: NodeIndex,
    },
    SetNodeValue {
        index: NodeIndex,
        field: String,
        value: ParamValue,
    },
    GetNodeValue {
        index: NodeIndex,
        field: String,
    },
    Connect {
        from: NodeIndex,
        to: NodeIndex,
    },
    Disconnect {
        index: NodeIndex,
    },
    Time,
    SetPose {
        pose: ListenerPose,
        #[serde(default)]
        smoothing: f64,
    },
    SetPannerPose {
        index: NodeIndex,
        position: [f64; 3],
        #[serde(default)]
        smoothing: f64,
    },
    NodeTypes,
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetNode { .. } => "getNode",
            Self::Create { .. } => "create",
            Self::Destroy { .. } => "destroy",
            Self::Start { .. } => "start",
            Self::SetNodeValue { .. } => "setNodeValue",
            Self::GetNodeValue { .. } => "getNodeValue",
            Self::Connect { .. } => "connect",
            Self::Disconnect { .. } => "disconnect",
            Self::Time => "time",
            Self::SetPose { .. } => "setPose",
            Self::SetPannerPose { .. } => "setPannerPose",
            Self::NodeTypes => "nodeTypes",
        }
    }

    /// `setPose` from the nine scalar components.
    #[allow(clippy::too_many_arguments)]
    pub fn set_pose(
        x: f64,
        y: f64,
        z: f64,
        fx: f64,
        fy: f64,
        fz: f64,
        ux: f64,
        uy: f64,
        uz: f64,
        smoothing: f64,
    ) -> Self {
        Self::SetPose {
            pose: ListenerPose::at([x, y, z]).facing([fx, fy, fz], [ux, uy, uz]),
            smoothing,
        }
    }
}

/// Successful result of a [`Command`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Reply {
    None,
    Index(NodeIndex),
    Time(f64),
    Node(NodeInfo),
    Value(ParamValue),
    Types(Vec<String>),
}

impl Reply {
    pub fn as_index(&self) -> Option<NodeIndex> {
        match self {
            Self::Index(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<f64> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }
}
