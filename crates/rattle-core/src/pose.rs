//! Spatial pose for the listener and panner nodes.
//!
//! Each call computes a fresh target time (`now + smoothing`) and, per group
//! of axes, either ramps every axis param to arrive exactly then or, when the
//! target has no per-axis params, issues one non-interpolated set covering
//! the whole vector. Nothing is remembered between calls.

use crate::compat::ToString;
use crate::error::{EngineError, Error, Result};
use crate::node::{Engine, FieldKind, ParamHost};
use crate::registry::{NodeIndex, NodeTable};
use serde::{Deserialize, Serialize};

pub const POSITION_AXES: [&str; 3] = ["positionX", "positionY", "positionZ"];
pub const FORWARD_AXES: [&str; 3] = ["forwardX", "forwardY", "forwardZ"];
pub const UP_AXES: [&str; 3] = ["upX", "upY", "upZ"];

/// Listener facing, as a forward vector and an up vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub forward: [f64; 3],
    pub up: [f64; 3],
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            forward: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

/// Listener position plus an optional orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ListenerPose {
    pub position: [f64; 3],
    #[serde(default)]
    pub orientation: Option<Orientation>,
}

impl ListenerPose {
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            orientation: None,
        }
    }

    pub fn facing(mut self, forward: [f64; 3], up: [f64; 3]) -> Self {
        self.orientation = Some(Orientation { forward, up });
        self
    }
}

/// How a group of axes was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PosePath {
    /// One linear ramp per axis param.
    Ramped,
    /// A single non-interpolated set; smoothing ignored.
    Immediate,
}

/// What a pose call did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseReport {
    /// Engine time the ramps arrive at.
    pub target_time: f64,
    pub position: PosePath,
    /// `None` when no orientation was supplied.
    pub orientation: Option<PosePath>,
}

fn has_automatable<H: ParamHost + ?Sized>(host: &H, axis: &str) -> bool {
    host.field_kind(axis) == Some(FieldKind::Automatable)
}

fn require_axes<H: ParamHost + ?Sized>(host: &H, axes: &[&str]) -> Result<()> {
    match axes.iter().find(|axis| !has_automatable(host, axis)) {
        Some(axis) => Err(Error::InvalidField {
            field: axis.to_string(),
            reason: "axis param missing".to_string(),
        }),
        None => Ok(()),
    }
}

/// Callers check every axis with [`require_axes`] first.
fn ramp_axes<H: ParamHost + ?Sized>(
    host: &mut H,
    axes: &[&str],
    values: &[f64],
    target_time: f64,
) -> Result<()> {
    for (axis, value) in axes.iter().zip(values) {
        let param = host.param_mut(axis).ok_or_else(|| Error::InvalidField {
            field: axis.to_string(),
            reason: "axis param missing".to_string(),
        })?;
        param
            .linear_ramp_to_value_at_time(*value, target_time)
            .map_err(|e| e.into_field_error(axis))?;
    }
    Ok(())
}

/// Move (and optionally turn) the engine's listener.
///
/// `smoothing` is in seconds; zero or negative means arrive immediately.
/// Every axis to be ramped is checked before the first ramp is issued.
pub fn set_listener_pose(
    engine: &mut dyn Engine,
    pose: &ListenerPose,
    smoothing: f64,
) -> Result<PoseReport> {
    let target_time = engine.current_time() + smoothing;
    let listener = engine.listener_mut();

    let ramp_position = has_automatable(&*listener, POSITION_AXES[0]);
    let ramp_orientation =
        pose.orientation.is_some() && has_automatable(&*listener, FORWARD_AXES[0]);

    if ramp_position {
        require_axes(&*listener, &POSITION_AXES)?;
    }
    if ramp_orientation {
        require_axes(&*listener, &FORWARD_AXES)?;
        require_axes(&*listener, &UP_AXES)?;
    }

    let position = if ramp_position {
        ramp_axes(&mut *listener, &POSITION_AXES, &pose.position, target_time)?;
        PosePath::Ramped
    } else {
        listener.set_position(pose.position);
        PosePath::Immediate
    };

    let orientation = match pose.orientation {
        None => None,
        Some(o) if ramp_orientation => {
            ramp_axes(&mut *listener, &FORWARD_AXES, &o.forward, target_time)?;
            ramp_axes(&mut *listener, &UP_AXES, &o.up, target_time)?;
            Some(PosePath::Ramped)
        }
        Some(o) => {
            listener.set_orientation(o.forward, o.up);
            Some(PosePath::Immediate)
        }
    };

    tracing::trace!(target_time, ?position, ?orientation, "listener pose");
    Ok(PoseReport {
        target_time,
        position,
        orientation,
    })
}

/// Move the panner registered at `index`.
///
/// Fails with `InvalidIndex` before anything is scheduled if `index` does
/// not resolve, and with `Unsupported` if the node has neither per-axis
/// position params nor a position setter.
pub fn set_panner_pose(
    nodes: &mut NodeTable,
    index: NodeIndex,
    position: [f64; 3],
    smoothing: f64,
    now: f64,
) -> Result<PoseReport> {
    let handle = nodes.get_mut(index)?;
    let target_time = now + smoothing;
    let node = handle.node_mut();

    let path = if has_automatable(&*node, POSITION_AXES[0]) {
        require_axes(&*node, &POSITION_AXES)?;
        ramp_axes(&mut *node, &POSITION_AXES, &position, target_time)?;
        PosePath::Ramped
    } else {
        node.set_position(position).map_err(|e| match e {
            EngineError::Unsupported(capability) => Error::Unsupported {
                node_type: node.type_name().to_string(),
                capability,
            },
            other => other.into_field_error("position"),
        })?;
        PosePath::Immediate
    };

    tracing::trace!(index, target_time, ?path, "panner pose");
    Ok(PoseReport {
        target_time,
        position: path,
        orientation: None,
    })
}
