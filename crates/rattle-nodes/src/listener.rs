//! The software engine's listener.

use crate::node::EngineProfile;
use rattle_core::{AudioParam, EngineClock, EngineError, FieldKind, Listener, ParamHost, ParamValue};

const AXES: [(&str, f64); 9] = [
    ("positionX", 0.0),
    ("positionY", 0.0),
    ("positionZ", 0.0),
    ("forwardX", 0.0),
    ("forwardY", 0.0),
    ("forwardZ", -1.0),
    ("upX", 0.0),
    ("upY", 1.0),
    ("upZ", 0.0),
];

/// Listener with per-axis params (modern profile) or plain setters only (legacy).
#[derive(Debug)]
pub struct SoftListener {
    params: Vec<AudioParam>,
    position: [f64; 3],
    forward: [f64; 3],
    up: [f64; 3],
    position_sets: usize,
    orientation_sets: usize,
}

impl SoftListener {
    pub fn new(profile: EngineProfile, clock: &EngineClock) -> Self {
        let params = match profile {
            EngineProfile::Modern => AXES
                .iter()
                .map(|&(name, default)| AudioParam::unbounded(name, default, clock.clone()))
                .collect(),
            EngineProfile::Legacy => Vec::new(),
        };

        Self {
            params,
            position: [0.0; 3],
            forward: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            position_sets: 0,
            orientation_sets: 0,
        }
    }

    fn axes(&self, names: [&str; 3], fallback: [f64; 3]) -> [f64; 3] {
        let mut out = fallback;
        for (slot, name) in out.iter_mut().zip(names) {
            if let Some(param) = self.param(name) {
                *slot = param.value();
            }
        }
        out
    }

    /// Current position, read from the params when present.
    pub fn position(&self) -> [f64; 3] {
        self.axes(["positionX", "positionY", "positionZ"], self.position)
    }

    pub fn forward(&self) -> [f64; 3] {
        self.axes(["forwardX", "forwardY", "forwardZ"], self.forward)
    }

    pub fn up(&self) -> [f64; 3] {
        self.axes(["upX", "upY", "upZ"], self.up)
    }

    /// Number of non-interpolated position sets so far.
    pub fn position_sets(&self) -> usize {
        self.position_sets
    }

    /// Number of non-interpolated orientation sets so far.
    pub fn orientation_sets(&self) -> usize {
        self.orientation_sets
    }
}

impl ParamHost for SoftListener {
    fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.param(name).map(|_| FieldKind::Automatable)
    }

    fn param(&self, name: &str) -> Option<&AudioParam> {
        self.params.iter().find(|p| p.name() == name)
    }

    fn param_mut(&mut self, name: &str) -> Option<&mut AudioParam> {
        self.params.iter_mut().find(|p| p.name() == name)
    }

    fn set_property(&mut self, name: &str, _value: ParamValue) -> Result<(), EngineError> {
        Err(EngineError::UnknownField(name.to_string()))
    }

    fn property(&self, _name: &str) -> Option<ParamValue> {
        None
    }

    fn field_names(&self) -> Vec<String> {
        self.params.iter().map(|p| p.name().to_string()).collect()
    }
}

impl Listener for SoftListener {
    fn set_position(&mut self, position: [f64; 3]) {
        self.position = position;
        self.position_sets += 1;
    }

    fn set_orientation(&mut self, forward: [f64; 3], up: [f64; 3]) {
        self.forward = forward;
        self.up = up;
        self.orientation_sets += 1;
    }
}
