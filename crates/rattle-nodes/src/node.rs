//! Software audio node built from a declarative field list.

use crate::routing::RoutingTable;
use rattle_core::{
    AudioNode, AudioParam, EngineClock, EngineError, FieldKind, GraphNodeId, ParamHost, ParamValue,
};

/// Engine capability level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineProfile {
    /// Init-aware constructors, per-axis listener and panner params.
    #[default]
    Modern,
    /// Plain constructors, non-interpolated pose setters only.
    Legacy,
}

/// Everything a constructor needs to build a node.
#[derive(Debug, Clone)]
pub struct NodeContext {
    pub id: GraphNodeId,
    pub clock: EngineClock,
    pub routing: RoutingTable,
    pub sample_rate: f64,
    pub profile: EngineProfile,
}

impl NodeContext {
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }
}

#[derive(Debug, Clone)]
struct Property {
    name: String,
    value: ParamValue,
    /// Allowed string values, empty for free-form.
    choices: &'static [&'static str],
}

/// A node of the software engine.
///
/// Holds its automatable params and immediate properties; rendering reads
/// the param timelines.
#[derive(Debug)]
pub struct SoftNode {
    type_name: String,
    id: GraphNodeId,
    params: Vec<AudioParam>,
    properties: Vec<Property>,
    source: bool,
    playing: bool,
    legacy_position: Option<[f64; 3]>,
    routing: RoutingTable,
}

/// Builder returned by [`SoftNode::builder`].
#[derive(Debug)]
pub struct SoftNodeBuilder {
    node: SoftNode,
    clock: EngineClock,
    inputs: usize,
}

impl SoftNode {
    pub fn builder(type_name: &str, ctx: &NodeContext) -> SoftNodeBuilder {
        SoftNodeBuilder {
            node: SoftNode {
                type_name: type_name.to_string(),
                id: ctx.id,
                params: Vec::new(),
                properties: Vec::new(),
                source: false,
                playing: false,
                legacy_position: None,
                routing: ctx.routing.clone(),
            },
            clock: ctx.clock.clone(),
            inputs: 1,
        }
    }

    pub fn is_source(&self) -> bool {
        self.source
    }

    /// Last position written through the non-interpolated setter.
    pub fn legacy_position(&self) -> Option<[f64; 3]> {
        self.legacy_position
    }

    fn find_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl SoftNodeBuilder {
    /// Number of inputs; sources have none.
    pub fn inputs(mut self, inputs: usize) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn param(mut self, name: &str, default: f64, min: f64, max: f64) -> Self {
        self.node
            .params
            .push(AudioParam::new(name, default, min, max, self.clock.clone()));
        self
    }

    pub fn property(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.node.properties.push(Property {
            name: name.to_string(),
            value: value.into(),
            choices: &[],
        });
        self
    }

    /// String property restricted to `choices`; the first one is the default.
    pub fn choice(mut self, name: &str, choices: &'static [&'static str]) -> Self {
        let default = choices.first().copied().unwrap_or_default();
        self.node.properties.push(Property {
            name: name.to_string(),
            value: ParamValue::from(default),
            choices,
        });
        self
    }

    /// Scheduled source: no inputs, supports `stop`.
    pub fn source(mut self) -> Self {
        self.node.source = true;
        self.inputs = 0;
        self
    }

    /// Position is set through `set_position` instead of per-axis params.
    pub fn legacy_position(mut self) -> Self {
        self.node.legacy_position = Some([0.0; 3]);
        self
    }

    /// Finish and make the node routable.
    pub fn build(self) -> SoftNode {
        self.node.routing.add_node(self.node.id, self.inputs);
        self.node
    }
}

impl ParamHost for SoftNode {
    fn field_kind(&self, name: &str) -> Option<FieldKind> {
        if self.params.iter().any(|p| p.name() == name) {
            Some(FieldKind::Automatable)
        } else if self.find_property(name).is_some() {
            Some(FieldKind::Immediate)
        } else {
            None
        }
    }

    fn param(&self, name: &str) -> Option<&AudioParam> {
        self.params.iter().find(|p| p.name() == name)
    }

    fn param_mut(&mut self, name: &str) -> Option<&mut AudioParam> {
        self.params.iter_mut().find(|p| p.name() == name)
    }

    fn set_property(&mut self, name: &str, value: ParamValue) -> Result<(), EngineError> {
        let property = self
            .properties
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| EngineError::UnknownField(name.to_string()))?;

        let allowed = property.value.same_kind(&value)
            && (property.choices.is_empty()
                || value
                    .as_str()
                    .is_some_and(|s| property.choices.iter().any(|c| *c == s)));
        if !allowed {
            return Err(EngineError::InvalidValue {
                field: name.to_string(),
                value: value.to_string(),
            });
        }

        property.value = value;
        Ok(())
    }

    fn property(&self, name: &str) -> Option<ParamValue> {
        self.find_property(name).map(|p| p.value.clone())
    }

    fn field_names(&self) -> Vec<String> {
        self.params
            .iter()
            .map(|p| p.name().to_string())
            .chain(self.properties.iter().map(|p| p.name.clone()))
            .collect()
    }
}

impl AudioNode for SoftNode {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn graph_id(&self) -> GraphNodeId {
        self.id
    }

    fn supports_stop(&self) -> bool {
        self.source
    }

    fn start(&mut self) -> Result<(), EngineError> {
        if !self.source {
            return Err(EngineError::Unsupported("start"));
        }
        self.playing = true;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        if !self.source {
            return Err(EngineError::Unsupported("stop"));
        }
        self.playing = false;
        Ok(())
    }

    fn connect(&self, destination: &dyn AudioNode) -> Result<(), EngineError> {
        self.routing.connect(self.id, destination.graph_id())
    }

    fn disconnect(&self) {
        let severed = self.routing.disconnect_all(self.id);
        tracing::trace!(node = self.id.0, severed, "disconnected");
    }

    fn set_position(&mut self, position: [f64; 3]) -> Result<(), EngineError> {
        match self.legacy_position.as_mut() {
            Some(current) => {
                *current = position;
                Ok(())
            }
            None => Err(EngineError::Unsupported("setPosition")),
        }
    }
}

impl Drop for SoftNode {
    fn drop(&mut self) {
        self.routing.remove_node(self.id);
    }
}
