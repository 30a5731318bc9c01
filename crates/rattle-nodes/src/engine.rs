//! Software implementation of the [`Engine`] boundary.

use crate::constructors::{self, ConstructorTable};
use crate::listener::SoftListener;
use crate::node::{EngineProfile, NodeContext};
use crate::routing::RoutingTable;
use rattle_core::{
    set_field, AudioNode, Constructed, Engine, EngineClock, EngineError, GraphNodeId, Listener,
    NodeParams, RattleConfig,
};

/// Graph id of the destination node.
pub const DESTINATION_ID: GraphNodeId = GraphNodeId(0);

/// In-process engine that tracks the graph and advances its own clock.
///
/// # Example
///
/// ```
/// use rattle_core::{Engine, NodeTable};
/// use rattle_nodes::{EngineProfile, SoftEngine};
///
/// let mut engine = SoftEngine::new(EngineProfile::Modern);
/// let mut nodes = NodeTable::new(engine.destination());
///
/// let osc = nodes.create(&mut engine, "Oscillator", None).unwrap();
/// assert_eq!(osc, 1);
/// ```
#[derive(Debug)]
pub struct SoftEngine {
    profile: EngineProfile,
    clock: EngineClock,
    constructors: ConstructorTable,
    routing: RoutingTable,
    listener: SoftListener,
    next_id: u64,
    sample_rate: f64,
    render_quantum: usize,
}

impl SoftEngine {
    /// Engine with the built-in node types and default config.
    pub fn new(profile: EngineProfile) -> Self {
        Self::with_config(profile, &RattleConfig::default())
    }

    pub fn with_config(profile: EngineProfile, config: &RattleConfig) -> Self {
        Self::with_constructors(profile, config, ConstructorTable::with_builtins())
    }

    pub fn with_constructors(
        profile: EngineProfile,
        config: &RattleConfig,
        constructors: ConstructorTable,
    ) -> Self {
        let clock = EngineClock::new();
        Self {
            profile,
            listener: SoftListener::new(profile, &clock),
            clock,
            constructors,
            routing: RoutingTable::new(),
            next_id: DESTINATION_ID.0 + 1,
            sample_rate: config.sample_rate,
            render_quantum: config.render_quantum,
        }
    }

    pub fn profile(&self) -> EngineProfile {
        self.profile
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn constructors(&self) -> &ConstructorTable {
        &self.constructors
    }

    pub fn constructors_mut(&mut self) -> &mut ConstructorTable {
        &mut self.constructors
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    pub fn soft_listener(&self) -> &SoftListener {
        &self.listener
    }

    /// Advance the clock by one render quantum. Returns the new time.
    pub fn render_quantum(&self) -> f64 {
        self.advance_frames(self.render_quantum)
    }

    /// Advance the clock by `frames` samples. Returns the new time.
    pub fn advance_frames(&self, frames: usize) -> f64 {
        self.clock.advance(frames as f64 / self.sample_rate)
    }

    fn context(&mut self) -> NodeContext {
        let id = GraphNodeId(self.next_id);
        self.next_id += 1;
        NodeContext {
            id,
            clock: self.clock.clone(),
            routing: self.routing.clone(),
            sample_rate: self.sample_rate,
            profile: self.profile,
        }
    }
}

impl Engine for SoftEngine {
    fn has_node_type(&self, type_name: &str) -> bool {
        self.constructors.has_type(type_name)
    }

    fn node_types(&self) -> Vec<String> {
        self.constructors.list_types()
    }

    fn create_node(
        &mut self,
        type_name: &str,
        init: Option<&NodeParams>,
    ) -> Result<Constructed, EngineError> {
        let ctx = self.context();
        let mut node = self.constructors.create(type_name, &ctx)?;

        match self.profile {
            EngineProfile::Legacy => Ok(Constructed::plain(Box::new(node))),
            EngineProfile::Modern => {
                let now = self.clock.now();
                for (field, value) in init.into_iter().flatten() {
                    set_field(&mut node, field, value.clone(), now).map_err(|e| {
                        EngineError::ConstructionFailed(format!("{type_name}.{field}: {e}"))
                    })?;
                }
                Ok(Constructed::initialized(Box::new(node)))
            }
        }
    }

    fn destination(&mut self) -> Box<dyn AudioNode> {
        let ctx = NodeContext {
            id: DESTINATION_ID,
            clock: self.clock.clone(),
            routing: self.routing.clone(),
            sample_rate: self.sample_rate,
            profile: self.profile,
        };
        Box::new(constructors::destination(&ctx))
    }

    fn clock(&self) -> &EngineClock {
        &self.clock
    }

    fn listener(&self) -> &dyn Listener {
        &self.listener
    }

    fn listener_mut(&mut self) -> &mut dyn Listener {
        &mut self.listener
    }
}
