//! RattleEngine: the process-wide registry handle hosts talk to.

use crate::command::{Command, Reply};
use crate::context::Context;
use crate::Result;
use crossbeam_channel::Receiver;
use rattle_core::{
    CallBridge, CallbackId, Engine, HostEvent, ListenerPose, NodeIndex, NodeInfo, NodeParams,
    NodeTable, ParamValue, PoseReport, RattleConfig,
};

/// One audio engine, one node registry and the host notification channel.
///
/// Created once at startup by [`RattleEngineBuilder`](crate::RattleEngineBuilder).
/// Dropping it (or calling [`shutdown`](Self::shutdown)) stops and
/// disconnects every node except the destination.
///
/// # Example
///
/// ```
/// use rattle::prelude::*;
///
/// let mut engine = RattleEngine::builder().build().unwrap();
///
/// let osc = engine.create("Oscillator", None).unwrap();
/// engine.connect(osc, NodeTable::DESTINATION).unwrap();
/// engine.set_node_value(osc, "frequency", ParamValue::Float(220.0)).unwrap();
///
/// // Bridged calls always answer on the event channel
/// engine.call(CallbackId(1), Command::Destroy { index: 42 });
/// ```
pub struct RattleEngine {
    context: Context,
    bridge: CallBridge<Reply>,
    events: Option<Receiver<HostEvent<Reply>>>,
    config: RattleConfig,
}

impl RattleEngine {
    /// Create a new engine builder
    pub fn builder() -> crate::RattleEngineBuilder {
        crate::RattleEngineBuilder::default()
    }

    pub(crate) fn from_parts(
        context: Context,
        bridge: CallBridge<Reply>,
        events: Option<Receiver<HostEvent<Reply>>>,
        config: RattleConfig,
    ) -> Self {
        Self {
            context,
            bridge,
            events,
            config,
        }
    }

    /// Run a host command.
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        self.context.execute(command)
    }

    /// Run a host command through the call bridge.
    ///
    /// Exactly one [`HostEvent::Call`] is sent for `callback`, whatever
    /// happens. Returns whether the command succeeded.
    pub fn call(&mut self, callback: CallbackId, command: Command) -> bool {
        let context = &mut self.context;
        self.bridge.invoke(callback, || context.execute(command))
    }

    /// Run an arbitrary operation through the call bridge.
    pub fn call_with<F>(&mut self, callback: CallbackId, operation: F) -> bool
    where
        F: FnOnce(&mut RattleEngineOps<'_>) -> Result<Reply>,
    {
        let mut ops = RattleEngineOps {
            context: &mut self.context,
        };
        self.bridge.invoke(callback, || operation(&mut ops))
    }

    /// Host event stream, when the builder created the channel.
    pub fn events(&self) -> Option<&Receiver<HostEvent<Reply>>> {
        self.events.as_ref()
    }

    pub fn config(&self) -> &RattleConfig {
        &self.config
    }

    pub fn engine(&self) -> &dyn Engine {
        self.context.engine()
    }

    pub fn nodes(&self) -> &NodeTable {
        self.context.nodes()
    }

    /// Info for the node at `index`.
    pub fn get_node(&self, index: NodeIndex) -> Result<NodeInfo> {
        self.context.get_node(index)
    }

    pub fn create(&mut self, type_name: &str, init: Option<&NodeParams>) -> Result<NodeIndex> {
        self.context.create(type_name, init)
    }

    pub fn destroy(&mut self, index: NodeIndex) -> Result<()> {
        self.context.destroy(index)
    }

    /// Start the source node at `index`; destroying it stops it again.
    pub fn start(&mut self, index: NodeIndex) -> Result<()> {
        self.context.start(index)
    }

    pub fn set_node_value(
        &mut self,
        index: NodeIndex,
        field: &str,
        value: ParamValue,
    ) -> Result<()> {
        self.context.set_node_value(index, field, value)
    }

    pub fn get_node_value(&self, index: NodeIndex, field: &str) -> Result<ParamValue> {
        self.context.get_node_value(index, field)
    }

    pub fn connect(&self, from: NodeIndex, to: NodeIndex) -> Result<()> {
        self.context.connect(from, to)
    }

    pub fn disconnect(&self, index: NodeIndex) -> Result<()> {
        self.context.disconnect(index)
    }

    /// Current engine time in seconds.
    pub fn time(&self) -> f64 {
        self.context.time()
    }

    /// Advance the engine clock. Returns the new time.
    pub fn advance(&self, seconds: f64) -> f64 {
        self.context.engine().clock().advance(seconds)
    }

    pub fn set_pose(&mut self, pose: &ListenerPose, smoothing: f64) -> Result<PoseReport> {
        self.context.set_pose(pose, smoothing)
    }

    pub fn set_panner_pose(
        &mut self,
        index: NodeIndex,
        position: [f64; 3],
        smoothing: f64,
    ) -> Result<PoseReport> {
        self.context.set_panner_pose(index, position, smoothing)
    }

    pub fn node_types(&self) -> Vec<String> {
        self.context.engine().node_types()
    }

    /// Occupied slots, including the destination.
    pub fn node_count(&self) -> usize {
        self.context.nodes().len()
    }

    pub fn indices(&self) -> Vec<NodeIndex> {
        self.context.nodes().indices()
    }

    pub fn is_running(&self) -> bool {
        self.context.is_live()
    }

    /// Stop and release every node except the destination.
    ///
    /// Returns how many nodes were released. Commands fail with
    /// [`Error::ShutDown`](crate::Error::ShutDown) afterwards.
    pub fn shutdown(&mut self) -> usize {
        self.context.shutdown()
    }
}

impl Drop for RattleEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for RattleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RattleEngine")
            .field("nodes", &self.indices())
            .field("time", &self.time())
            .field("running", &self.is_running())
            .finish()
    }
}

/// Registry operations available inside [`RattleEngine::call_with`].
pub struct RattleEngineOps<'a> {
    context: &'a mut Context,
}

impl RattleEngineOps<'_> {
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        self.context.execute(command)
    }

    pub fn create(&mut self, type_name: &str, init: Option<&NodeParams>) -> Result<NodeIndex> {
        self.context.create(type_name, init)
    }

    pub fn destroy(&mut self, index: NodeIndex) -> Result<()> {
        self.context.destroy(index)
    }

    pub fn start(&mut self, index: NodeIndex) -> Result<()> {
        self.context.start(index)
    }

    pub fn connect(&mut self, from: NodeIndex, to: NodeIndex) -> Result<()> {
        self.context.connect(from, to)
    }

    pub fn set_node_value(
        &mut self,
        index: NodeIndex,
        field: &str,
        value: ParamValue,
    ) -> Result<()> {
        self.context.set_node_value(index, field, value)
    }

    pub fn time(&self) -> f64 {
        self.context.time()
    }
}
