//! The single engine + registry pair behind a [`RattleEngine`](crate::RattleEngine).

use crate::command::{Command, Reply};
use crate::{Error, Result};
use rattle_core::{
    get_field_by_index, set_field_by_index, set_listener_pose, set_panner_pose, Engine,
    ListenerPose, NodeIndex, NodeInfo, NodeParams, NodeTable, ParamValue, PoseReport,
};

pub(crate) struct Context {
    engine: Box<dyn Engine>,
    nodes: NodeTable,
    live: bool,
}

impl Context {
    pub(crate) fn new(mut engine: Box<dyn Engine>, initial_slots: usize) -> Self {
        let nodes = NodeTable::with_capacity(engine.destination(), initial_slots);
        Self {
            engine,
            nodes,
            live: true,
        }
    }

    pub(crate) fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    pub(crate) fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    fn check_live(&self) -> Result<()> {
        if self.live {
            Ok(())
        } else {
            Err(Error::ShutDown)
        }
    }

    pub(crate) fn execute(&mut self, command: Command) -> Result<Reply> {
        tracing::trace!(op = command.name(), "execute");
        match command {
            Command::GetNode { index } => self.get_node(index).map(Reply::Node),
            Command::Create { type_name, init } => self
                .create(&type_name, init.as_ref())
                .map(Reply::Index),
            Command::Destroy { index } => self.destroy(index).map(|_| Reply::None),
            Command::Start { index } => self.start(index).map(|_| Reply::None),
            Command::SetNodeValue {
                index,
                field,
                value,
            } => self
                .set_node_value(index, &field, value)
                .map(|_| Reply::None),
            Command::GetNodeValue { index, field } => {
                self.get_node_value(index, &field).map(Reply::Value)
            }
            Command::Connect { from, to } => self.connect(from, to).map(|_| Reply::None),
            Command::Disconnect { index } => self.disconnect(index).map(|_| Reply::None),
            Command::Time => {
                self.check_live()?;
                Ok(Reply::Time(self.time()))
            }
            Command::SetPose { pose, smoothing } => {
                self.set_pose(&pose, smoothing).map(|_| Reply::None)
            }
            Command::SetPannerPose {
                index,
                position,
                smoothing,
            } => self
                .set_panner_pose(index, position, smoothing)
                .map(|_| Reply::None),
            Command::NodeTypes => {
                self.check_live()?;
                Ok(Reply::Types(self.engine.node_types()))
            }
        }
    }

    pub(crate) fn get_node(&self, index: NodeIndex) -> Result<NodeInfo> {
        self.check_live()?;
        Ok(self.nodes.info(index)?)
    }

    pub(crate) fn create(
        &mut self,
        type_name: &str,
        init: Option<&NodeParams>,
    ) -> Result<NodeIndex> {
        self.check_live()?;
        Ok(self.nodes.create(self.engine.as_mut(), type_name, init)?)
    }

    pub(crate) fn destroy(&mut self, index: NodeIndex) -> Result<()> {
        self.check_live()?;
        Ok(self.nodes.destroy(index)?)
    }

    pub(crate) fn start(&mut self, index: NodeIndex) -> Result<()> {
        self.check_live()?;
        Ok(self.nodes.start(index)?)
    }

    pub(crate) fn set_node_value(
        &mut self,
        index: NodeIndex,
        field: &str,
        value: ParamValue,
    ) -> Result<()> {
        self.check_live()?;
        let now = self.engine.current_time();
        Ok(set_field_by_index(&mut self.nodes, index, field, value, now)?)
    }

    pub(crate) fn get_node_value(&self, index: NodeIndex, field: &str) -> Result<ParamValue> {
        self.check_live()?;
        Ok(get_field_by_index(&self.nodes, index, field)?)
    }

    pub(crate) fn connect(&self, from: NodeIndex, to: NodeIndex) -> Result<()> {
        self.check_live()?;
        Ok(self.nodes.connect(from, to)?)
    }

    pub(crate) fn disconnect(&self, index: NodeIndex) -> Result<()> {
        self.check_live()?;
        Ok(self.nodes.disconnect(index)?)
    }

    pub(crate) fn time(&self) -> f64 {
        self.engine.current_time()
    }

    pub(crate) fn set_pose(&mut self, pose: &ListenerPose, smoothing: f64) -> Result<PoseReport> {
        self.check_live()?;
        Ok(set_listener_pose(self.engine.as_mut(), pose, smoothing)?)
    }

    pub(crate) fn set_panner_pose(
        &mut self,
        index: NodeIndex,
        position: [f64; 3],
        smoothing: f64,
    ) -> Result<PoseReport> {
        self.check_live()?;
        let now = self.engine.current_time();
        Ok(set_panner_pose(&mut self.nodes, index, position, smoothing, now)?)
    }

    /// Release every node but the destination. Later calls are no-ops.
    pub(crate) fn shutdown(&mut self) -> usize {
        if !self.live {
            return 0;
        }
        self.live = false;
        let released = self.nodes.clear();
        tracing::debug!(released, "registry shut down");
        released
    }

    pub(crate) fn is_live(&self) -> bool {
        self.live
    }
}
