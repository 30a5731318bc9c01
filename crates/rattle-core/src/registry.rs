//! Node registry: stable integer handles over engine-owned audio nodes.
//!
//! Hosts address nodes by small integers across a scripting boundary. The
//! [`NodeTable`] maps those integers onto slots and reuses the lowest free
//! slot on create, so create/destroy churn (one-shot sound effects, say)
//! does not grow the index space.
//!
//! Index 0 always holds the engine's destination node.
//!
//! # Example
//!
//! ```ignore
//! let mut nodes = NodeTable::new(engine.destination());
//!
//! let osc = nodes.create(&mut engine, "Oscillator", None)?;   // 1
//! nodes.destroy(osc)?;
//! let gain = nodes.create(&mut engine, "Gain", None)?;        // 1 again
//! ```

use crate::compat::{Box, String, ToString, Vec};
use crate::error::{EngineError, Error, Result};
use crate::node::{AudioNode, Engine, GraphNodeId};
use crate::params::NodeParams;
use crate::setter::set_field;
use serde::{Deserialize, Serialize};

/// Host-visible node index.
pub type NodeIndex = usize;

/// Owned reference to an engine-constructed node.
pub struct NodeHandle {
    node: Box<dyn AudioNode>,
}

impl NodeHandle {
    pub fn new(node: Box<dyn AudioNode>) -> Self {
        Self { node }
    }

    pub fn type_name(&self) -> &str {
        self.node.type_name()
    }

    pub fn node(&self) -> &dyn AudioNode {
        self.node.as_ref()
    }

    pub fn node_mut(&mut self) -> &mut dyn AudioNode {
        self.node.as_mut()
    }

    /// Stop (if supported) and disconnect, consuming the handle.
    fn release(mut self) {
        if self.node.supports_stop() {
            if let Err(e) = self.node.stop() {
                tracing::debug!(node_type = self.type_name(), "stop during destroy failed: {e}");
            }
        }
        self.node.disconnect();
    }
}

impl core::fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeHandle")
            .field("type_name", &self.type_name())
            .field("graph_id", &self.node.graph_id())
            .finish()
    }
}

/// Summary of an occupied slot, suitable for returning to a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub index: NodeIndex,
    pub type_name: String,
    pub graph_id: GraphNodeId,
    pub fields: Vec<String>,
}

#[derive(Debug)]
enum Slot {
    Empty,
    Occupied(NodeHandle),
}

/// Index-addressable table of node slots.
#[derive(Debug)]
pub struct NodeTable {
    slots: Vec<Slot>,
}

impl NodeTable {
    /// Index of the engine's destination node.
    pub const DESTINATION: NodeIndex = 0;

    /// Create a table whose slot 0 holds `destination`.
    pub fn new(destination: Box<dyn AudioNode>) -> Self {
        Self::with_capacity(destination, 64)
    }

    pub fn with_capacity(destination: Box<dyn AudioNode>, capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.push(Slot::Occupied(NodeHandle::new(destination)));
        Self { slots }
    }

    /// Look up the node at `index`.
    pub fn get(&self, index: NodeIndex) -> Result<&NodeHandle> {
        match self.slots.get(index) {
            Some(Slot::Occupied(handle)) => Ok(handle),
            _ => Err(Error::InvalidIndex(index)),
        }
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> Result<&mut NodeHandle> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(handle)) => Ok(handle),
            _ => Err(Error::InvalidIndex(index)),
        }
    }

    pub fn contains(&self, index: NodeIndex) -> bool {
        self.get(index).is_ok()
    }

    /// Diagnostics for the node at `index`.
    pub fn info(&self, index: NodeIndex) -> Result<NodeInfo> {
        let handle = self.get(index)?;
        Ok(NodeInfo {
            index,
            type_name: handle.type_name().to_string(),
            graph_id: handle.node().graph_id(),
            fields: handle.node().field_names(),
        })
    }

    /// Construct a node of `type_name` and register it.
    ///
    /// Init fields the engine's constructor did not consume are written
    /// through [`set_field`]. If one of those writes fails the node stays
    /// registered and `ConstructionFailed` names its index, so the caller
    /// can destroy it.
    pub fn create(
        &mut self,
        engine: &mut dyn Engine,
        type_name: &str,
        init: Option<&NodeParams>,
    ) -> Result<NodeIndex> {
        if !engine.has_node_type(type_name) {
            return Err(Error::UnknownNodeType(type_name.to_string()));
        }

        let built = engine
            .create_node(type_name, init)
            .map_err(|e| match e {
                EngineError::UnknownNodeType(name) => Error::UnknownNodeType(name),
                other => Error::ConstructionFailed(format!("{type_name}: {other}")),
            })?;

        let index = self.allocate(NodeHandle::new(built.node));

        if let (false, Some(init)) = (built.init_applied, init) {
            let now = engine.current_time();
            let handle = self.get_mut(index)?;
            for (field, value) in init {
                set_field(handle.node_mut(), field, value.clone(), now).map_err(|e| {
                    Error::ConstructionFailed(format!(
                        "{type_name} at index {index}: field '{field}': {e}"
                    ))
                })?;
            }
        }

        tracing::debug!(index, node_type = type_name, "created node");
        Ok(index)
    }

    /// Stop, disconnect and release the node at `index`.
    ///
    /// The destination slot cannot be destroyed.
    pub fn destroy(&mut self, index: NodeIndex) -> Result<()> {
        if index == Self::DESTINATION {
            return Err(Error::InvalidIndex(index));
        }
        self.get(index)?;

        let slot = core::mem::replace(&mut self.slots[index], Slot::Empty);
        if let Slot::Occupied(handle) = slot {
            tracing::debug!(index, node_type = handle.type_name(), "destroying node");
            handle.release();
        }
        Ok(())
    }

    /// Route the output of `from` into `to`.
    pub fn connect(&self, from: NodeIndex, to: NodeIndex) -> Result<()> {
        let source = self.get(from)?.node();
        let destination = self.get(to)?.node();
        source.connect(destination).map_err(|e| Error::Connection {
            from: source.graph_id(),
            to: destination.graph_id(),
            reason: e.to_string(),
        })
    }

    /// Start the source node at `index`.
    pub fn start(&mut self, index: NodeIndex) -> Result<()> {
        let node = self.get_mut(index)?.node_mut();
        node.start().map_err(|e| match e {
            EngineError::Unsupported(capability) => Error::Unsupported {
                node_type: node.type_name().to_string(),
                capability,
            },
            other => other.into_field_error("start"),
        })
    }

    /// Sever every link of the node at `index`, keeping it registered.
    pub fn disconnect(&self, index: NodeIndex) -> Result<()> {
        self.get(index)?.node().disconnect();
        Ok(())
    }

    /// Number of slots, occupied or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots, including the destination.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Occupied(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        // Slot 0 is always occupied
        false
    }

    /// Occupied indices in ascending order.
    pub fn indices(&self) -> Vec<NodeIndex> {
        self.iter().map(|(i, _)| i).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &NodeHandle)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| match s {
            Slot::Occupied(handle) => Some((i, handle)),
            Slot::Empty => None,
        })
    }

    /// Destroy every node except the destination. Returns how many were released.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        for index in 1..self.slots.len() {
            if self.destroy(index).is_ok() {
                released += 1;
            }
        }
        self.slots.truncate(1);
        released
    }

    fn free_slot(&self) -> Option<NodeIndex> {
        self.slots
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, s)| matches!(s, Slot::Empty))
            .map(|(i, _)| i)
    }

    fn allocate(&mut self, handle: NodeHandle) -> NodeIndex {
        match self.free_slot() {
            Some(index) => {
                tracing::trace!(index, "reusing free slot");
                self.slots[index] = Slot::Occupied(handle);
                index
            }
            None => {
                self.slots.push(Slot::Occupied(handle));
                self.slots.len() - 1
            }
        }
    }
}
