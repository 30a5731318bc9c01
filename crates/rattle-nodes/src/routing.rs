//! Shared connection table for the software engine.

use hashbrown::{HashMap, HashSet};
use parking_lot::Mutex;
use rattle_core::{EngineError, GraphNodeId};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Routes {
    /// Input count of every live node.
    inputs: HashMap<GraphNodeId, usize>,
    edges: HashSet<(GraphNodeId, GraphNodeId)>,
}

/// Directed edges between live nodes.
///
/// Every node holds a clone, so a node can sever its own links without
/// going through the engine.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    routes: Arc<Mutex<Routes>>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` routable with `inputs` input ports.
    pub fn add_node(&self, id: GraphNodeId, inputs: usize) {
        self.routes.lock().inputs.insert(id, inputs);
    }

    /// Forget `id` and every edge touching it.
    pub fn remove_node(&self, id: GraphNodeId) {
        let mut routes = self.routes.lock();
        routes.inputs.remove(&id);
        routes.edges.retain(|&(from, to)| from != id && to != id);
    }

    pub fn connect(&self, from: GraphNodeId, to: GraphNodeId) -> Result<(), EngineError> {
        if from == to {
            return Err(EngineError::Connection("a node cannot feed itself".into()));
        }

        let mut routes = self.routes.lock();
        if !routes.inputs.contains_key(&from) {
            return Err(EngineError::Connection(format!("node {} is gone", from.0)));
        }
        match routes.inputs.get(&to).copied() {
            None => Err(EngineError::Connection(format!("node {} is gone", to.0))),
            Some(0) => Err(EngineError::Connection(format!("node {} has no inputs", to.0))),
            Some(_) => {
                routes.edges.insert((from, to));
                Ok(())
            }
        }
    }

    /// Drop every incoming and outgoing edge of `id`. Returns how many went.
    pub fn disconnect_all(&self, id: GraphNodeId) -> usize {
        let mut routes = self.routes.lock();
        let before = routes.edges.len();
        routes.edges.retain(|&(from, to)| from != id && to != id);
        before - routes.edges.len()
    }

    pub fn is_connected(&self, from: GraphNodeId, to: GraphNodeId) -> bool {
        self.routes.lock().edges.contains(&(from, to))
    }

    /// Nodes `id` feeds into, sorted.
    pub fn outputs_of(&self, id: GraphNodeId) -> Vec<GraphNodeId> {
        let routes = self.routes.lock();
        let mut out: Vec<_> = routes
            .edges
            .iter()
            .filter(|(from, _)| *from == id)
            .map(|&(_, to)| to)
            .collect();
        out.sort();
        out
    }

    /// Nodes feeding into `id`, sorted.
    pub fn inputs_of(&self, id: GraphNodeId) -> Vec<GraphNodeId> {
        let routes = self.routes.lock();
        let mut inputs: Vec<_> = routes
            .edges
            .iter()
            .filter(|(_, to)| *to == id)
            .map(|&(from, _)| from)
            .collect();
        inputs.sort();
        inputs
    }

    pub fn edge_count(&self) -> usize {
        self.routes.lock().edges.len()
    }

    pub fn node_count(&self) -> usize {
        self.routes.lock().inputs.len()
    }
}
