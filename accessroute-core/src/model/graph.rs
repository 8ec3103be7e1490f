//! Graph store and its builder

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use serde::Serialize;

use super::{Edge, Node, NodeLocator, TransportMode};
use crate::{
    Error, NodeIndex,
    cost::{BarrierKind, CostProfile, edge_cost},
    index::{IdIndex, InsertOutcome, normalize_id},
};

/// Read-only routing graph: dense node array, per-node adjacency and
/// the identifier index
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<Node>,
    index: IdIndex,
    locator: NodeLocator,
}

impl GraphStore {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, node: NodeIndex) -> Option<&Node> {
        self.nodes.get(node)
    }

    pub fn node_id(&self, node: NodeIndex) -> Option<&str> {
        self.nodes.get(node).map(|n| n.id.as_str())
    }

    /// Outgoing edges of `node`; empty for an unknown index
    pub fn edges(&self, node: NodeIndex) -> &[Edge] {
        self.nodes.get(node).map_or(&[], |n| n.edges.as_slice())
    }

    /// Position of the node with identifier `id`
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.lookup(id)
    }

    pub fn index_capacity(&self) -> usize {
        self.index.capacity()
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeIndex`] if `node` is out of range
    pub fn validate_node(&self, node: NodeIndex) -> Result<(), Error> {
        if node < self.nodes.len() {
            Ok(())
        } else {
            Err(Error::InvalidNodeIndex(node))
        }
    }

    /// Cheapest edge from `from` to `to` under `profile`, if any
    pub fn edge_between(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        profile: &CostProfile,
    ) -> Option<&Edge> {
        self.edges(from)
            .iter()
            .filter(|edge| edge.target == to)
            .min_by(|a, b| edge_cost(a, profile).total_cmp(&edge_cost(b, profile)))
    }

    /// Closest node to a coordinate and its great-circle distance in meters
    pub fn nearest_node(&self, lat: f64, lon: f64) -> Option<(NodeIndex, f64)> {
        self.locator.nearest(&self.nodes, lat, lon)
    }

    pub fn stats(&self) -> GraphStats {
        let mut edges_by_mode = HashMap::new();
        let mut edges_with_barrier = HashMap::new();
        let mut touched = FixedBitSet::with_capacity(self.nodes.len());

        for (source, node) in self.nodes.iter().enumerate() {
            if !node.edges.is_empty() {
                touched.insert(source);
            }
            for edge in &node.edges {
                touched.insert(edge.target);
                *edges_by_mode.entry(edge.mode).or_insert(0) += 1;
                for kind in edge.barriers() {
                    *edges_with_barrier.entry(kind).or_insert(0) += 1;
                }
            }
        }

        GraphStats {
            nodes: self.nodes.len(),
            edges: self.edge_count(),
            edges_by_mode,
            edges_with_barrier,
            isolated_nodes: self.nodes.len() - touched.count_ones(..),
        }
    }

    /// Release the graph: adjacency lists first, then the node array,
    /// then the identifier index
    pub fn teardown(self) {
        let GraphStore {
            mut nodes,
            index,
            locator,
        } = self;
        for node in &mut nodes {
            node.edges = Vec::new();
        }
        drop(nodes);
        drop(locator);
        drop(index);
    }
}

/// Summary counts over a loaded graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub edges_by_mode: HashMap<TransportMode, usize>,
    pub edges_with_barrier: HashMap<BarrierKind, usize>,
    /// Nodes with neither incoming nor outgoing edges
    pub isolated_nodes: usize,
}

/// Incrementally assembles a [`GraphStore`]
#[derive(Debug)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    index: IdIndex,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::with_index_capacity(16)
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::new(),
            index: IdIndex::with_capacity(capacity),
        }
    }

    /// Add a node and return its position, or `None` if a node with the
    /// same normalized id already exists
    pub fn add_node(&mut self, id: &str, lat: f64, lon: f64) -> Option<NodeIndex> {
        let position = self.nodes.len();
        match self.index.insert(id, position) {
            InsertOutcome::Inserted => {
                self.nodes.push(Node::new(normalize_id(id), lat, lon));
                Some(position)
            }
            InsertOutcome::Duplicate { .. } => None,
        }
    }

    /// Append `edge` to the adjacency of `from`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeIndex`] if either endpoint is unknown
    pub fn add_edge(&mut self, from: NodeIndex, edge: Edge) -> Result<(), Error> {
        if edge.target >= self.nodes.len() {
            return Err(Error::InvalidNodeIndex(edge.target));
        }
        self.nodes
            .get_mut(from)
            .ok_or(Error::InvalidNodeIndex(from))?
            .edges
            .push(edge);
        Ok(())
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.lookup(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn index_rehashes(&self) -> usize {
        self.index.rehashes()
    }

    pub fn index_capacity(&self) -> usize {
        self.index.capacity()
    }

    pub fn build(self) -> GraphStore {
        let locator = NodeLocator::new(&self.nodes);
        GraphStore {
            nodes: self.nodes,
            index: self.index,
            locator,
        }
    }
}
