use serde::Serialize;

use crate::NodeIndex;

/// Sequence of node positions with its accumulated cost. An empty
/// sequence means no path was found.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Route {
    pub nodes: Vec<NodeIndex>,
    pub cost: f64,
}

impl Route {
    pub fn new(nodes: Vec<NodeIndex>, cost: f64) -> Self {
        Self { nodes, cost }
    }

    /// The "no path" route
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the route
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn source(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }

    /// Consecutive (from, to) pairs
    pub fn hops(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn uses_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.hops().any(|hop| hop == (from, to))
    }
}
