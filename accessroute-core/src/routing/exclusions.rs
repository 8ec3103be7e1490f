use fixedbitset::FixedBitSet;
use hashbrown::HashSet;

use crate::NodeIndex;

/// Edges and nodes a single search must ignore. The graph itself is
/// never modified; the search consults this set while relaxing.
///
/// Excluding `(from, to)` hides every parallel edge between the two nodes.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    edges: HashSet<(NodeIndex, NodeIndex)>,
    nodes: FixedBitSet,
}

impl Exclusions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.edges.insert((from, to));
    }

    pub fn exclude_node(&mut self, node: NodeIndex) {
        if node >= self.nodes.len() {
            self.nodes.grow(node + 1);
        }
        self.nodes.insert(node);
    }

    pub fn is_edge_excluded(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.edges.contains(&(from, to))
    }

    pub fn is_node_excluded(&self, node: NodeIndex) -> bool {
        self.nodes.contains(node)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.nodes.count_ones(..) == 0
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.nodes.clear();
    }
}
