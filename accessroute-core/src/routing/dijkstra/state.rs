use crate::{NodeIndex, routing::Route};

/// Distances and arrival edges of one search. `arrival[v]` holds the
/// predecessor node and the slot of the edge in its adjacency list.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub(crate) source: NodeIndex,
    pub(crate) distances: Vec<f64>,
    pub(crate) arrival: Vec<Option<(NodeIndex, usize)>>,
}

impl SearchState {
    pub(crate) fn new(node_count: usize, source: NodeIndex) -> Self {
        let mut distances = vec![f64::INFINITY; node_count];
        distances[source] = 0.0;
        Self {
            source,
            distances,
            arrival: vec![None; node_count],
        }
    }

    pub(crate) fn is_reached(&self, node: NodeIndex) -> bool {
        self.distances[node].is_finite()
    }

    /// Walk arrival edges back from `target` and reverse
    pub(crate) fn path_to(&self, target: NodeIndex) -> Route {
        if !self.is_reached(target) {
            return Route::empty();
        }
        let mut nodes = vec![target];
        let mut current = target;
        while let Some((previous, _)) = self.arrival[current] {
            nodes.push(previous);
            current = previous;
        }
        nodes.reverse();
        Route::new(nodes, self.distances[target])
    }

    /// Calls `visit(from, to)` for every hop of the tree path to `target`,
    /// from the target backwards
    pub(crate) fn for_each_hop_to(&self, target: NodeIndex, mut visit: impl FnMut(NodeIndex, NodeIndex)) {
        let mut current = target;
        while let Some((previous, _)) = self.arrival[current] {
            visit(previous, current);
            current = previous;
        }
    }
}
