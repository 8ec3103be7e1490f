//! Single-source shortest path search (Dijkstra with an indexed heap)

mod heap;
mod state;

pub(crate) use state::SearchState;

use heap::IndexedMinHeap;
use log::trace;

use crate::{
    Error, GraphStore, NodeIndex,
    cost::{CostProfile, edge_cost},
    routing::{Exclusions, Route},
};

/// Cheapest route from `source` to `target` under `profile`
///
/// An unreachable target yields an empty [`Route`], not an error.
///
/// # Errors
///
/// Returns [`Error::InvalidNodeIndex`] if either index is out of range and
/// [`Error::InvalidData`] if a profile weight is negative or not finite
pub fn shortest_path(
    graph: &GraphStore,
    source: NodeIndex,
    target: NodeIndex,
    profile: &CostProfile,
) -> Result<Route, Error> {
    shortest_path_with(graph, source, target, profile, &Exclusions::default())
}

/// Like [`shortest_path`], ignoring the edges and nodes in `exclusions`
///
/// # Errors
///
/// As [`shortest_path`]
pub fn shortest_path_with(
    graph: &GraphStore,
    source: NodeIndex,
    target: NodeIndex,
    profile: &CostProfile,
    exclusions: &Exclusions,
) -> Result<Route, Error> {
    graph.validate_node(source)?;
    graph.validate_node(target)?;
    profile.validate()?;

    let state = search(graph, source, Some(target), profile, exclusions);
    let route = state.path_to(target);
    trace!(
        "Shortest path {source} -> {target}: {} nodes, cost {}",
        route.len(),
        route.cost
    );
    Ok(route)
}

/// Recompute the cost of a node sequence, taking the cheapest edge for
/// each hop. `None` if the sequence is empty or a hop has no edge.
pub fn route_cost(graph: &GraphStore, nodes: &[NodeIndex], profile: &CostProfile) -> Option<f64> {
    if nodes.is_empty() {
        return None;
    }
    nodes.windows(2).try_fold(0.0, |total, hop| {
        graph
            .edge_between(hop[0], hop[1], profile)
            .map(|edge| total + edge_cost(edge, profile))
    })
}

/// Core search. Stops as soon as `target` is settled; with no target the
/// full shortest-path tree from `source` is built. Callers validate
/// `source`.
pub(crate) fn search(
    graph: &GraphStore,
    source: NodeIndex,
    target: Option<NodeIndex>,
    profile: &CostProfile,
    exclusions: &Exclusions,
) -> SearchState {
    let node_count = graph.node_count();
    let mut state = SearchState::new(node_count, source);
    let mut heap = IndexedMinHeap::new(node_count);
    let filtered = !exclusions.is_empty();

    heap.push_or_decrease(source, 0.0);

    while let Some((node, cost)) = heap.pop() {
        if Some(node) == target {
            break;
        }

        for (slot, edge) in graph.edges(node).iter().enumerate() {
            let next = edge.target;
            if filtered
                && (exclusions.is_node_excluded(next) || exclusions.is_edge_excluded(node, next))
            {
                continue;
            }

            let next_cost = cost + edge_cost(edge, profile);
            if next_cost < state.distances[next] {
                state.distances[next] = next_cost;
                state.arrival[next] = Some((node, slot));
                heap.push_or_decrease(next, next_cost);
            }
        }
    }

    state
}
