//! Loopless k-shortest paths (Yen's algorithm)
//!
//! Deviations are computed with a per-call [`Exclusions`] set, so the
//! shared graph is never modified while spur paths are searched.

use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashSet;
use log::{debug, trace};

use super::{
    Exclusions, Route,
    dijkstra::{route_cost, search, shortest_path},
};
use crate::{Error, GraphStore, NodeIndex, cost::CostProfile};

#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    cost: f64,
    nodes: Vec<NodeIndex>,
}

impl Eq for Candidate {}

// Min-heap by cost (reversed for BinaryHeap), node sequence breaks ties
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.nodes.cmp(&self.nodes))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Up to `k` loopless routes from `source` to `target`, cheapest first
///
/// Fewer than `k` routes are returned when the graph has no more
/// distinct loopless paths; none when `target` is unreachable.
///
/// # Errors
///
/// Returns [`Error::InvalidK`] for `k == 0`,
/// [`Error::InvalidNodeIndex`] for out-of-range endpoints and
/// [`Error::InvalidData`] for a profile with invalid weights
pub fn k_shortest_paths(
    graph: &GraphStore,
    source: NodeIndex,
    target: NodeIndex,
    profile: &CostProfile,
    k: usize,
) -> Result<Vec<Route>, Error> {
    if k == 0 {
        return Err(Error::InvalidK);
    }
    profile.validate()?;

    let first = shortest_path(graph, source, target, profile)?;
    if first.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen: HashSet<Vec<NodeIndex>> = HashSet::new();
    seen.insert(first.nodes.clone());
    let mut accepted = vec![first];
    let mut candidates = BinaryHeap::new();
    let mut exclusions = Exclusions::new();

    while accepted.len() < k {
        let previous = accepted[accepted.len() - 1].nodes.clone();

        for spur_idx in 0..previous.len().saturating_sub(1) {
            let spur = previous[spur_idx];
            let root = &previous[..=spur_idx];

            exclusions.clear();
            for route in &accepted {
                if route.nodes.len() > spur_idx + 1 && route.nodes[..=spur_idx] == *root {
                    exclusions.exclude_edge(spur, route.nodes[spur_idx + 1]);
                }
            }
            // Keeps the spur path from looping back through the root
            for &node in &root[..spur_idx] {
                exclusions.exclude_node(node);
            }

            let spur_path = search(graph, spur, Some(target), profile, &exclusions).path_to(target);
            if spur_path.is_empty() {
                continue;
            }

            let mut nodes = root[..spur_idx].to_vec();
            nodes.extend_from_slice(&spur_path.nodes);
            if !seen.insert(nodes.clone()) {
                continue;
            }
            // Root prefix plus spur, accumulated hop by hop as the search does
            let Some(cost) = route_cost(graph, &nodes, profile) else {
                continue;
            };
            trace!("Candidate via spur {spur}: {} nodes, cost {cost}", nodes.len());
            candidates.push(Candidate { cost, nodes });
        }

        let Some(best) = candidates.pop() else {
            break;
        };
        accepted.push(Route::new(best.nodes, best.cost));
    }

    debug!(
        "k-shortest {source} -> {target}: {} of {k} routes, {} candidates left",
        accepted.len(),
        candidates.len()
    );
    Ok(accepted)
}
