//! Ranking of barrier fixes by their network-wide benefit
//!
//! Every (edge, barrier) pair whose removal would save a meaningful
//! amount of cost is scored as `savings * affected routes`, where the
//! affected routes are the all-pairs shortest paths that traverse the
//! edge. Counting is O(V) searches and dominates the runtime on large
//! graphs.

use hashbrown::{HashMap, HashSet};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    Error, GraphStore, NodeIndex,
    cost::{BarrierKind, CostProfile, MIN_SIGNIFICANT_SAVINGS, edge_cost, savings},
    routing::{Exclusions, dijkstra::search},
};

/// Estimated benefit of fixing one barrier on one edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeImprovement {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub issue: BarrierKind,
    pub current_cost: f64,
    pub potential_savings: f64,
    /// Ordered node pairs whose shortest path uses this edge
    pub affected_routes: usize,
    pub impact_score: f64,
    /// 1-based rank after sorting by impact
    pub priority: usize,
}

type EdgeKey = (NodeIndex, NodeIndex);

/// Rank improvable edges by impact, best first, keeping at most
/// `max_results`
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if a profile weight is negative or not
/// finite
pub fn analyze_edges(
    graph: &GraphStore,
    profile: &CostProfile,
    max_results: usize,
) -> Result<Vec<EdgeImprovement>, Error> {
    profile.validate()?;
    if max_results == 0 {
        return Ok(Vec::new());
    }

    let mut improvements = find_improvable_edges(graph, profile);
    if improvements.is_empty() {
        debug!("No improvable edges under the given profile");
        return Ok(improvements);
    }

    let watched: HashSet<EdgeKey> = improvements.iter().map(|imp| (imp.from, imp.to)).collect();
    info!(
        "Counting shortest paths over {} improvable edges ({} nodes)",
        watched.len(),
        graph.node_count()
    );
    let usage = count_edge_usage(graph, profile, &watched);

    for improvement in &mut improvements {
        let count = usage
            .get(&(improvement.from, improvement.to))
            .copied()
            .unwrap_or(0);
        improvement.affected_routes = count;
        improvement.impact_score = improvement.potential_savings * count as f64;
    }

    improvements.sort_by(|a, b| {
        b.impact_score
            .total_cmp(&a.impact_score)
            .then(a.from.cmp(&b.from))
            .then(a.to.cmp(&b.to))
            .then(a.issue.cmp(&b.issue))
    });
    improvements.truncate(max_results);
    for (rank, improvement) in improvements.iter_mut().enumerate() {
        improvement.priority = rank + 1;
    }

    Ok(improvements)
}

/// One record per (edge, active barrier) with savings above the threshold
fn find_improvable_edges(graph: &GraphStore, profile: &CostProfile) -> Vec<EdgeImprovement> {
    graph
        .nodes()
        .iter()
        .enumerate()
        .flat_map(|(from, node)| node.edges().iter().map(move |edge| (from, edge)))
        .flat_map(|(from, edge)| {
            let current_cost = edge_cost(edge, profile);
            edge.barriers().filter_map(move |issue| {
                let potential_savings = savings(edge, profile, issue);
                (potential_savings > MIN_SIGNIFICANT_SAVINGS).then_some(EdgeImprovement {
                    from,
                    to: edge.target,
                    issue,
                    current_cost,
                    potential_savings,
                    affected_routes: 0,
                    impact_score: 0.0,
                    priority: 0,
                })
            })
        })
        .collect()
}

/// For every ordered pair (s, t), s != t, follow the shortest path s -> t
/// and count how often each watched edge is traversed. One search tree
/// per source gives the same paths as a targeted search per pair.
fn count_edge_usage(
    graph: &GraphStore,
    profile: &CostProfile,
    watched: &HashSet<EdgeKey>,
) -> HashMap<EdgeKey, usize> {
    let no_exclusions = Exclusions::new();

    (0..graph.node_count())
        .into_par_iter()
        .map(|source| {
            let tree = search(graph, source, None, profile, &no_exclusions);
            let mut local: HashMap<EdgeKey, usize> = HashMap::new();
            for target in 0..graph.node_count() {
                if target == tree.source || !tree.is_reached(target) {
                    continue;
                }
                tree.for_each_hop_to(target, |from, to| {
                    if watched.contains(&(from, to)) {
                        *local.entry((from, to)).or_insert(0) += 1;
                    }
                });
            }
            local
        })
        .reduce(HashMap::new, |mut total, local| {
            for (key, count) in local {
                *total.entry(key).or_insert(0) += count;
            }
            total
        })
}
