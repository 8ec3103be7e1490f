//! Human-facing breakdown of a route: per-hop segments, steps grouped
//! by mode, transfers and critical barriers.

mod to_geojson;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    Error, GraphStore, Minutes, NodeIndex,
    cost::{BarrierKind, CostProfile},
    model::TransportMode,
    routing::Route,
};

/// One hop of a route, using the cheapest edge under the query profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub from_id: String,
    pub to_id: String,
    pub time_min: Minutes,
    pub mode: TransportMode,
    pub barriers: Vec<BarrierKind>,
}

/// Consecutive segments travelled with the same mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    pub mode: TransportMode,
    pub from_id: String,
    pub to_id: String,
    pub time_min: Minutes,
    /// Nodes visited in this step, both ends included
    pub nodes: Vec<NodeIndex>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RouteDetails {
    /// Node ids along the route
    pub path: Vec<String>,
    pub nodes: Vec<NodeIndex>,
    pub cost: f64,
    /// Raw travel time without barrier weights
    pub total_time_min: Minutes,
    /// Boardings after the first transit step
    pub transfers: usize,
    /// `kind@from->to` for every barrier the profile treats as critical
    pub critical_barriers: Vec<String>,
    pub segments: Vec<RouteSegment>,
    pub steps: Vec<RouteStep>,
    /// Distinct modes in order of first use
    pub modes: Vec<TransportMode>,
}

impl RouteDetails {
    /// Describe `route` on `graph`. An empty route gives empty details.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeIndex`] for unknown nodes and
    /// [`Error::InvalidData`] if a hop has no edge in the graph
    pub fn build(graph: &GraphStore, route: &Route, profile: &CostProfile) -> Result<Self, Error> {
        if route.is_empty() {
            return Ok(Self::default());
        }

        let path = route
            .nodes
            .iter()
            .map(|&node| {
                graph
                    .node_id(node)
                    .map(str::to_string)
                    .ok_or(Error::InvalidNodeIndex(node))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let segments = route
            .hops()
            .enumerate()
            .map(|(hop, (from, to))| {
                let edge = graph.edge_between(from, to, profile).ok_or_else(|| {
                    Error::InvalidData(format!("no edge {} -> {}", path[hop], path[hop + 1]))
                })?;
                Ok(RouteSegment {
                    from,
                    to,
                    from_id: path[hop].clone(),
                    to_id: path[hop + 1].clone(),
                    time_min: edge.time_min,
                    mode: edge.mode,
                    barriers: edge.barriers().collect(),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let steps = group_steps(&segments);
        let transfers = steps
            .iter()
            .filter(|step| step.mode.is_transit())
            .count()
            .saturating_sub(1);

        let critical_barriers = segments
            .iter()
            .flat_map(|segment| {
                segment
                    .barriers
                    .iter()
                    .filter(|&&kind| profile.is_critical(kind))
                    .map(move |kind| format!("{kind}@{}->{}", segment.from_id, segment.to_id))
            })
            .collect();

        Ok(Self {
            path,
            nodes: route.nodes.clone(),
            cost: route.cost,
            total_time_min: segments.iter().map(|s| s.time_min).sum(),
            transfers,
            critical_barriers,
            modes: segments.iter().map(|s| s.mode).unique().collect(),
            segments,
            steps,
        })
    }
}

fn group_steps(segments: &[RouteSegment]) -> Vec<RouteStep> {
    let chunks = segments.iter().chunk_by(|segment| segment.mode);
    let steps = chunks
        .into_iter()
        .filter_map(|(mode, group)| {
            let group: Vec<&RouteSegment> = group.collect();
            let first = group.first()?;
            let last = group.last()?;
            let mut nodes = vec![first.from];
            nodes.extend(group.iter().map(|s| s.to));
            Some(RouteStep {
                mode,
                from_id: first.from_id.clone(),
                to_id: last.to_id.clone(),
                time_min: group.iter().map(|s| s.time_min).sum(),
                nodes,
            })
        })
        .collect();
    steps
}
