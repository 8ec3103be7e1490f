//! Graph components - nodes, edges and transport modes

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{Minutes, NodeIndex, cost::BarrierKind};

/// Means of travel along an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Walk,
    Bus,
    Metro,
    Train,
}

impl TransportMode {
    /// Parse a mode token. Legacy data tokens (`pe`, `onibus`, `trem`)
    /// are accepted; anything unrecognized is walking.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "bus" | "onibus" => TransportMode::Bus,
            "metro" => TransportMode::Metro,
            "train" | "trem" => TransportMode::Train,
            _ => TransportMode::Walk,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Walk => "walk",
            TransportMode::Bus => "bus",
            TransportMode::Metro => "metro",
            TransportMode::Train => "train",
        }
    }

    pub fn is_transit(self) -> bool {
        self != TransportMode::Walk
    }
}

/// Directed edge, owned by its source node
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeIndex,
    /// Travel time in minutes, never negative
    pub time_min: Minutes,
    pub transfer: bool,
    pub stairs: bool,
    pub bad_sidewalk: bool,
    pub flood_risk: bool,
    pub mode: TransportMode,
}

impl Edge {
    /// Barrier-free edge
    pub fn new(target: NodeIndex, time_min: Minutes, mode: TransportMode) -> Self {
        Self {
            target,
            time_min,
            transfer: false,
            stairs: false,
            bad_sidewalk: false,
            flood_risk: false,
            mode,
        }
    }

    #[must_use]
    pub fn with_barrier(mut self, kind: BarrierKind) -> Self {
        *self.flag_mut(kind) = true;
        self
    }

    pub fn has(&self, kind: BarrierKind) -> bool {
        match kind {
            BarrierKind::Transfer => self.transfer,
            BarrierKind::Stairs => self.stairs,
            BarrierKind::BadSidewalk => self.bad_sidewalk,
            BarrierKind::FloodRisk => self.flood_risk,
        }
    }

    /// Active barriers in [`BarrierKind::ALL`] order
    pub fn barriers(&self) -> impl Iterator<Item = BarrierKind> + '_ {
        BarrierKind::ALL.into_iter().filter(|&kind| self.has(kind))
    }

    pub fn has_barriers(&self) -> bool {
        self.barriers().next().is_some()
    }

    fn flag_mut(&mut self, kind: BarrierKind) -> &mut bool {
        match kind {
            BarrierKind::Transfer => &mut self.transfer,
            BarrierKind::Stairs => &mut self.stairs,
            BarrierKind::BadSidewalk => &mut self.bad_sidewalk,
            BarrierKind::FloodRisk => &mut self.flood_risk,
        }
    }
}

/// Graph node
#[derive(Debug, Clone)]
pub struct Node {
    /// Normalized identifier
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub(crate) edges: Vec<Edge>,
}

impl Node {
    pub(crate) fn new(id: String, lat: f64, lon: f64) -> Self {
        Self {
            id,
            lat,
            lon,
            edges: Vec::new(),
        }
    }

    /// Outgoing edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Node location as a `geo` point (x = longitude, y = latitude)
    pub fn geometry(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}
