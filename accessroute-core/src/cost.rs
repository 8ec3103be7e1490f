//! Edge cost model: travel time plus weighted accessibility barriers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Minutes, model::Edge};

/// Savings at or below this many minutes are not worth reporting
pub const MIN_SIGNIFICANT_SAVINGS: Minutes = 0.1;

/// Accessibility issue an edge may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierKind {
    Transfer,
    Stairs,
    BadSidewalk,
    FloodRisk,
}

impl BarrierKind {
    pub const ALL: [BarrierKind; 4] = [
        BarrierKind::Transfer,
        BarrierKind::Stairs,
        BarrierKind::BadSidewalk,
        BarrierKind::FloodRisk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BarrierKind::Transfer => "transfer",
            BarrierKind::Stairs => "stairs",
            BarrierKind::BadSidewalk => "bad_sidewalk",
            BarrierKind::FloodRisk => "flood_risk",
        }
    }
}

impl fmt::Display for BarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-query weights, in minutes, added for each barrier an edge carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostProfile {
    /// Transfer weight
    pub alpha: f64,
    /// Stairs weight
    pub beta: f64,
    /// Bad sidewalk weight
    pub gamma: f64,
    /// Flood risk weight, only applied in rain mode
    pub delta: f64,
    #[serde(default)]
    pub rain: bool,
    /// Treat stairs and bad sidewalks as blocking barriers when
    /// describing routes
    #[serde(default)]
    pub reduced_mobility: bool,
}

impl CostProfile {
    pub const STANDARD: &'static str = "standard";
    pub const REDUCED_MOBILITY: &'static str = "reduced_mobility";

    pub fn new(alpha: f64, beta: f64, gamma: f64, delta: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            delta,
            rain: false,
            reduced_mobility: false,
        }
    }

    #[must_use]
    pub fn with_rain(mut self, rain: bool) -> Self {
        self.rain = rain;
        self
    }

    pub fn standard() -> Self {
        Self::new(6.0, 2.0, 1.0, 4.0)
    }

    pub fn reduced_mobility() -> Self {
        Self {
            reduced_mobility: true,
            ..Self::new(6.0, 12.0, 6.0, 4.0)
        }
    }

    /// Built-in profile by name
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProfile`] for names other than
    /// `standard` and `reduced_mobility`
    pub fn preset(name: &str, rain: bool) -> Result<Self, Error> {
        let profile = match name {
            Self::STANDARD => Self::standard(),
            Self::REDUCED_MOBILITY => Self::reduced_mobility(),
            other => return Err(Error::UnknownProfile(other.to_string())),
        };
        Ok(profile.with_rain(rain))
    }

    /// Weight actually charged for `kind` under this profile
    pub fn weight(&self, kind: BarrierKind) -> f64 {
        match kind {
            BarrierKind::Transfer => self.alpha,
            BarrierKind::Stairs => self.beta,
            BarrierKind::BadSidewalk => self.gamma,
            BarrierKind::FloodRisk if self.rain => self.delta,
            BarrierKind::FloodRisk => 0.0,
        }
    }

    /// Whether a barrier of this kind should be reported as critical on a route
    pub fn is_critical(&self, kind: BarrierKind) -> bool {
        match kind {
            BarrierKind::FloodRisk => true,
            BarrierKind::Stairs | BarrierKind::BadSidewalk => self.reduced_mobility,
            BarrierKind::Transfer => false,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if any weight is negative or not finite
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("delta", self.delta),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "cost weight {name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for CostProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// Scalar cost of traversing `edge` under `profile`
pub fn edge_cost(edge: &Edge, profile: &CostProfile) -> f64 {
    edge.barriers()
        .fold(edge.time_min, |cost, kind| cost + profile.weight(kind))
}

/// Cost of `edge` if the `resolved` barrier were fixed, others unchanged
pub fn cost_if_resolved(edge: &Edge, profile: &CostProfile, resolved: BarrierKind) -> f64 {
    edge.barriers()
        .filter(|&kind| kind != resolved)
        .fold(edge.time_min, |cost, kind| cost + profile.weight(kind))
}

/// Minutes saved on `edge` by fixing `kind`; zero if the edge lacks it
pub fn savings(edge: &Edge, profile: &CostProfile, kind: BarrierKind) -> f64 {
    if edge.has(kind) {
        edge_cost(edge, profile) - cost_if_resolved(edge, profile, kind)
    } else {
        0.0
    }
}
