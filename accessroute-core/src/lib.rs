//! Barrier-aware routing over a city transport and pedestrian network.
//!
//! The graph is loaded once from a node file and an edge file
//! ([`load_graph`]) and is read-only afterwards. Queries take a
//! [`CostProfile`] that turns travel time plus accessibility barriers
//! into a single scalar cost:
//!
//! - [`shortest_path`]: Dijkstra with an indexed binary heap
//! - [`k_shortest_paths`]: Yen's loopless alternatives
//! - [`analyze_edges`]: ranks barrier fixes by network-wide benefit

pub mod analysis;
pub mod cost;
pub mod error;
pub mod index;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use analysis::{EdgeImprovement, analyze_edges};
pub use cost::{BarrierKind, CostProfile};
pub use error::Error;
pub use index::IdIndex;
pub use loading::{GraphConfig, LoadReport, load, load_graph};
pub use model::{Edge, GraphBuilder, GraphStats, GraphStore, Node, TransportMode};
pub use routing::{
    Exclusions, Route, RouteDetails, k_shortest_paths, shortest_path, shortest_path_with,
};

/// Position of a node in the graph's dense node array
pub type NodeIndex = usize;
/// Travel time in minutes
pub type Minutes = f64;
