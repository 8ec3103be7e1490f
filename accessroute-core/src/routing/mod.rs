//! Route search over the graph store

pub mod dijkstra;
mod exclusions;
pub mod itinerary;
mod route;
pub mod yen;

pub use dijkstra::{route_cost, shortest_path, shortest_path_with};
pub use exclusions::Exclusions;
pub use itinerary::{RouteDetails, RouteSegment, RouteStep};
pub use route::Route;
pub use yen::k_shortest_paths;
