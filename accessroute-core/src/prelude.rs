pub use crate::{Minutes, NodeIndex};

// Graph and loading
pub use crate::loading::{GraphConfig, LoadReport, load, load_graph};
pub use crate::model::{Edge, GraphBuilder, GraphStats, GraphStore, Node, TransportMode};

// Costs and queries
pub use crate::analysis::{EdgeImprovement, analyze_edges};
pub use crate::cost::{BarrierKind, CostProfile};
pub use crate::routing::{
    Exclusions, Route, RouteDetails, k_shortest_paths, route_cost, shortest_path,
    shortest_path_with,
};

pub use crate::Error;
