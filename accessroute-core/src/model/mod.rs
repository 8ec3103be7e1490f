//! Data model for the routing graph
//!
//! Nodes live in a dense array and are addressed by position. Each node
//! owns its outgoing edges as a contiguous vector.

pub mod components;
pub mod graph;
pub mod spatial;

pub use components::{Edge, Node, TransportMode};
pub use graph::{GraphBuilder, GraphStats, GraphStore};
pub use spatial::NodeLocator;
