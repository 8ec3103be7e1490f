//! This module is responsible for reading the node and edge files and
//! building the routing graph.

mod builder;
mod config;
mod de;
mod parser;
mod raw_types;

pub use builder::{LoadReport, load, load_graph};
pub use config::GraphConfig;
