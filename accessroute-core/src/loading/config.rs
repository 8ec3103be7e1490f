use std::path::PathBuf;

use serde::Deserialize;

use crate::Error;

/// Input files for the routing graph
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub nodes_path: PathBuf,
    pub edges_path: PathBuf,
    /// Initial identifier index capacity; twice the node count if unset
    #[serde(default)]
    pub index_capacity: Option<usize>,
}

impl GraphConfig {
    pub fn new(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            edges_path: edges_path.into(),
            index_capacity: None,
        }
    }

    /// Both input files must exist before any parsing starts
    pub(crate) fn validate(&self) -> Result<(), Error> {
        for path in [&self.nodes_path, &self.edges_path] {
            if !path.is_file() {
                return Err(Error::GraphLoad {
                    path: path.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "input file not found",
                    ),
                });
            }
        }
        Ok(())
    }
}
