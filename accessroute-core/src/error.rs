use std::path::PathBuf;

use thiserror::Error;

use crate::NodeIndex;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open graph input '{}': {source}", path.display())]
    GraphLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid node index {0}")]
    InvalidNodeIndex(NodeIndex),
    #[error("Unknown node id '{0}'")]
    UnknownNode(String),
    #[error("Number of requested routes must be at least 1")]
    InvalidK,
    #[error("Unknown cost profile '{0}'")]
    UnknownProfile(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
