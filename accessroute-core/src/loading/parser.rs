use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use super::raw_types::{RawEdge, RawNode};
use crate::Error;

/// Minimum fields in a node row: `id,name,lat,lon,type`
const NODE_FIELDS: usize = 5;

/// Open the node file. Quoting is off: names are free text and a stray
/// `"` must not swallow the rows after it.
///
/// # Errors
///
/// [`Error::GraphLoad`] if the file cannot be opened, [`Error::CsvError`]
/// if its header row cannot be read
pub fn open_node_reader(path: &Path) -> Result<csv::Reader<File>, Error> {
    open_reader(path, false)
}

/// Open the edge file, with standard CSV quoting
///
/// # Errors
///
/// As [`open_node_reader`]
pub fn open_edge_reader(path: &Path) -> Result<csv::Reader<File>, Error> {
    open_reader(path, true)
}

/// Open a headed CSV file whose rows may have a varying number of
/// fields, and read the header row
fn open_reader(path: &Path, quoting: bool) -> Result<csv::Reader<File>, Error> {
    let file = File::open(path).map_err(|source| Error::GraphLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(quoting)
        .trim(csv::Trim::All)
        .from_reader(file);
    reader.headers()?;
    Ok(reader)
}

/// Parse a node row anchored from the right. The name may contain
/// unquoted commas, so type, longitude and latitude are taken from the
/// last three fields and the id from the first; whatever lies between
/// is the name, which the graph does not keep.
pub fn parse_node_record(record: &StringRecord) -> Option<RawNode> {
    let len = record.len();
    if len < NODE_FIELDS {
        return None;
    }
    let lon = record.get(len - 2)?.parse::<f64>().ok()?;
    let lat = record.get(len - 3)?.parse::<f64>().ok()?;
    let id = record.get(0)?;
    if id.is_empty() || !lat.is_finite() || !lon.is_finite() {
        return None;
    }

    Some(RawNode {
        id: id.to_string(),
        lat,
        lon,
    })
}

/// Parse an edge row by position. Negative or non-finite travel times
/// are rejected.
pub fn parse_edge_record(record: &StringRecord) -> Option<RawEdge> {
    let edge: RawEdge = record.deserialize(None).ok()?;
    if edge.time_minutes.is_finite() && edge.time_minutes >= 0.0 {
        Some(edge)
    } else {
        None
    }
}
