use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;

use super::config::GraphConfig;
use super::parser::{open_edge_reader, open_node_reader, parse_edge_record, parse_node_record};
use super::raw_types::RawNode;
use crate::{Error, GraphBuilder, GraphStore, model::Edge};

/// Only the first few duplicate ids and dropped edges are logged one by one
const MAX_LOGGED_PROBLEMS: usize = 5;

/// What happened while building the graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub nodes_read: usize,
    pub nodes_indexed: usize,
    pub duplicate_ids: usize,
    pub malformed_node_rows: usize,
    pub edges_loaded: usize,
    pub malformed_edge_rows: usize,
    /// Edges dropped because an endpoint id is not in the graph
    pub edges_skipped: usize,
    pub edges_skipped_unknown_from: usize,
    pub edges_skipped_unknown_to: usize,
    pub index_capacity: usize,
    pub index_rehashes: usize,
}

/// Load the graph from a node file and an edge file
///
/// # Errors
///
/// Returns [`Error::GraphLoad`] if either file cannot be opened and
/// [`Error::CsvError`] if a header row cannot be read; no graph is built
/// in either case
pub fn load(
    nodes_path: impl AsRef<Path>,
    edges_path: impl AsRef<Path>,
) -> Result<(GraphStore, LoadReport), Error> {
    load_graph(&GraphConfig::new(
        nodes_path.as_ref(),
        edges_path.as_ref(),
    ))
}

/// Load the graph described by `config`
///
/// # Errors
///
/// As [`load`]
pub fn load_graph(config: &GraphConfig) -> Result<(GraphStore, LoadReport), Error> {
    config.validate()?;

    // Both inputs are opened before anything is parsed
    let mut node_reader = open_node_reader(&config.nodes_path)?;
    let mut edge_reader = open_edge_reader(&config.edges_path)?;

    info!("Reading nodes: {}", config.nodes_path.display());
    let mut report = LoadReport::default();
    let raw_nodes = read_nodes(&mut node_reader, &mut report);

    let capacity = config
        .index_capacity
        .unwrap_or(raw_nodes.len() * 2)
        .max(1);
    let mut builder = GraphBuilder::with_index_capacity(capacity);
    add_nodes(&mut builder, raw_nodes, &mut report);

    info!("Reading edges: {}", config.edges_path.display());
    add_edges(&mut builder, &mut edge_reader, &mut report)?;

    report.index_capacity = builder.index_capacity();
    report.index_rehashes = builder.index_rehashes();
    let graph = builder.build();

    info!(
        "Graph loaded: {} nodes, {} edges ({} edges skipped, {} duplicate ids)",
        report.nodes_indexed,
        report.edges_loaded,
        report.edges_skipped,
        report.duplicate_ids
    );
    if report.malformed_node_rows > 0 || report.malformed_edge_rows > 0 {
        warn!(
            "Skipped {} malformed node rows and {} malformed edge rows",
            report.malformed_node_rows, report.malformed_edge_rows
        );
    }

    Ok((graph, report))
}

fn read_nodes<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    report: &mut LoadReport,
) -> Vec<RawNode> {
    let mut nodes = Vec::new();
    for result in reader.records() {
        report.nodes_read += 1;
        match result.ok().as_ref().and_then(parse_node_record) {
            Some(node) => nodes.push(node),
            None => report.malformed_node_rows += 1,
        }
    }
    nodes
}

fn add_nodes(builder: &mut GraphBuilder, raw_nodes: Vec<RawNode>, report: &mut LoadReport) {
    for node in raw_nodes {
        if builder.add_node(&node.id, node.lat, node.lon).is_some() {
            report.nodes_indexed += 1;
        } else {
            report.duplicate_ids += 1;
            if report.duplicate_ids <= MAX_LOGGED_PROBLEMS {
                warn!(
                    "Duplicate node id '{}' ignored, keeping position {:?}",
                    node.id,
                    builder.index_of(&node.id)
                );
            }
        }
    }
    debug!(
        "Indexed {} nodes, index capacity {} after {} rehashes",
        report.nodes_indexed,
        builder.index_capacity(),
        builder.index_rehashes()
    );
}

fn add_edges<R: std::io::Read>(
    builder: &mut GraphBuilder,
    reader: &mut csv::Reader<R>,
    report: &mut LoadReport,
) -> Result<(), Error> {
    for result in reader.records() {
        let Some(raw) = result.ok().as_ref().and_then(parse_edge_record) else {
            report.malformed_edge_rows += 1;
            continue;
        };

        let from = builder.index_of(&raw.from);
        let to = builder.index_of(&raw.to);
        let (Some(from), Some(to)) = (from, to) else {
            if from.is_none() {
                report.edges_skipped_unknown_from += 1;
            }
            if to.is_none() {
                report.edges_skipped_unknown_to += 1;
            }
            report.edges_skipped += 1;
            if report.edges_skipped <= MAX_LOGGED_PROBLEMS {
                warn!(
                    "Edge '{}' -> '{}' dropped: unknown endpoint",
                    raw.from, raw.to
                );
            }
            continue;
        };

        builder.add_edge(
            from,
            Edge {
                target: to,
                time_min: raw.time_minutes,
                transfer: raw.transfer,
                stairs: raw.stairs,
                bad_sidewalk: raw.bad_sidewalk,
                flood_risk: raw.flood_risk,
                mode: raw.mode,
            },
        )?;
        report.edges_loaded += 1;
    }
    Ok(())
}
