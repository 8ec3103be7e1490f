//! End-to-end loading of node and edge files

use std::io::Write;
use std::path::Path;

use accessroute_core::{
    CostProfile, Error, GraphConfig, TransportMode, load, load_graph, shortest_path,
};
use tempfile::TempDir;

const NODES: &str = "\
id,name,lat,lon,type
A,Praça da Sé, Centro,-23.5503,-46.6339,metro
B,Anhangabaú,-23.5454,-46.6388,metro
C,Rua Direita,-23.5480,-46.6360,bus
A,Duplicate of A,-23.0,-46.0,bus
broken,row
D,Bad coordinates,north,-46.60,bus
E,Estação da Luz,-23.5347,-46.6352,trem
";

const EDGES: &str = "\
from,to,time_minutes,transfer,stairs,bad_sidewalk,flood_risk,mode
A,B,3,1,0,0,0,pe
B,C,5,0,1,0,0,onibus
C,E,4,0,0,0,1,trem
B,A,2,0,0,0,0,hovercraft
A,Z,2,0,0,0,0,walk
Y,Z,2,0,0,0,0,walk
B,E,soon,0,0,0,0,walk
E,A,-1,0,0,0,0,walk
";

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn fixture() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let nodes = write_file(dir.path(), "nodes.csv", NODES);
    let edges = write_file(dir.path(), "edges.csv", EDGES);
    (dir, nodes, edges)
}

#[test]
fn report_counts_every_outcome() {
    let (_dir, nodes, edges) = fixture();
    let (graph, report) = load(&nodes, &edges).unwrap();

    assert_eq!(report.nodes_read, 7);
    assert_eq!(report.nodes_indexed, 4);
    assert_eq!(report.duplicate_ids, 1);
    assert_eq!(report.malformed_node_rows, 2);

    assert_eq!(report.edges_loaded, 4);
    assert_eq!(report.edges_skipped, 2);
    assert_eq!(report.edges_skipped_unknown_from, 1);
    assert_eq!(report.edges_skipped_unknown_to, 2);
    assert_eq!(report.malformed_edge_rows, 2);

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn names_with_commas_keep_coordinates() {
    let (_dir, nodes, edges) = fixture();
    let (graph, _) = load(&nodes, &edges).unwrap();

    let a = graph.index_of("A").unwrap();
    let node = graph.node(a).unwrap();
    assert_eq!(node.id, "A");
    assert!((node.lat + 23.5503).abs() < 1e-9);
    assert!((node.lon + 46.6339).abs() < 1e-9);
}

#[test]
fn first_duplicate_wins() {
    let (_dir, nodes, edges) = fixture();
    let (graph, _) = load(&nodes, &edges).unwrap();
    assert_eq!(graph.index_of("A"), Some(0));
    assert!((graph.node(0).unwrap().lat + 23.5503).abs() < 1e-9);
    assert_eq!(graph.index_of("D"), None);
}

#[test]
fn modes_and_flags_are_decoded() {
    let (_dir, nodes, edges) = fixture();
    let (graph, _) = load(&nodes, &edges).unwrap();
    let idx = |id: &str| graph.index_of(id).unwrap();

    let modes: Vec<_> = graph.edges(idx("B")).iter().map(|e| e.mode).collect();
    assert_eq!(modes, vec![TransportMode::Bus, TransportMode::Walk]);

    let a_to_b = &graph.edges(idx("A"))[0];
    assert_eq!(a_to_b.mode, TransportMode::Walk);
    assert!(a_to_b.transfer && !a_to_b.stairs);

    let c_to_e = &graph.edges(idx("C"))[0];
    assert_eq!(c_to_e.mode, TransportMode::Train);
    assert!(c_to_e.flood_risk);
}

#[test]
fn loaded_graph_answers_queries() {
    let (_dir, nodes, edges) = fixture();
    let (graph, _) = load(&nodes, &edges).unwrap();
    let idx = |id: &str| graph.index_of(id).unwrap();

    let profile = CostProfile::standard().with_rain(true);
    let route = shortest_path(&graph, idx("A"), idx("E"), &profile).unwrap();
    assert_eq!(route.nodes, vec![idx("A"), idx("B"), idx("C"), idx("E")]);
    // 3 + 6 (transfer), 5 + 2 (stairs), 4 + 4 (flood in rain)
    assert!((route.cost - 24.0).abs() < 1e-9);

    let nearest = graph.nearest_node(-23.5348, -46.6351).unwrap();
    assert_eq!(nearest.0, idx("E"));
    assert!(nearest.1 < 50.0);
}

#[test]
fn explicit_index_capacity_grows_as_needed() {
    let (_dir, nodes, edges) = fixture();
    let config = GraphConfig {
        index_capacity: Some(1),
        ..GraphConfig::new(&nodes, &edges)
    };
    let (graph, report) = load_graph(&config).unwrap();

    assert!(report.index_rehashes > 0);
    assert!(report.index_capacity >= graph.node_count());
    for id in ["A", "B", "C", "E"] {
        assert!(graph.index_of(id).is_some(), "{id} lost after growth");
    }
}

#[test]
fn missing_input_is_a_load_error() {
    let (dir, nodes, _edges) = fixture();
    let missing = dir.path().join("no_such_edges.csv");

    match load(&nodes, &missing) {
        Err(Error::GraphLoad { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected GraphLoad, got {other:?}"),
    }
}

#[test]
fn empty_files_give_an_empty_graph() {
    let dir = tempfile::tempdir().unwrap();
    let nodes = write_file(dir.path(), "nodes.csv", "id,name,lat,lon,type\n");
    let edges = write_file(dir.path(), "edges.csv", "from,to,time_minutes\n");

    let (graph, report) = load(&nodes, &edges).unwrap();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(report.nodes_read, 0);
    assert_eq!(report.edges_loaded, 0);
}

#[test]
fn stray_quote_in_a_name_keeps_following_rows() {
    let dir = tempfile::tempdir().unwrap();
    let nodes = write_file(
        dir.path(),
        "nodes.csv",
        "id,name,lat,lon,type\n\
         A,\"Terminal Bandeira,-23.5500,-46.6400,bus\n\
         B,Anhangabaú,-23.5454,-46.6388,metro\n\
         C,\"Rua Direita, 200\",-23.5480,-46.6360,bus\n",
    );
    let edges = write_file(
        dir.path(),
        "edges.csv",
        "from,to,time_minutes,transfer,stairs,bad_sidewalk,flood_risk,mode\n\
         A,B,2,0,0,0,0,walk\n\
         \"B\",C,3,0,0,0,0,\"onibus\"\n",
    );

    let (graph, report) = load(&nodes, &edges).unwrap();
    assert_eq!(report.nodes_read, 3);
    assert_eq!(report.malformed_node_rows, 0);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(report.edges_loaded, 2);
    assert!((graph.node(graph.index_of("A").unwrap()).unwrap().lat + 23.55).abs() < 1e-9);
}

#[test]
fn unreadable_header_is_a_csv_error() {
    let (dir, _nodes, edges) = fixture();
    let nodes = dir.path().join("latin1_nodes.csv");
    std::fs::write(&nodes, b"id,nome,lat,lon,tipo\xe7\nA,S\xe9,-23.55,-46.63,metro\n").unwrap();

    assert!(matches!(load(&nodes, &edges), Err(Error::CsvError(_))));
}
