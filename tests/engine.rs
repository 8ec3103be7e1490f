use std::fs;

use accessroute::{Engine, EngineConfig, prelude::*};

const NODES: &str = "\
id,name,lat,lon,type
SE,Sé,-23.5503,-46.6339,metro
AN,Anhangabaú,-23.5454,-46.6388,metro
RD,\"Rua Direita, 200\",-23.5480,-46.6360,bus
LZ,Luz,-23.5347,-46.6352,trem
";

const EDGES: &str = "\
from,to,time_minutes,transfer,stairs,bad_sidewalk,flood_risk,mode
SE,AN,4,0,1,0,0,metro
AN,LZ,6,1,0,0,0,metro
SE,RD,3,0,0,1,0,pe
RD,LZ,5,0,0,0,1,onibus
LZ,QQ,1,0,0,0,0,walk
";

const CONFIG: &str = r#"
analysis_max_results = 2

[graph]
nodes_path = "nodes.csv"
edges_path = "edges.csv"

[profiles.padrao]
alpha = 6.0
beta = 2.0
gamma = 1.0
delta = 4.0

[profiles.pcd]
alpha = 6.0
beta = 12.0
gamma = 6.0
delta = 4.0
reduced_mobility = true
"#;

fn engine() -> (tempfile::TempDir, Engine) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("nodes.csv"), NODES).unwrap();
    fs::write(dir.path().join("edges.csv"), EDGES).unwrap();
    let config_path = dir.path().join("engine.toml");
    fs::write(&config_path, CONFIG).unwrap();

    let config = EngineConfig::from_path(&config_path).unwrap();
    let engine = Engine::from_config(config).unwrap();
    (dir, engine)
}

#[test]
fn loads_from_a_config_file() {
    let (_dir, engine) = engine();
    assert_eq!(engine.profile_names(), vec!["padrao", "pcd"]);
    assert_eq!(engine.graph().node_count(), 4);
    assert_eq!(engine.report().edges_loaded, 4);
    assert_eq!(engine.report().edges_skipped_unknown_to, 1);
    assert!(engine.profile("standard", false).is_err());
}

#[test]
fn profiles_pick_different_routes() {
    let (_dir, engine) = engine();

    // padrao, dry: SE-RD-LZ = (3 + 1) + 5 = 9 beats SE-AN-LZ = 6 + 12
    let dry = engine.route("SE", "LZ", "padrao", false).unwrap().unwrap();
    assert_eq!(dry.path, vec!["SE", "RD", "LZ"]);
    assert!((dry.cost - 9.0).abs() < 1e-9);
    assert_eq!(dry.modes, vec![TransportMode::Walk, TransportMode::Bus]);

    // pcd, rain: SE-RD-LZ = 9 + 9 = 18 beats SE-AN-LZ = 16 + 12 = 28
    let wet = engine.route("SE", "LZ", "pcd", true).unwrap().unwrap();
    assert_eq!(wet.path, vec!["SE", "RD", "LZ"]);
    assert_eq!(
        wet.critical_barriers,
        vec!["bad_sidewalk@SE->RD".to_string(), "flood_risk@RD->LZ".to_string()]
    );
}

#[test]
fn alternatives_and_ranking_serialize() {
    let (_dir, engine) = engine();

    let alternatives = engine.alternatives("SE", "LZ", "padrao", true, 5).unwrap();
    assert_eq!(alternatives.len(), 2);
    assert!(alternatives[0].cost <= alternatives[1].cost);

    let ranking = engine.edges_to_fix("padrao", true, None).unwrap();
    assert_eq!(ranking.len(), 2);

    let json = serde_json::to_value(&ranking).unwrap();
    assert_eq!(json[0]["priority"], 1);
    assert!(json[0]["issue"].is_string());

    let route_json = serde_json::to_string(&alternatives[0]).unwrap();
    assert!(route_json.contains("\"path\""));
}

#[test]
fn unknown_ids_are_reported() {
    let (_dir, engine) = engine();
    assert!(matches!(
        engine.route("SE", "QQ", "padrao", false),
        Err(Error::UnknownNode(id)) if id == "QQ"
    ));
    assert!(matches!(
        engine.edges_to_fix("wheelchair", false, None),
        Err(Error::UnknownProfile(_))
    ));
}

#[test]
fn missing_graph_files_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("engine.toml");
    fs::write(&config_path, CONFIG).unwrap();

    let config = EngineConfig::from_path(&config_path).unwrap();
    assert!(matches!(
        Engine::from_config(config),
        Err(Error::GraphLoad { .. })
    ));
}
