//! Integration tests for fixture and config loading from disk

mod common;

use std::io::Write;

use etl_monitor::types::WorldPos;
use etl_monitor::{
    Fixture, MonitorConfig, MonitorError, NodeCategory, NodeId, NodeStatus, NodeStore,
    PipelineLevel,
};

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const SMALL_FIXTURE: &str = r#"{
    "nodes": [
        { "id": "src", "name": "Source", "type": "Lambda", "process": "Demo",
          "status": "SUCCESS", "startTime": "2025-01-05 06:00", "endTime": "2025-01-05 06:04:30",
          "position": { "x": 80, "y": 150 }, "dependencies": [], "level": "Ingesta",
          "flow": "blue" },
        { "id": "sink", "name": "Sink", "type": "Snowflake", "process": "Demo",
          "status": "QUEUED", "position": { "x": -40, "y": 150 },
          "dependencies": ["src", "missing"], "level": "Business", "flow": "teal" }
    ]
}"#;

#[test]
fn test_load_fixture_from_file() {
    let file = write_temp(SMALL_FIXTURE);
    let fixture = Fixture::load(file.path()).unwrap();

    assert_eq!(fixture.nodes.len(), 2);
    assert_eq!(fixture.processes, vec!["Demo".to_string()]);

    let src = &fixture.nodes[0];
    assert_eq!(src.category, NodeCategory::Lambda);
    assert_eq!(src.level, PipelineLevel::Ingestion);
    assert_eq!(src.elapsed_display(), "4m 30s");
}

#[test]
fn test_unknown_values_fall_back() {
    let fixture = Fixture::from_json(SMALL_FIXTURE).unwrap();
    let sink = &fixture.nodes[1];

    assert_eq!(sink.category, NodeCategory::Unknown);
    assert_eq!(sink.status, NodeStatus::Unknown);
    assert_eq!(sink.elapsed_display(), "N/A");
    // Negative coordinates are clamped on load
    assert_eq!(sink.position, WorldPos::new(0.0, 150.0));
}

#[test]
fn test_dangling_dependency_loads() {
    let store = NodeStore::from_fixture(Fixture::from_json(SMALL_FIXTURE).unwrap()).unwrap();
    let edges = etl_monitor::resolve_edges(&store.visible());
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].to.id, NodeId::new("sink"));
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let json = r#"{ "nodes": [
        { "id": "a", "name": "A", "process": "P", "position": { "x": 0, "y": 0 } },
        { "id": "a", "name": "A again", "process": "P", "position": { "x": 10, "y": 0 } }
    ] }"#;
    let err = Fixture::from_json(json).unwrap_err();
    assert!(matches!(err, MonitorError::DuplicateNodeId(ref id) if id == "a"));
}

#[test]
fn test_malformed_fixture_reports_path() {
    let file = write_temp("{ \"nodes\": [ ");
    let err = Fixture::load(file.path()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains(&file.path().display().to_string()), "{}", message);
}

#[test]
fn test_missing_fixture_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Fixture::load(dir.path().join("absent.json")).is_err());
}

#[test]
fn test_config_points_at_fixture() {
    let fixture = write_temp(SMALL_FIXTURE);
    let config_text = format!(
        "[fixture]\npath = {:?}\n\n[canvas]\ninitial_zoom = 1.5\n",
        fixture.path().display().to_string()
    );
    let config_file = write_temp(&config_text);

    let config = MonitorConfig::load_from(config_file.path()).unwrap();
    assert_eq!(config.canvas.initial_viewport().zoom(), 1.5);

    let path = config.fixture.path.unwrap();
    let store = NodeStore::from_fixture(Fixture::load(path).unwrap()).unwrap();
    assert_eq!(store.total_len(), 2);
}

#[test]
fn test_malformed_config_is_an_error() {
    let file = write_temp("[canvas]\ninitial_zoom = \"wide\"\n");
    assert!(MonitorConfig::load_from(file.path()).is_err());
}
