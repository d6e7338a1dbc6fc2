use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn edgeconn(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_edgeconn"))
        .args(args)
        .current_dir(dir)
        .env_remove("EDGECONN_CONFIG")
        .env_remove("EDGECONN_MAX_PASSES")
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run edgeconn")
}

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

const DOCUMENT: &str = r#"{
    "nodes": [
        {"id": "a", "position": {"x": 0, "y": 0}},
        {"id": "b", "position": {"x": 10, "y": 0}},
        {"id": "x", "position": {"x": 0, "y": 10}}
    ],
    "edges": [
        {"id": "e2", "source": "x", "target": "e1"},
        {"id": "e1", "source": "a", "target": "b"}
    ],
    "ops": [
        {"op": "move", "node": "b", "x": 10, "y": 10},
        {"op": "color", "edge": "e1", "color": "red"}
    ]
}"#;

// ── apply ────────────────────────────────────────────────────────────────────

#[test]
fn test_apply_json_output() {
    let dir = tempdir().unwrap();
    write(dir.path(), "graph.json", DOCUMENT);

    let out = edgeconn(&["apply", "graph.json", "--format", "json"], dir.path());
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["outcome"]["passes"], 2);
    assert_eq!(json["outcome"]["added"], serde_json::json!(["e1", "e2"]));

    let pairs = json["graph"]["aux_nodes"].as_array().unwrap();
    let e1 = pairs.iter().find(|p| p["edge"] == "e1").unwrap();
    assert_eq!(e1["position"], serde_json::json!({"x": 5.0, "y": 5.0}));
    assert_eq!(e1["color"], "red");
}

#[test]
fn test_apply_table_output() {
    let dir = tempdir().unwrap();
    write(dir.path(), "graph.json", DOCUMENT);

    let out = edgeconn(&["apply", "graph.json"], dir.path());
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Added 2 edge(s) in 2 pass(es)"));
    assert!(stdout.contains("AUX NODE"));
    assert!(stdout.contains("(5.00, 5.00)"));
}

#[test]
fn test_apply_strict_fails_on_unresolved() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "cycle.json",
        r#"{
            "nodes": [{"id": "a"}, {"id": "b", "position": {"x": 4, "y": 0}}],
            "edges": [
                {"id": "A", "source": "B", "target": "a"},
                {"id": "B", "source": "A", "target": "b"}
            ]
        }"#,
    );

    let lenient = edgeconn(&["apply", "cycle.json"], dir.path());
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stdout).contains("Not added (2)"));

    let strict = edgeconn(&["apply", "cycle.json", "--strict"], dir.path());
    assert!(!strict.status.success());
}

#[test]
fn test_apply_respects_pass_limit_override() {
    let dir = tempdir().unwrap();
    write(dir.path(), "graph.json", DOCUMENT);

    let out = edgeconn(
        &["apply", "graph.json", "--format", "json", "--max-passes", "1"],
        dir.path(),
    );
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["outcome"]["passes"], 1);
    assert_eq!(json["outcome"]["unresolved"].as_array().unwrap().len(), 1);
}

#[test]
fn test_apply_missing_document() {
    let dir = tempdir().unwrap();
    let out = edgeconn(&["apply", "nope.json"], dir.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("nope.json"));
}

// ── config ───────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_defaults() {
    let dir = tempdir().unwrap();
    let out = edgeconn(&["config", "show"], dir.path());
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("max_passes = 10"));
}

#[test]
fn test_config_validate() {
    let dir = tempdir().unwrap();
    write(dir.path(), "edgeconn.toml", "max_passes = 0\n");
    let out = edgeconn(&["config", "validate"], dir.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("max_passes must be > 0"));

    write(dir.path(), "edgeconn.toml", "max_passes = 4\n");
    let out = edgeconn(&["config", "validate"], dir.path());
    assert!(out.status.success());
}
