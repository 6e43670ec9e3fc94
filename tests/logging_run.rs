//! Logging run-context behavior, isolated in its own test binary because the
//! run context is a process-wide singleton keyed off LOG_DIR at first use.

use serde_json::{json, Value};

use fpaforge::logging::{log, obj, v_str, Domain, Level};

#[test]
fn log_entries_land_in_run_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::env::set_var("LOG_DIR", dir.path());
    std::env::set_var("RUN_ID", "test-run");

    log(
        Level::Info,
        Domain::System,
        "test_event",
        obj(&[("k", v_str("v")), ("n", json!(1))]),
    );

    let events = dir.path().join("test-run").join("events.jsonl");
    let body = std::fs::read_to_string(&events).expect("events.jsonl written");
    let line = body.lines().next().expect("one entry");
    let entry: Value = serde_json::from_str(line).expect("valid json");
    assert_eq!(entry["event"], "test_event");
    assert_eq!(entry["domain"], "system");
    assert_eq!(entry["data"]["k"], "v");

    let manifest = dir.path().join("test-run").join("manifest.json");
    assert!(manifest.exists());
}
