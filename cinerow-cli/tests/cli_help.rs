mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

use support::{PAGE_FORWARD, catalog_json, write};

#[test]
fn replay_help_mentions_options() {
    let mut cmd = cargo_bin_cmd!("cinerow");
    let output = cmd
        .arg("replay")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    assert!(text.contains("--catalog"), "replay help missing --catalog");
    assert!(text.contains("--script"), "replay help missing --script");
    assert!(text.contains("--realtime"), "replay help missing --realtime");
    assert!(
        text.contains("--no-auto-complete"),
        "replay help missing --no-auto-complete"
    );
}

#[test]
fn config_prints_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("cinerow");
    cmd.current_dir(dir.path())
        .env_remove("CINEROW_CONFIG_PATH")
        .env_remove("CINEROW_CONFIG_JSON")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("# source: built-in defaults"))
        .stdout(predicate::str::contains("transition_duration_ms = 750"));
}

#[test]
fn config_json_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("cinerow");
    let output = cmd
        .current_dir(dir.path())
        .env_remove("CINEROW_CONFIG_PATH")
        .env_remove("CINEROW_CONFIG_JSON")
        .arg("config")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stderr(predicate::str::contains("source: built-in defaults"))
        .get_output()
        .stdout
        .clone();

    let config: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(config["slider"]["transition_duration_ms"], 750);
}

#[test]
fn replay_prints_a_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "catalog.json", &catalog_json(20));
    let script = write(dir.path(), "script.json", PAGE_FORWARD);

    let mut cmd = cargo_bin_cmd!("cinerow");
    let output = cmd
        .current_dir(dir.path())
        .env_remove("CINEROW_CONFIG_PATH")
        .env_remove("CINEROW_CONFIG_JSON")
        .arg("replay")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--script")
        .arg(&script)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["rows"][0]["lowest_index"], 6);
    assert_eq!(report["effects"][0]["at_ms"], 0);
    assert!(report["effects"][0]["effect"]["start_transition"].is_object());
}

#[test]
fn replay_reports_a_missing_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let script = write(dir.path(), "script.json", PAGE_FORWARD);

    let mut cmd = cargo_bin_cmd!("cinerow");
    cmd.current_dir(dir.path())
        .env_remove("CINEROW_CONFIG_PATH")
        .env_remove("CINEROW_CONFIG_JSON")
        .arg("replay")
        .arg("--catalog")
        .arg(dir.path().join("nope.json"))
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("read catalog"));
}
