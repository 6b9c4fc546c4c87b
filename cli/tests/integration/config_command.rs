//! Integration tests for `agentkit config`.
//!
//! Every test runs in its own temp directory so the default
//! `./agentkit.yaml` never escapes it. `AGENTKIT_YES` keeps the
//! interactive fallback off.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn agentkit(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentkit"));
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env("AGENTKIT_YES", "1")
        .env_remove("AGENTKIT_CONFIG")
        .env_remove("AGENTKIT_LOG");
    cmd
}

fn config_file(dir: &TempDir) -> PathBuf {
    dir.path().join("agentkit.yaml")
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read config")
}

/// A directory holding a valid configuration created through the CLI.
fn configured() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    agentkit(&dir)
        .args(["config", "--agent_name", "planner", "--description", "plans trips"])
        .assert()
        .success();
    dir
}

// ---------------------------------------------------------------------------
// Creating and updating
// ---------------------------------------------------------------------------

#[test]
fn test_first_run_writes_defaults_and_given_fields() {
    let dir = TempDir::new().expect("temp dir");
    agentkit(&dir)
        .args(["config", "--agent_name", "planner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("agent_name"))
        .stdout(predicate::str::contains("(not set) → planner"))
        .stderr(predicate::str::contains("Saved agentkit.yaml"));

    let yaml = read(&config_file(&dir));
    assert!(yaml.contains("agent_name: planner"), "{yaml}");
    assert!(yaml.contains("entry_point: agent.py"), "{yaml}");
    assert!(yaml.contains("python_version: '3.12'"), "{yaml}");
    assert!(yaml.contains("launch_type: local"), "{yaml}");
}

#[test]
fn test_kebab_case_aliases_are_accepted() {
    let dir = TempDir::new().expect("temp dir");
    agentkit(&dir)
        .args(["config", "--agent-name", "planner", "--entry-point", "main.sh"])
        .assert()
        .success();
    assert!(read(&config_file(&dir)).contains("entry_point: main.sh"));
}

#[test]
fn test_partial_update_keeps_other_fields() {
    let dir = configured();
    agentkit(&dir)
        .args(["config", "--entry_point", "main.go"])
        .assert()
        .success();

    let yaml = read(&config_file(&dir));
    assert!(yaml.contains("entry_point: main.go"));
    assert!(yaml.contains("description: plans trips"));
    assert!(yaml.contains("agent_name: planner"));
}

#[test]
fn test_update_reports_exactly_the_changed_fields() {
    let dir = configured();
    agentkit(&dir)
        .args(["config", "--entry_point", "old_agent.py", "--image_tag", "0.0.1"])
        .assert()
        .success();

    let assert = agentkit(&dir)
        .args(["--json", "config", "--entry_point", "new_agent.py", "--image_tag", "0.0.2"])
        .assert()
        .success();
    let report: Value = serde_json::from_slice(&assert.get_output().stdout).expect("json");
    let changes = report["changes"].as_array().expect("changes");
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0]["field"], "entry_point");
    assert_eq!(changes[0]["old"], "old_agent.py");
    assert_eq!(changes[0]["new"], "new_agent.py");
    assert_eq!(changes[1]["field"], "local.image_tag");
    assert_eq!(changes[1]["old"], "0.0.1");
    assert_eq!(changes[1]["new"], "0.0.2");
}

#[test]
fn test_rerun_without_changes_does_not_rewrite() {
    let dir = configured();
    let before = read(&config_file(&dir));
    agentkit(&dir)
        .args(["config", "--agent_name", "planner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes"))
        .stderr(predicate::str::contains("not modified"));
    assert_eq!(read(&config_file(&dir)), before);
}

#[test]
fn test_workflow_values_land_under_launch_type() {
    let dir = configured();
    agentkit(&dir)
        .args([
            "config",
            "--launch_type",
            "cloud",
            "--region",
            "cn-beijing",
            "--storage_bucket",
            "artifacts",
        ])
        .assert()
        .success();

    let yaml = read(&config_file(&dir));
    assert!(yaml.contains("launch_types:"), "{yaml}");
    assert!(yaml.contains("  cloud:"), "{yaml}");
    assert!(yaml.contains("region: cn-beijing"), "{yaml}");
}

// ---------------------------------------------------------------------------
// Env vars
// ---------------------------------------------------------------------------

#[test]
fn test_env_vars_merge_and_workflow_wins() {
    let dir = configured();
    agentkit(&dir)
        .args(["config", "-e", "API_KEY=shared", "--workflow-runtime-envs", "DEBUG=true"])
        .assert()
        .success();
    agentkit(&dir)
        .args(["config", "--workflow-runtime-envs", "API_KEY=override"])
        .assert()
        .success();

    let assert = agentkit(&dir)
        .args(["config", "--show", "--json"])
        .assert()
        .success();
    let shown: Value = serde_json::from_slice(&assert.get_output().stdout).expect("json");
    assert_eq!(shown["effective_env"]["API_KEY"], "override");
    assert_eq!(shown["effective_env"]["DEBUG"], "true");
    assert_eq!(shown["config"]["common"]["runtime_envs"]["API_KEY"], "shared");
}

#[test]
fn test_env_value_may_contain_equals_sign() {
    let dir = configured();
    agentkit(&dir)
        .args(["config", "-e", "DSN=host=db;port=5432"])
        .assert()
        .success();
    assert!(read(&config_file(&dir)).contains("DSN: host=db;port=5432"));
}

#[test]
fn test_malformed_env_is_usage_error() {
    let dir = configured();
    let before = read(&config_file(&dir));
    agentkit(&dir)
        .args(["config", "-e", "NOVALUE"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected KEY=VALUE"));
    assert_eq!(read(&config_file(&dir)), before);
}

#[test]
fn test_invalid_env_name_is_usage_error() {
    let dir = configured();
    agentkit(&dir)
        .args(["config", "--workflow-runtime-envs", "1BAD=x"])
        .assert()
        .code(2);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_missing_agent_name_fails_without_creating_file() {
    let dir = TempDir::new().expect("temp dir");
    agentkit(&dir)
        .arg("config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("agent_name: is required"));
    assert!(!config_file(&dir).exists());
}

#[test]
fn test_bad_launch_type_and_entry_point_are_reported_together() {
    let dir = configured();
    let before = read(&config_file(&dir));
    agentkit(&dir)
        .args(["config", "--launch_type", "staging", "--entry_point", "agent.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("entry_point"))
        .stderr(predicate::str::contains("launch_type"));
    assert_eq!(read(&config_file(&dir)), before);
}

#[test]
fn test_field_not_applicable_to_launch_type_is_rejected() {
    let dir = configured();
    agentkit(&dir)
        .args(["config", "--region", "cn-beijing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("local.region"));
}

#[test]
fn test_json_validation_error_lists_violations() {
    let dir = TempDir::new().expect("temp dir");
    let assert = agentkit(&dir)
        .args(["--json", "config", "--entry_point", "agent.txt"])
        .assert()
        .code(1);
    let err: Value = serde_json::from_slice(&assert.get_output().stdout).expect("json");
    assert_eq!(err["error"], true);
    assert_eq!(err["code"], "invalid_config");
    let fields: Vec<&str> = err["violations"]
        .as_array()
        .expect("violations")
        .iter()
        .map(|v| v["field"].as_str().expect("field"))
        .collect();
    assert_eq!(fields, vec!["agent_name", "entry_point"]);
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

#[test]
fn test_dry_run_matches_real_run_and_writes_nothing() {
    let dry = configured();
    let real = configured();
    let before = read(&config_file(&dry));
    let args = ["config", "--entry_point", "main.py", "-e", "API_KEY=shared"];

    let dry_out = agentkit(&dry)
        .args(args)
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("Dry run"))
        .get_output()
        .stdout
        .clone();
    let real_out = agentkit(&real)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(dry_out, real_out);
    assert_eq!(read(&config_file(&dry)), before);
    assert_ne!(read(&config_file(&real)), before);
}

#[test]
fn test_dry_run_on_first_run_creates_nothing() {
    let dir = TempDir::new().expect("temp dir");
    agentkit(&dir)
        .args(["config", "--agent_name", "planner", "--dry-run"])
        .assert()
        .success();
    assert!(!config_file(&dir).exists());
}

// ---------------------------------------------------------------------------
// Show
// ---------------------------------------------------------------------------

#[test]
fn test_show_prints_fields_and_effective_env() {
    let dir = configured();
    agentkit(&dir)
        .args(["config", "-e", "API_KEY=shared"])
        .assert()
        .success();
    agentkit(&dir)
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("agentkit.yaml"))
        .stdout(predicate::str::contains("planner"))
        .stdout(predicate::str::contains("Effective env (local)"))
        .stdout(predicate::str::contains("API_KEY"));
}

#[test]
fn test_show_does_not_create_file() {
    let dir = TempDir::new().expect("temp dir");
    agentkit(&dir)
        .args(["config", "-s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No configuration"));
    assert!(!config_file(&dir).exists());
}

#[test]
fn test_show_with_mutating_flag_is_usage_error() {
    let dir = configured();
    agentkit(&dir)
        .args(["config", "--show", "--agent_name", "other"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--show cannot be combined with --agent_name"));
}

// ---------------------------------------------------------------------------
// File location and I/O
// ---------------------------------------------------------------------------

#[test]
fn test_agentkit_config_env_selects_file() {
    let dir = TempDir::new().expect("temp dir");
    let custom = dir.path().join("custom.yaml");
    agentkit(&dir)
        .env("AGENTKIT_CONFIG", &custom)
        .args(["config", "--agent_name", "planner"])
        .assert()
        .success();
    assert!(custom.exists());
    assert!(!config_file(&dir).exists());
}

#[test]
fn test_config_flag_wins_over_env() {
    let dir = TempDir::new().expect("temp dir");
    let from_env = dir.path().join("env.yaml");
    let from_flag = dir.path().join("flag.yaml");
    agentkit(&dir)
        .env("AGENTKIT_CONFIG", &from_env)
        .args(["config", "--agent_name", "planner", "--config"])
        .arg(&from_flag)
        .assert()
        .success();
    assert!(from_flag.exists());
    assert!(!from_env.exists());
}

#[test]
fn test_unparsable_file_fails_with_path() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(config_file(&dir), "common: [unclosed").expect("write");
    agentkit(&dir)
        .args(["config", "--agent_name", "planner"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse"))
        .stderr(predicate::str::contains("agentkit.yaml"));
}

#[test]
fn test_errors_are_printed_even_when_quiet() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(config_file(&dir), "common: [unclosed").expect("write");
    agentkit(&dir)
        .args(["-q", "config", "--agent_name", "planner"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: cannot parse"));
}

#[test]
fn test_hand_edited_unquoted_values_load() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        config_file(&dir),
        "common:\n  agent_name: planner\n  entry_point: agent.py\n  runtime_envs:\n    DEBUG: true\n    PORT: 8080\n",
    )
    .expect("write");
    agentkit(&dir)
        .args(["config", "--show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""DEBUG": "true""#))
        .stdout(predicate::str::contains(r#""PORT": "8080""#));
}

#[test]
fn test_unquoted_decimal_is_rejected_and_file_kept() {
    let dir = TempDir::new().expect("temp dir");
    let content = "common:\n  agent_name: planner\n  entry_point: agent.py\n  python_version: 3.10\n";
    std::fs::write(config_file(&dir), content).expect("write");
    agentkit(&dir)
        .args(["config", "--description", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse"))
        .stderr(predicate::str::contains("'3.10'"));
    assert_eq!(read(&config_file(&dir)), content);
}

#[test]
fn test_no_color_env_with_any_value_is_accepted() {
    let dir = TempDir::new().expect("temp dir");
    for value in ["1", "true", "yes", ""] {
        agentkit(&dir)
            .env("NO_COLOR", value)
            .args(["config", "--agent_name", "planner", "--dry-run"])
            .assert()
            .success();
    }
    assert!(!config_file(&dir).exists());
}

#[test]
fn test_unreachable_location_fails_and_keeps_previous_file() {
    let dir = configured();
    let before = read(&config_file(&dir));
    std::fs::write(dir.path().join("blocker"), "").expect("write");
    agentkit(&dir)
        .args(["config", "--agent_name", "planner", "--config", "blocker/agentkit.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot access blocker/agentkit.yaml"));
    assert_eq!(read(&config_file(&dir)), before);
    let entries = std::fs::read_dir(dir.path()).expect("read_dir").count();
    assert_eq!(entries, 2);
}

#[test]
fn test_directory_in_place_of_file_is_an_io_error() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::create_dir(config_file(&dir)).expect("mkdir");
    agentkit(&dir)
        .args(["config", "--agent_name", "planner"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("agentkit.yaml"));
    assert!(config_file(&dir).is_dir());
}

#[cfg(unix)]
#[test]
fn test_written_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;
    let dir = configured();
    let mode = std::fs::metadata(config_file(&dir))
        .expect("metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
