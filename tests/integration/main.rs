//! Integration tests for the todoist CLI
//!
//! Each test runs the real binary with `HOME` pointed at a temp directory and
//! the API base redirected to a scripted in-process server.

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

use std::fs;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

use common::mock_api::{MockApi, Reply};

const TOKEN: &str = "0123456789abcdef";

const TASK_JSON: &str = r#"{
    "id": "2995104339",
    "project_id": "2203306141",
    "content": "Buy milk",
    "priority": 4,
    "labels": ["errand"]
}"#;

const PROJECTS_JSON: &str = r#"[
    {"id": "2203306141", "name": "Inbox", "inbox_project": true},
    {"id": "2203306142", "name": "Work", "is_favorite": true}
]"#;

/// A `todoist` command isolated from the user's real config
fn todoist(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("todoist"));
    cmd.env("HOME", home.path())
        .env_remove("TODOIST_ACCESS_TOKEN")
        .env_remove("TODOIST_API_BASE")
        .env_remove("RUST_LOG");
    cmd
}

/// A `todoist` command with a token, talking to `api`
fn todoist_with_api(home: &TempDir, api: &MockApi) -> assert_cmd::Command {
    let mut cmd = todoist(home);
    cmd.env("TODOIST_ACCESS_TOKEN", TOKEN).env("TODOIST_API_BASE", api.base_url());
    cmd
}

// =============================================================================
// BASICS
// =============================================================================

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    todoist(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("todoist v{}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    todoist(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("configure"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn test_missing_token() {
    let home = TempDir::new().unwrap();
    todoist(&home)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no access token found"))
        .stderr(predicate::str::contains("todoist configure"));
}

// =============================================================================
// TASKS
// =============================================================================

#[test]
fn test_list_human() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(200, &format!("[{TASK_JSON}]"))]);

    todoist_with_api(&home, &api)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2995104339 [P1] Buy milk @errand"));

    let recorded = &api.requests()[0];
    assert_eq!(recorded.url, "/tasks");
    assert_eq!(recorded.authorization.as_deref(), Some("Bearer 0123456789abcdef"));
}

#[test]
fn test_list_json_unwraps_envelope() {
    let home = TempDir::new().unwrap();
    let body = format!(r#"{{"results": [{TASK_JSON}], "next_cursor": null}}"#);
    let api = MockApi::start(vec![Reply::new(200, &body)]);

    let output = todoist_with_api(&home, &api)
        .args(["--json", "list", "--filter", "today"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["tasks"][0]["id"], "2995104339");
    assert_eq!(api.requests()[0].url, "/tasks?filter=today");
}

#[test]
fn test_list_empty() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(200, "[]")]);

    todoist_with_api(&home, &api)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_list_by_project_name() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(200, PROJECTS_JSON), Reply::new(200, "[]")]);

    todoist_with_api(&home, &api).args(["list", "--project", "work"]).assert().success();

    let requests = api.requests();
    assert_eq!(requests[0].url, "/projects");
    assert_eq!(requests[1].url, "/tasks?project_id=2203306142");
}

#[test]
fn test_add_task() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(200, TASK_JSON)]);

    todoist_with_api(&home, &api)
        .args(["add", "Buy milk", "-p", "1", "-d", "tomorrow", "-l", "errand,home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task: Buy milk (ID: 2995104339)"));

    let body: serde_json::Value = serde_json::from_str(&api.requests()[0].body).unwrap();
    assert_eq!(body["content"], "Buy milk");
    assert_eq!(body["priority"], 4);
    assert_eq!(body["due_string"], "tomorrow");
    assert_eq!(body["labels"], serde_json::json!(["errand", "home"]));
}

#[test]
fn test_add_invalid_priority_makes_no_request() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(200, TASK_JSON)]);

    todoist_with_api(&home, &api)
        .args(["add", "Buy milk", "-p", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("priority must be 1-4"));

    assert_eq!(api.hits(), 0);
}

#[test]
fn test_add_unknown_project() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(200, PROJECTS_JSON)]);

    todoist_with_api(&home, &api)
        .args(["add", "Buy milk", "--project", "Garden"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project not found: Garden"));
}

#[test]
fn test_close_task() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::empty(204)]);

    todoist_with_api(&home, &api)
        .args(["close", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task completed: 42"));

    assert_eq!(api.requests()[0].url, "/tasks/42/close");
}

#[test]
fn test_delete_missing_task() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(404, r#""Task not found""#)]);

    todoist_with_api(&home, &api)
        .args(["delete", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: [Todoist] Task not found (HTTP 404)"));

    assert_eq!(api.hits(), 1);
}

#[test]
fn test_error_json_shape() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(401, "")]);

    let output = todoist_with_api(&home, &api).args(["--json", "labels"]).output().unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["kind"], "auth");
    assert_eq!(json["status"], 401);
    assert!(json["error"].as_str().unwrap().contains("Invalid or missing access token"));
}

#[test]
fn test_completed() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(
        200,
        r#"{"items": [{"id": "1", "task_id": "42", "content": "Ship it", "completed_at": "2024-03-01T10:00:00Z"}]}"#,
    )]);

    todoist_with_api(&home, &api)
        .args(["completed", "--since", "2024-03-01", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ship it"));

    assert_eq!(
        api.requests()[0].url,
        "/tasks/completed?since=2024-03-01T00%3A00%3A00&limit=5"
    );
}

#[test]
fn test_completed_rejects_bad_since() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![]);

    todoist_with_api(&home, &api)
        .args(["completed", "--since", "last week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--since must be a date"));
}

// =============================================================================
// PROJECTS AND LABELS
// =============================================================================

#[test]
fn test_projects_list() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(200, PROJECTS_JSON)]);

    todoist_with_api(&home, &api)
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inbox (2203306141)"))
        .stdout(predicate::str::contains("* Work (2203306142)"));
}

#[test]
fn test_projects_add_and_delete() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![
        Reply::new(200, r#"{"id": "5", "name": "Garden"}"#),
        Reply::empty(204),
    ]);

    todoist_with_api(&home, &api)
        .args(["projects", "add", "Garden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project: Garden (ID: 5)"));

    todoist_with_api(&home, &api)
        .args(["projects", "delete", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project deleted: 5"));

    let requests = api.requests();
    assert_eq!(requests[0].body, r#"{"name":"Garden"}"#);
    assert_eq!(requests[1].url, "/projects/5");
}

#[test]
fn test_labels() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(200, r#"[{"id": "9", "name": "errand"}]"#)]);

    todoist_with_api(&home, &api)
        .arg("labels")
        .assert()
        .success()
        .stdout(predicate::str::contains("@errand (9)"));
}

// =============================================================================
// CONFIGURE AND DOCTOR
// =============================================================================

#[test]
fn test_configure_then_show() {
    let home = TempDir::new().unwrap();

    todoist(&home)
        .args(["configure", "--token", TOKEN])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved"));

    let config = home.path().join(".todoist").join("config");
    assert!(config.exists());

    todoist(&home)
        .args(["configure", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Access token: 0123...cdef"))
        .stdout(predicate::str::contains(TOKEN).not());
}

#[test]
fn test_configured_token_is_used() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(200, "[]")]);

    todoist(&home).args(["configure", "--token", "stored-token-1234"]).assert().success();

    todoist(&home)
        .env("TODOIST_ACCESS_TOKEN", "env-token-5678")
        .env("TODOIST_API_BASE", api.base_url())
        .arg("labels")
        .assert()
        .success();

    assert_eq!(
        api.requests()[0].authorization.as_deref(),
        Some("Bearer stored-token-1234")
    );
}

#[test]
fn test_malformed_config_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".todoist");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config"), "access_token=abcdef0123456789\n").unwrap();
    let api = MockApi::start(vec![Reply::new(200, "[]")]);

    todoist_with_api(&home, &api)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"))
        .stderr(predicate::str::contains("failed to parse"))
        .stderr(predicate::str::contains("no access token found").not());

    assert_eq!(api.hits(), 0);
}

#[test]
fn test_configure_show_without_config() {
    let home = TempDir::new().unwrap();
    todoist(&home)
        .args(["configure", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No configuration file found."));
}

#[test]
fn test_doctor_healthy() {
    let home = TempDir::new().unwrap();
    let api = MockApi::start(vec![Reply::new(200, PROJECTS_JSON)]);

    todoist(&home).args(["configure", "--token", TOKEN]).assert().success();

    let bin = cargo::cargo_bin!("todoist");
    let output = todoist(&home)
        .env("TODOIST_API_BASE", api.base_url())
        .env("PATH", bin.parent().unwrap())
        .args(["--json", "doctor"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["all_ok"], true);
    assert!(
        json["checks"]
            .as_array()
            .unwrap()
            .iter()
            .any(|check| check["name"] == "API connection" && check["status"] == "ok")
    );
    assert!(
        json["checks"]
            .as_array()
            .unwrap()
            .iter()
            .any(|check| check["name"] == "Binary" && check["status"] == "ok")
    );
}

#[test]
fn test_doctor_binary_missing_from_path_warns() {
    let home = TempDir::new().unwrap();
    let empty = TempDir::new().unwrap();

    let output = todoist(&home)
        .env("PATH", empty.path())
        .args(["--json", "doctor"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["checks"][0]["name"], "Binary");
    assert_eq!(json["checks"][0]["status"], "warn");
}

#[test]
fn test_doctor_without_config_fails() {
    let home = TempDir::new().unwrap();
    todoist(&home)
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("check(s) failed"));
}
