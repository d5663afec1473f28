//! Binary-level tests: exit codes and dry-run output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn arden() -> Command {
    let mut cmd = Command::cargo_bin("arden").unwrap();
    // Unroutable host so an accidental request fails fast instead of leaving the machine.
    cmd.env_remove("ARDEN_API_TOKEN")
        .env("HOST", "http://127.0.0.1:9")
        .env("LOG_LEVEL", "warn");
    cmd
}

#[test]
fn test_events_send_without_agent_exits_1() {
    arden()
        .args(["events", "send", "--user", "u", "--bid", "1", "--mult", "1", "--data", "x"])
        .args(["--token", "t"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing required flag --agent"));
}

#[test]
fn test_events_send_rejects_bad_pair() {
    arden()
        .args(["events", "send", "--agent", "a", "--user", "u", "--bid", "1", "--mult", "1"])
        .args(["--data", "x", "--dry-run", "oops"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid key=value pair 'oops'"));
}

#[test]
fn test_events_send_dry_run_prints_event() {
    arden()
        .args(["events", "send", "--agent", "A-1", "--user", "u-9", "--bid", "250"])
        .args(["--mult", "3", "--data", r#"{"step":1}"#, "--dry-run", "env=ci"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""agent": "A-1""#))
        .stdout(predicate::str::contains(r#""bid": 250"#))
        .stdout(predicate::str::contains(r#""env": "ci""#));
}

#[test]
fn test_events_send_without_token_exits_1() {
    arden()
        .args(["events", "send", "--agent", "a", "--user", "u", "--bid", "1", "--mult", "1"])
        .args(["--data", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ARDEN_API_TOKEN"));
}

#[test]
fn test_import_dry_run_prints_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("projects").join("-Users-me-Source-app");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join("7d1f.jsonl"),
        concat!(
            r#"{"type":"assistant","timestamp":"2025-06-01T10:00:00.000Z","message":{"model":"claude-sonnet-4-20250514","usage":{"input_tokens":1000,"output_tokens":500,"cache_creation_input_tokens":100}}}"#,
            "\n",
            "this line is not json\n",
        ),
    )
    .unwrap();

    arden()
        .args(["import", "--dry-run", "--claude-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""estimatedCostMicroCents":1080"#))
        .stdout(predicate::str::contains(r#""projectPath":"Users/me/Source/app""#))
        .stdout(predicate::str::contains(r#""sessionId":"7d1f""#))
        .stderr(predicate::str::contains("Import Summary"));
}

#[test]
fn test_import_without_token_exits_1() {
    let temp_dir = TempDir::new().unwrap();
    arden()
        .args(["import", "--claude-dir"])
        .arg(temp_dir.path())
        .assert()
        .code(1);
}

#[test]
fn test_install_dry_run_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("settings.json");
    fs::write(&settings, r#"{"model":"opus"}"#).unwrap();

    arden()
        .args(["install", "--dry-run", "-s"])
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("arden hook UserPromptSubmit"))
        .stdout(predicate::str::contains(r#""model": "opus""#));

    assert_eq!(fs::read_to_string(&settings).unwrap(), r#"{"model":"opus"}"#);
}

#[test]
fn test_install_yes_writes_hooks() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("claude").join("settings.json");

    arden()
        .args(["install", "-y", "--settings"])
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed 7 hook(s)"));

    let written = fs::read_to_string(&settings).unwrap();
    assert!(written.contains("arden hook Stop"));
}

#[test]
fn test_hook_never_fails() {
    arden()
        .args(["hook", "PostToolUse"])
        .write_stdin(r#"{"session_id":"s1","cwd":"/tmp/x","hook_event_name":"PostToolUse"}"#)
        .assert()
        .success();
}

#[test]
fn test_unparseable_flag_value_exits_1() {
    arden()
        .args(["import", "--limit", "abc", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--limit"));

    arden()
        .args(["events", "send", "--user", "u", "--agent"])
        .assert()
        .code(1);
}

#[test]
fn test_help_exits_0() {
    arden()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import"));
}
