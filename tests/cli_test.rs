//! Runs the built binary with `true`/`false` standing in for posAdmin.
#![cfg(unix)]

use std::process::{Command, Output};
use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/model";

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pos-provision"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_missing_input_flag_prints_usage() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {}", stderr);
}

#[test]
fn test_unreadable_input_exits_with_io_code() {
    let output = run(&["-i", "/nonexistent/model", "--admin-command", "true"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_all_workstations_succeed() {
    let output = run(&["-i", FIXTURE, "--admin-command", "true"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stdout: {}", stdout);
    assert!(stdout.contains("REG040 created"));
    assert!(stdout.contains("REG041 created"));
    assert!(stdout.contains("Store: mystore"));
    assert!(stdout.contains("Succeeded: REG040, REG041"));
    assert!(stdout.contains("Failed count: 0"));
}

#[test]
fn test_failing_admin_command_does_not_abort_batch() {
    let output = run(&["-i", FIXTURE, "--admin-command", "false"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("REG040 failed"));
    assert!(stdout.contains("REG041 failed"));
    assert!(stdout.contains("Failed: REG040, REG041"));
    assert!(stdout.contains("Failed count: 2"));
}

#[test]
fn test_incomplete_branch_exits_before_provisioning() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("model");
    let text = std::fs::read_to_string(FIXTURE)
        .unwrap()
        .replace("store:mystore\n", "");
    std::fs::write(&model, text).unwrap();

    let output = run(&["-i", model.to_str().unwrap(), "--admin-command", "true"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout.contains("created"));
    assert!(stderr.contains("store"));
}

#[test]
fn test_dry_run_prints_commands() {
    let output = run(&["-i", FIXTURE, "--admin-command", "false", "--dry-run"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("--cn REG040"));
    assert!(stdout.contains("--macAddress 52:55:00:58:12:73"));
    assert!(stdout.contains("--scRoleDn cn=RoleOneScreen,cn=global,o=myorg,c=ar"));
    assert!(!stdout.contains("failed"));
}

#[test]
fn test_json_report_is_written() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("run.json");

    let output = run(&[
        "-i",
        FIXTURE,
        "--admin-command",
        "true",
        "--report",
        report.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["store"], "mystore");
    assert_eq!(json["summary"]["succeeded"][1], "REG041");
    assert_eq!(json["summary"]["failed_count"], 0);
}
