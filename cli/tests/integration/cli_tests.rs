//! Integration tests for the CLI surface: help, version and global flags.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn commons_release() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("commons-release"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    commons_release()
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Release helpers for Apache Commons components",
        ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    commons_release()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    commons_release()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("commons-release"));
}

#[test]
fn test_version_command_shows_version() {
    commons_release()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("commons-release 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = commons_release()
        .args(["version", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["version"], "0.1.0");
}

// --- Command hierarchy tests ---

#[test]
fn test_help_lists_every_command() {
    let output = commons_release().arg("--help").output().expect("run");
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for command in ["detach", "clean-staging", "config", "version"] {
        assert!(help.contains(command), "--help should list {command}");
    }
}

#[test]
fn test_clean_staging_help_documents_dry_run() {
    commons_release()
        .args(["clean-staging", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--dist-server"));
}

#[test]
fn test_clean_staging_help_hides_password_env_value() {
    commons_release()
        .args(["clean-staging", "--help"])
        .env("COMMONS_RELEASE_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_unknown_command_fails() {
    commons_release()
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_no_color_env_accepts_conventional_values() {
    for value in ["1", "true", "yes", "0", ""] {
        commons_release()
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success();
    }
}

#[test]
fn test_no_color_flag_still_accepted() {
    commons_release()
        .args(["--no-color", "version"])
        .assert()
        .success();
}
