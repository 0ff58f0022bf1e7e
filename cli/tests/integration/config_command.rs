//! Integration tests for `commons-release config`.
//!
//! Every test points `COMMONS_RELEASE_CONFIG` at a temp path so nothing
//! reads or writes `./commons-release.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn commons_release() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("commons-release"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("commons-release.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    commons_release()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    commons_release()
        .args(["config", "show"])
        .env("COMMONS_RELEASE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("commons-release-plugin"))
        .stdout(predicate::str::contains(".tar.gz"));
}

#[test]
fn test_config_show_json_reports_path_and_values() {
    let (_dir, path) = temp_config_path();
    let output = commons_release()
        .args(["config", "show", "--json"])
        .env("COMMONS_RELEASE_CONFIG", &path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["path"], path.as_str());
    assert_eq!(value["config"]["staging"]["is_dist_module"], false);
}

#[test]
fn test_config_set_then_show() {
    let (_dir, path) = temp_config_path();
    commons_release()
        .args([
            "config",
            "set",
            "staging.url",
            "scm:svn:https://dist.example.org/dev/foo",
        ])
        .env("COMMONS_RELEASE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set staging.url"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("scm:svn:https://dist.example.org/dev/foo"));

    commons_release()
        .args(["config", "show"])
        .env("COMMONS_RELEASE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "scm:svn:https://dist.example.org/dev/foo",
        ));
}

#[test]
fn test_config_flag_overrides_env() {
    let (dir, env_path) = temp_config_path();
    let flag_path = dir.path().join("other.yaml");
    commons_release()
        .args(["--config", flag_path.to_str().unwrap()])
        .args(["config", "set", "artifact_id", "commons-foo"])
        .env("COMMONS_RELEASE_CONFIG", &env_path)
        .assert()
        .success();
    assert!(flag_path.is_file());
    assert!(!std::path::Path::new(&env_path).exists());
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    commons_release()
        .args(["config", "set", "staging.password", "x"])
        .env("COMMONS_RELEASE_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting: staging.password"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_bool_fails() {
    let (_dir, path) = temp_config_path();
    commons_release()
        .args(["config", "set", "staging.dry_run", "yes"])
        .env("COMMONS_RELEASE_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for staging.dry_run"));
}

#[test]
fn test_config_set_invalid_json_error_has_code() {
    let (_dir, path) = temp_config_path();
    let output = commons_release()
        .args(["--json", "config", "set", "detach.side_suffixes", "a/b"])
        .env("COMMONS_RELEASE_CONFIG", &path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "invalid_config");
}
