//! Unit tests for the distribution detachment service.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use commons_release::application::services::detachment::{DetachSettings, detach_distributions};
use commons_release::domain::error::DetachError;
use commons_release::infra::fs::HostFs;
use release_common::Artifact;
use tempfile::TempDir;

use crate::helpers::{NoopReporter, RecordingReporter};

fn settings(working_directory: PathBuf) -> DetachSettings {
    DetachSettings {
        working_directory,
        base_directory: PathBuf::new(),
        archive_suffixes: vec![".zip".into(), ".tar.gz".into()],
        side_suffixes: vec![".asc".into(), ".md5".into(), ".sha1".into()],
    }
}

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, name.as_bytes()).unwrap();
    path
}

/// A typical component build: a jar, its pom, a source tarball with
/// detached checksums on disk, and a binary zip whose signature is attached.
fn component_build(build: &Path) -> Vec<Artifact> {
    let tarball = touch(build, "commons-foo-1.0-src.tar.gz");
    for suffix in [".asc", ".md5", ".sha1"] {
        touch(build, &format!("commons-foo-1.0-src.tar.gz{suffix}"));
    }
    let zip = touch(build, "commons-foo-1.0-bin.zip");
    let zip_asc = touch(build, "commons-foo-1.0-bin.zip.asc");
    let jar = touch(build, "commons-foo-1.0.jar");
    let pom = touch(build, "commons-foo-1.0.pom");

    vec![
        Artifact::from_file(jar, None),
        Artifact::from_file(pom, None),
        Artifact::from_file(tarball, Some("src".into())),
        Artifact::from_file(zip, Some("bin".into())),
        Artifact::from_file(zip_asc, Some("bin".into())),
    ]
}

#[test]
fn test_detach_copies_archives_and_side_files() {
    let dir = TempDir::new().unwrap();
    let artifacts = component_build(dir.path());
    let work = dir.path().join("commons-release-plugin");

    let out = detach_distributions(artifacts, &settings(work.clone()), &HostFs, &NoopReporter)
        .unwrap();

    let remaining: Vec<_> = out.remaining.iter().filter_map(Artifact::file_name).collect();
    assert_eq!(remaining, ["commons-foo-1.0.jar", "commons-foo-1.0.pom"]);

    for name in [
        "commons-foo-1.0-src.tar.gz",
        "commons-foo-1.0-src.tar.gz.asc",
        "commons-foo-1.0-src.tar.gz.md5",
        "commons-foo-1.0-src.tar.gz.sha1",
        "commons-foo-1.0-bin.zip",
        "commons-foo-1.0-bin.zip.asc",
    ] {
        assert!(work.join(name).is_file(), "{name} should be copied");
        assert_eq!(std::fs::read(work.join(name)).unwrap(), name.as_bytes());
    }
    assert_eq!(out.report.copied.len(), 6);
    assert!(!work.join("commons-foo-1.0.jar").exists());
}

#[test]
fn test_detached_and_kept_are_disjoint() {
    let dir = TempDir::new().unwrap();
    let artifacts = component_build(dir.path());
    let total = artifacts.len();

    let out = detach_distributions(
        artifacts,
        &settings(dir.path().join("work")),
        &HostFs,
        &NoopReporter,
    )
    .unwrap();

    assert_eq!(out.report.detached.len() + out.report.kept.len(), total);
    for detached in &out.report.detached {
        assert!(!out.remaining.contains(detached));
    }
    let detached: Vec<_> = out
        .report
        .detached
        .iter()
        .filter_map(Artifact::file_name)
        .collect();
    assert!(detached.contains(&"commons-foo-1.0-bin.zip.asc"));
}

#[test]
fn test_second_run_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let artifacts = component_build(dir.path());

    let first = detach_distributions(
        artifacts,
        &settings(dir.path().join("work")),
        &HostFs,
        &NoopReporter,
    )
    .unwrap();

    let fresh = dir.path().join("second-work");
    let reporter = RecordingReporter::default();
    let second = detach_distributions(
        first.remaining.clone(),
        &settings(fresh.clone()),
        &HostFs,
        &reporter,
    )
    .unwrap();

    assert_eq!(second.remaining, first.remaining);
    assert!(second.report.detached.is_empty());
    assert!(second.report.copied.is_empty());
    assert!(!fresh.exists(), "nothing to copy, nothing created");
    assert_eq!(reporter.of_level("info").len(), 1);
}

#[test]
fn test_missing_archive_aborts_before_copying() {
    let dir = TempDir::new().unwrap();
    let present = touch(dir.path(), "commons-foo-1.0-src.tar.gz");
    let artifacts = vec![
        Artifact::from_file(present, Some("src".into())),
        Artifact::from_file(dir.path().join("commons-foo-1.0-bin.zip"), Some("bin".into())),
    ];
    let work = dir.path().join("work");

    let err = detach_distributions(artifacts, &settings(work.clone()), &HostFs, &NoopReporter)
        .unwrap_err();

    match err.downcast_ref::<DetachError>() {
        Some(DetachError::MissingArtifact(path)) => {
            assert!(path.ends_with("commons-foo-1.0-bin.zip"));
        }
        other => panic!("expected MissingArtifact, got {other:?}"),
    }
    assert!(!work.exists());
}

#[test]
fn test_custom_archive_suffix_only_detaches_matches() {
    let dir = TempDir::new().unwrap();
    let artifacts = component_build(dir.path());
    let mut only_zip = settings(dir.path().join("work"));
    only_zip.archive_suffixes = vec![".zip".into()];

    let out = detach_distributions(artifacts, &only_zip, &HostFs, &NoopReporter).unwrap();

    let remaining: Vec<_> = out.remaining.iter().filter_map(Artifact::file_name).collect();
    assert!(remaining.contains(&"commons-foo-1.0-src.tar.gz"));
    assert!(!remaining.contains(&"commons-foo-1.0-bin.zip"));
}

#[test]
fn test_existing_working_directory_is_reused() {
    let dir = TempDir::new().unwrap();
    let artifacts = component_build(dir.path());
    let work = dir.path().join("work");
    std::fs::create_dir_all(&work).unwrap();
    touch(&work, "unrelated.txt");

    detach_distributions(artifacts, &settings(work.clone()), &HostFs, &NoopReporter).unwrap();

    assert!(work.join("unrelated.txt").is_file());
    assert!(work.join("commons-foo-1.0-bin.zip").is_file());
}

#[test]
fn test_missing_attached_side_file_aborts_and_keeps_list() {
    let dir = TempDir::new().unwrap();
    let zip = touch(dir.path(), "commons-foo-1.0-bin.zip");
    let artifacts = vec![
        Artifact::from_file(zip, Some("bin".into())),
        Artifact::from_file(dir.path().join("commons-foo-1.0-bin.zip.asc"), Some("bin".into())),
    ];
    let work = dir.path().join("work");

    let err = detach_distributions(artifacts, &settings(work.clone()), &HostFs, &NoopReporter)
        .unwrap_err();

    match err.downcast_ref::<DetachError>() {
        Some(DetachError::MissingArtifact(path)) => {
            assert!(path.ends_with("commons-foo-1.0-bin.zip.asc"));
        }
        other => panic!("expected MissingArtifact, got {other:?}"),
    }
    assert!(!work.exists());
}

#[test]
fn test_relative_paths_resolve_against_base_directory() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("target");
    std::fs::create_dir_all(&target).unwrap();
    touch(&target, "commons-foo-1.0-src.zip");
    touch(&target, "commons-foo-1.0-src.zip.sha1");
    touch(&target, "commons-foo-1.0.jar");
    let artifacts = vec![
        Artifact::from_file("commons-foo-1.0.jar", None),
        Artifact::from_file("commons-foo-1.0-src.zip", Some("src".into())),
    ];
    let work = dir.path().join("work");
    let mut relative = settings(work.clone());
    relative.base_directory = target;

    let out = detach_distributions(artifacts, &relative, &HostFs, &NoopReporter).unwrap();

    assert!(work.join("commons-foo-1.0-src.zip").is_file());
    assert!(work.join("commons-foo-1.0-src.zip.sha1").is_file());
    assert_eq!(out.remaining, [Artifact::from_file("commons-foo-1.0.jar", None)]);
    assert_eq!(out.report.detached[0].file, PathBuf::from("commons-foo-1.0-src.zip"));
}
