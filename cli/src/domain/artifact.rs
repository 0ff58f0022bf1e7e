//! Deciding which attached artifacts leave the publish list.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use release_common::Artifact;

use crate::domain::error::ConfigError;

/// Archive suffixes detached when nothing else is configured.
pub const DEFAULT_ARCHIVE_SUFFIXES: &[&str] = &[".zip", ".tar.gz"];

/// Signature and checksum suffixes copied alongside each detached archive.
pub const DEFAULT_SIDE_SUFFIXES: &[&str] = &[".asc", ".md5", ".sha1"];

/// Partition of an attached-artifact list.
///
/// `archives` and `side_files` leave the attached list; `keep` stays.
/// Every input artifact lands in exactly one of the three.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DetachPlan {
    /// Distribution archives matched by an archive suffix.
    pub archives: Vec<Artifact>,
    /// Attached signature/checksum files of a detached archive.
    pub side_files: Vec<Artifact>,
    /// Everything else, left attached in its original order.
    pub keep: Vec<Artifact>,
}

impl DetachPlan {
    /// Returns `true` when nothing would be detached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archives.is_empty() && self.side_files.is_empty()
    }
}

/// Returns `true` if `file_name` ends with one of `archive_suffixes`.
#[must_use]
pub fn is_distribution_archive(file_name: &str, archive_suffixes: &[String]) -> bool {
    archive_suffixes
        .iter()
        .any(|suffix| file_name.len() > suffix.len() && file_name.ends_with(suffix.as_str()))
}

/// Path of the `suffix` side-file that sits next to `archive`
/// (`/t/foo.zip` + `.asc` → `/t/foo.zip.asc`).
#[must_use]
pub fn side_file_path(archive: &Path, suffix: &str) -> PathBuf {
    let mut name = archive.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    archive.with_file_name(name)
}

/// Splits `artifacts` into archives to detach, attached side-files that
/// follow them, and artifacts that stay attached.
#[must_use]
pub fn plan_detachment(
    artifacts: Vec<Artifact>,
    archive_suffixes: &[String],
    side_suffixes: &[String],
) -> DetachPlan {
    let side_paths: HashSet<PathBuf> = artifacts
        .iter()
        .filter(|a| {
            a.file_name()
                .is_some_and(|name| is_distribution_archive(name, archive_suffixes))
        })
        .flat_map(|a| {
            side_suffixes
                .iter()
                .map(move |suffix| side_file_path(&a.file, suffix))
        })
        .collect();

    let mut plan = DetachPlan::default();
    for artifact in artifacts {
        let is_archive = artifact
            .file_name()
            .is_some_and(|name| is_distribution_archive(name, archive_suffixes));
        if is_archive {
            plan.archives.push(artifact);
        } else if side_paths.contains(&artifact.file) {
            plan.side_files.push(artifact);
        } else {
            plan.keep.push(artifact);
        }
    }
    plan
}

/// Normalises a configured suffix: trims whitespace and adds the leading dot
/// (`zip` → `.zip`).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSuffix`] for empty suffixes or suffixes
/// containing a path separator.
pub fn normalize_suffix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed.contains(['/', '\\']) {
        return Err(ConfigError::InvalidSuffix(raw.to_string()));
    }
    if trimmed.starts_with('.') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!(".{trimmed}"))
    }
}

/// Normalises every suffix in `raw`, dropping duplicates while keeping order.
///
/// # Errors
///
/// Returns the first invalid suffix.
pub fn normalize_suffixes<S: AsRef<str>>(raw: &[S]) -> Result<Vec<String>, ConfigError> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for s in raw {
        let suffix = normalize_suffix(s.as_ref())?;
        if !out.contains(&suffix) {
            out.push(suffix);
        }
    }
    Ok(out)
}
