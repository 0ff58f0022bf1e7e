//! Application service: distribution detachment use-case.
//!
//! Takes the attached-artifact list, copies distribution archives and their
//! signature/checksum side-files into the working directory, and returns the
//! list without them. The caller persists the returned list.

use std::path::{Path, PathBuf};

use anyhow::Result;
use release_common::{Artifact, DetachmentReport};

use crate::application::ports::{LocalFs, ProgressReporter};
use crate::domain::artifact::{plan_detachment, side_file_path};
use crate::domain::error::DetachError;

/// Inputs for one detachment run.
#[derive(Debug, Clone)]
pub struct DetachSettings {
    /// Destination of the copies; created if absent.
    pub working_directory: PathBuf,
    /// Relative artifact paths are resolved against this directory
    /// (the manifest's directory).
    pub base_directory: PathBuf,
    /// Normalised archive suffixes (`.zip`).
    pub archive_suffixes: Vec<String>,
    /// Normalised side-file suffixes (`.asc`).
    pub side_suffixes: Vec<String>,
}

impl DetachSettings {
    /// On-disk location of `artifact`.
    #[must_use]
    pub fn source_of(&self, artifact: &Artifact) -> PathBuf {
        self.base_directory.join(&artifact.file)
    }
}

/// Outcome of a detachment run.
#[derive(Debug, Clone)]
pub struct Detachment {
    /// Artifacts that stay attached.
    pub remaining: Vec<Artifact>,
    pub report: DetachmentReport,
}

/// Detach distribution archives from `artifacts`.
///
/// Every archive and attached side-file is checked before anything is
/// copied, so a missing file aborts the run without touching the working
/// directory.
///
/// # Errors
///
/// Returns [`DetachError::MissingArtifact`] if an archive or an attached
/// side-file does not exist, or a filesystem error if a copy fails.
pub fn detach_distributions(
    artifacts: Vec<Artifact>,
    settings: &DetachSettings,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
) -> Result<Detachment> {
    let plan = plan_detachment(artifacts, &settings.archive_suffixes, &settings.side_suffixes);

    if plan.is_empty() {
        reporter.info("No distribution archives attached; nothing to detach.");
        return Ok(Detachment {
            report: DetachmentReport {
                working_directory: settings.working_directory.clone(),
                kept: plan.keep.clone(),
                ..DetachmentReport::default()
            },
            remaining: plan.keep,
        });
    }

    for artifact in plan.archives.iter().chain(&plan.side_files) {
        if artifact.file_name().is_none() {
            return Err(DetachError::NoFileName(artifact.file.clone()).into());
        }
        let source = settings.source_of(artifact);
        if !fs.exists(&source) {
            return Err(DetachError::MissingArtifact(source).into());
        }
    }

    if !fs.exists(&settings.working_directory) {
        fs.create_dir_all(&settings.working_directory)?;
    }

    let mut copied = Vec::new();
    for archive in &plan.archives {
        let source = settings.source_of(archive);
        reporter.step(&format!("Detaching {}", source.display()));
        copied.push(copy_into(fs, &source, &settings.working_directory)?);
        for suffix in &settings.side_suffixes {
            let side = side_file_path(&source, suffix);
            if fs.exists(&side) {
                copied.push(copy_into(fs, &side, &settings.working_directory)?);
            } else {
                tracing::debug!(path = %side.display(), "no side-file");
            }
        }
    }

    let mut detached = plan.archives;
    detached.extend(plan.side_files);
    reporter.success(&format!(
        "Detached {} artifact(s) into {}",
        detached.len(),
        settings.working_directory.display()
    ));

    Ok(Detachment {
        report: DetachmentReport {
            working_directory: settings.working_directory.clone(),
            detached,
            copied,
            kept: plan.keep.clone(),
        },
        remaining: plan.keep,
    })
}

/// Copies `source` into `dir` under the same file name; returns the destination.
fn copy_into(fs: &impl LocalFs, source: &Path, dir: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .ok_or_else(|| DetachError::NoFileName(source.to_path_buf()))?;
    let dest = dir.join(name);
    fs.copy(source, &dest)?;
    Ok(dest)
}
