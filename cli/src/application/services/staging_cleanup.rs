//! Application service: staging area cleanup use-case.
//!
//! Checks out the remote staging location into a fresh directory, schedules
//! every top-level entry for removal, and commits. Each SCM failure aborts
//! the remaining steps.

use std::ffi::OsStr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use release_common::{CleanupReport, CleanupStatus};

use crate::application::ports::{
    LocalFs, ProgressReporter, ScmManager, ScmProvider, SettingsStore,
};
use crate::application::services::credentials;
use crate::domain::error::ScmError;
use crate::domain::scm::{
    REMOVE_MESSAGE, SVN_ADMIN_DIR, ScmFileSet, ScmRepository, SkipReason, checkin_message,
    skip_reason,
};

/// Inputs for one cleanup run.
#[derive(Debug, Clone, Default)]
pub struct CleanupRequest {
    /// Artifact id named in the commit message.
    pub artifact_id: String,
    /// `scm:<provider>:<url>` of the staging area; empty skips the run.
    pub staging_url: String,
    /// Cleanup runs only when `true`.
    pub is_dist_module: bool,
    /// Skip the commit.
    pub dry_run: bool,
    pub working_directory: PathBuf,
    /// Local checkout target.
    pub cleanup_directory: PathBuf,
    /// Settings server id, preferred over `username`/`password`.
    pub dist_server: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CleanupRequest {
    /// Guard evaluation, without any I/O.
    #[must_use]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        skip_reason(self.is_dist_module, &self.staging_url)
    }
}

/// How a cleanup run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// A guard was not met; nothing was touched.
    Skipped(SkipReason),
    /// The checkout had no entries to remove.
    AlreadyEmpty,
    /// Removals were scheduled in the working copy but not committed.
    DryRun { pending: Vec<PathBuf> },
    /// Removals were committed.
    Committed {
        removed: Vec<PathBuf>,
        revision: Option<u64>,
    },
}

impl CleanupOutcome {
    /// Serializable report for `staging_url`.
    #[must_use]
    pub fn to_report(&self, staging_url: &str) -> CleanupReport {
        let mut report = CleanupReport {
            status: CleanupStatus::Skipped,
            staging_url: staging_url.to_string(),
            reason: None,
            removed: Vec::new(),
            revision: None,
        };
        match self {
            Self::Skipped(reason) => report.reason = Some(reason.message().to_string()),
            Self::AlreadyEmpty => report.status = CleanupStatus::AlreadyEmpty,
            Self::DryRun { pending } => {
                report.status = CleanupStatus::DryRun;
                report.removed.clone_from(pending);
            }
            Self::Committed { removed, revision } => {
                report.status = CleanupStatus::Committed;
                report.removed.clone_from(removed);
                report.revision = *revision;
            }
        }
        report
    }
}

/// Empty the remote staging area described by `request`.
///
/// # Errors
///
/// Returns an error if the URL is invalid, no provider handles it, the
/// working directory cannot be created, or any SCM step fails. SCM step
/// failures are [`ScmError`] values carrying the provider's output.
pub async fn clean_staging(
    request: &CleanupRequest,
    manager: &impl ScmManager,
    settings: &impl SettingsStore,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
) -> Result<CleanupOutcome> {
    if let Some(reason) = request.skip_reason() {
        match reason {
            SkipReason::NotDistModule => reporter.info(reason.message()),
            SkipReason::NoStagingUrl => reporter.warn(reason.message()),
        }
        return Ok(CleanupOutcome::Skipped(reason));
    }

    if !fs.exists(&request.working_directory) {
        fs.create_dir_all(&request.working_directory)?;
    }

    let creds = credentials::resolve(
        request.dist_server.as_deref(),
        request.username.as_deref(),
        request.password.as_deref(),
        settings,
        reporter,
    )?;
    let repository = ScmRepository::parse(&request.staging_url)?.with_credentials(creds);
    let provider = manager.provider_for(&repository)?;

    // A leftover working copy may hold uncommitted removals; checking out over
    // it is an update that keeps them and hides the remote entries.
    if fs.exists(&request.cleanup_directory.join(SVN_ADMIN_DIR)) {
        tracing::debug!(path = %request.cleanup_directory.display(), "clearing stale checkout");
        fs.remove_dir_all(&request.cleanup_directory)?;
    }

    // 1. Checkout
    reporter.step(&format!("Checking out dist from: {}", request.staging_url));
    let checkout = provider
        .checkout(&repository, &request.cleanup_directory)
        .await?;
    if !checkout.success {
        return Err(ScmError::CheckoutFailed {
            message: checkout.provider_message,
            output: checkout.command_output,
        }
        .into());
    }

    let entries: Vec<PathBuf> = fs
        .list_dir(&request.cleanup_directory)
        .with_context(|| {
            format!(
                "listing checkout {}",
                request.cleanup_directory.display()
            )
        })?
        .into_iter()
        .filter(|p| p.file_name() != Some(OsStr::new(SVN_ADMIN_DIR)))
        .collect();
    if entries.is_empty() {
        reporter.info("Staging area is already empty; nothing to clean.");
        return Ok(CleanupOutcome::AlreadyEmpty);
    }

    // 2. Remove
    let file_set = ScmFileSet::new(&request.cleanup_directory, entries);
    reporter.step(&format!("Removing {} staged entries", file_set.files.len()));
    let removed = provider
        .remove(&repository, &file_set, REMOVE_MESSAGE)
        .await?;
    if !removed.success {
        return Err(ScmError::RemoveFailed {
            message: removed.provider_message,
            output: removed.command_output,
        }
        .into());
    }

    if request.dry_run {
        reporter.warn(&format!(
            "Dry run: {} removals scheduled in {} but not committed",
            file_set.files.len(),
            request.cleanup_directory.display()
        ));
        return Ok(CleanupOutcome::DryRun {
            pending: file_set.files,
        });
    }

    // 3. Checkin
    let artifact_id = if request.artifact_id.is_empty() {
        reporter.warn(
            "No artifact id configured; the commit message will not name the component",
        );
        "unknown artifact"
    } else {
        request.artifact_id.as_str()
    };
    reporter.step(&format!("Cleaning distribution area for: {artifact_id}"));
    let checkin = provider
        .checkin(&repository, &file_set, &checkin_message(artifact_id))
        .await?;
    if !checkin.result.success {
        return Err(ScmError::CheckinFailed {
            message: checkin.result.provider_message,
            output: checkin.result.command_output,
        }
        .into());
    }

    match checkin.revision {
        Some(rev) => reporter.success(&format!("Staging area cleaned in revision {rev}")),
        None => reporter.success("Staging area cleaned"),
    }
    Ok(CleanupOutcome::Committed {
        removed: file_set.files,
        revision: checkin.revision,
    })
}
