//! SCM value types: repository URLs, credentials, file sets and command results.
//!
//! Pure functions only: no I/O, no async, no process execution.

use std::fmt;
use std::path::PathBuf;

use crate::domain::error::ScmError;

/// Provider name for Subversion repositories.
pub const SVN_PROVIDER: &str = "svn";

/// Message attached to the remove step.
pub const REMOVE_MESSAGE: &str = "Cleaning up staging area";

/// Working-copy administrative directory, never part of the remove set.
pub const SVN_ADMIN_DIR: &str = ".svn";

/// Commit message for the staging cleanup of `artifact_id`.
#[must_use]
pub fn checkin_message(artifact_id: &str) -> String {
    format!("Cleaning distribution area for: {artifact_id}")
}

// ── Credentials ──────────────────────────────────────────────────────────────

/// Username/password pair used to authenticate SCM commands.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ── Repository ───────────────────────────────────────────────────────────────

/// A parsed `scm:<provider>:<url>` location plus the credentials to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScmRepository {
    provider: String,
    url: String,
    credentials: Option<Credentials>,
}

impl ScmRepository {
    /// Parses an SCM URL such as `scm:svn:https://dist.apache.org/repos/dist/dev/commons/foo`.
    ///
    /// The provider may be separated from the URL by `:` or `|`.
    ///
    /// # Errors
    ///
    /// Returns [`ScmError::InvalidUrl`] when the `scm:` prefix, the provider or
    /// the provider-specific URL is missing.
    pub fn parse(scm_url: &str) -> Result<Self, ScmError> {
        let invalid = || ScmError::InvalidUrl(scm_url.to_string());
        let rest = scm_url.trim().strip_prefix("scm:").ok_or_else(invalid)?;
        let (provider, url) = rest.split_once([':', '|']).ok_or_else(invalid)?;
        if provider.is_empty() || url.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            provider: provider.to_ascii_lowercase(),
            url: url.to_string(),
            credentials: None,
        })
    }

    /// Attaches the credentials used for remote commands.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Provider name, lowercase (`svn`).
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Provider-specific URL (`https://...`).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

// ── File sets and results ────────────────────────────────────────────────────

/// Files inside a working copy that an SCM command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScmFileSet {
    pub base_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

impl ScmFileSet {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, files: Vec<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            files,
        }
    }
}

/// Outcome of one provider command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScmResult {
    pub success: bool,
    /// Short provider diagnosis (first error line, or exit status).
    pub provider_message: String,
    /// Full command output, kept verbatim for error reports.
    pub command_output: String,
}

impl ScmResult {
    #[must_use]
    pub fn ok(command_output: impl Into<String>) -> Self {
        Self {
            success: true,
            provider_message: String::new(),
            command_output: command_output.into(),
        }
    }

    #[must_use]
    pub fn failed(provider_message: impl Into<String>, command_output: impl Into<String>) -> Self {
        Self {
            success: false,
            provider_message: provider_message.into(),
            command_output: command_output.into(),
        }
    }
}

/// Outcome of a checkin, with the created revision when reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinResult {
    pub result: ScmResult,
    pub revision: Option<u64>,
}

/// Extracts `N` from svn's `Committed revision N.` line.
#[must_use]
pub fn parse_committed_revision(output: &str) -> Option<u64> {
    output.lines().find_map(|line| {
        line.trim()
            .strip_prefix("Committed revision ")?
            .trim_end_matches('.')
            .parse()
            .ok()
    })
}

// ── Guards ───────────────────────────────────────────────────────────────────

/// Why a staging cleanup run did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The module is not flagged as a distribution module.
    NotDistModule,
    /// No staging URL is configured.
    NoStagingUrl,
}

impl SkipReason {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NotDistModule => {
                "This module is marked as a non distribution or assembly module, and the cleanup will not run."
            }
            Self::NoStagingUrl => "staging.url is not set, the cleanup will not run.",
        }
    }
}

/// Evaluates the opt-in guards in order.
#[must_use]
pub fn skip_reason(is_dist_module: bool, staging_url: &str) -> Option<SkipReason> {
    if !is_dist_module {
        return Some(SkipReason::NotDistModule);
    }
    if staging_url.trim().is_empty() {
        return Some(SkipReason::NoStagingUrl);
    }
    None
}
