//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `release_common`; never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;
use release_common::ArtifactManifest;

use crate::domain::config::ReleaseConfig;
use crate::domain::scm::{CheckinResult, ScmFileSet, ScmRepository, ScmResult};
use crate::domain::settings::ReleaseSettings;

// ── SCM Ports ─────────────────────────────────────────────────────────────────

/// The capability set every SCM provider offers.
#[allow(async_fn_in_trait)]
pub trait ScmProvider {
    /// Check `repository` out into `directory`.
    async fn checkout(&self, repository: &ScmRepository, directory: &Path) -> Result<ScmResult>;
    /// Schedule `files` for removal in the working copy.
    async fn remove(
        &self,
        repository: &ScmRepository,
        files: &ScmFileSet,
        message: &str,
    ) -> Result<ScmResult>;
    /// Commit pending changes on `files` with `message`.
    async fn checkin(
        &self,
        repository: &ScmRepository,
        files: &ScmFileSet,
        message: &str,
    ) -> Result<CheckinResult>;
}

/// Selects the provider for a repository based on its provider name.
pub trait ScmManager {
    type Provider: ScmProvider;

    /// Returns the provider registered for `repository.provider()`.
    ///
    /// # Errors
    ///
    /// Returns `ScmError::UnsupportedProvider` when none is registered.
    fn provider_for(&self, repository: &ScmRepository) -> Result<&Self::Provider>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
    /// Run a program with stdin piped from `stdin`.
    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit an informational message.
    fn info(&self, message: &str);
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Raw local filesystem operations used by the services.
pub trait LocalFs {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
    /// Create `path` and all missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Copy the bytes of `from` to `to`, overwriting `to`.
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;
    /// Immediate children of `dir`, sorted by path.
    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>>;
    /// Delete `path` and everything under it.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
}

// ── Configuration and Persistence Ports ───────────────────────────────────────

/// Abstracts loading and saving the project configuration.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    fn load(&self) -> Result<ReleaseConfig>;
    /// Persist the configuration.
    fn save(&self, config: &ReleaseConfig) -> Result<()>;
    /// Path of the backing file.
    fn path(&self) -> Result<PathBuf>;
}

/// Abstracts loading the user settings (named server credentials).
pub trait SettingsStore {
    /// Load the settings, returning empty settings when no file exists.
    fn load(&self) -> Result<ReleaseSettings>;
}

/// Abstracts reading and writing the attached-artifact manifest.
pub trait ManifestStore {
    /// Load the manifest at `path`.
    fn load(&self, path: &Path) -> Result<ArtifactManifest>;
    /// Write `manifest` to `path`.
    fn save(&self, path: &Path, manifest: &ArtifactManifest) -> Result<()>;
}
