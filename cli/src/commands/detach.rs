//! `commons-release detach`: move distribution archives out of the
//! attached-artifact list.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ManifestStore;
use crate::application::services::config_service;
use crate::application::services::detachment::{DetachSettings, detach_distributions};
use crate::domain::artifact::normalize_suffixes;
use crate::domain::config::ReleaseConfig;
use crate::infra::fs::HostFs;
use crate::infra::manifest::JsonManifestStore;

/// Arguments for the detach command.
#[derive(Args, Debug, Default)]
pub struct DetachArgs {
    /// Attached-artifact manifest [default: <build_directory>/attached-artifacts.json]
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Directory receiving the detached copies
    #[arg(long, value_name = "DIR")]
    pub working_directory: Option<PathBuf>,

    /// Distribution archive suffix; repeat to replace the configured list
    #[arg(long = "archive-suffix", value_name = "SUFFIX")]
    pub archive_suffixes: Vec<String>,

    /// Signature/checksum suffix; repeat to replace the configured list
    #[arg(long = "side-suffix", value_name = "SUFFIX")]
    pub side_suffixes: Vec<String>,
}

impl DetachArgs {
    /// Merges flags over `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a suffix is invalid.
    pub fn settings(&self, config: &ReleaseConfig) -> Result<DetachSettings> {
        let pick = |flags: &[String], configured: &[String]| {
            if flags.is_empty() {
                normalize_suffixes(configured)
            } else {
                normalize_suffixes(flags)
            }
        };
        Ok(DetachSettings {
            working_directory: self
                .working_directory
                .clone()
                .unwrap_or_else(|| config.working_directory()),
            base_directory: PathBuf::new(),
            archive_suffixes: pick(&self.archive_suffixes, &config.detach.archive_suffixes)?,
            side_suffixes: pick(&self.side_suffixes, &config.detach.side_suffixes)?,
        })
    }
}

/// Run the detach command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or written, an archive is
/// missing, or a copy fails. The manifest is left untouched on error.
pub fn run(app: &AppContext, args: &DetachArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let mut settings = args.settings(&config)?;
    let manifest_path = args
        .manifest
        .clone()
        .unwrap_or_else(|| config.manifest_path());

    settings.base_directory = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let store = JsonManifestStore;
    let mut manifest = store.load(&manifest_path)?;
    let artifacts = std::mem::take(&mut manifest.artifacts);

    let detachment = detach_distributions(artifacts, &settings, &HostFs, &app.reporter())?;

    manifest.artifacts = detachment.remaining;
    if !detachment.report.detached.is_empty() {
        store.save(&manifest_path, &manifest)?;
        tracing::debug!(path = %manifest_path.display(), "manifest updated");
    }

    app.renderer().render_detachment(&detachment.report)?;
    Ok(ExitCode::SUCCESS)
}
