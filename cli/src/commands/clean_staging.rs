//! `commons-release clean-staging`: empty the remote SVN staging area.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ManifestStore;
use crate::application::services::config_service;
use crate::application::services::staging_cleanup::{CleanupRequest, clean_staging};
use crate::domain::config::ReleaseConfig;
use crate::infra::fs::HostFs;
use crate::infra::manifest::JsonManifestStore;
use crate::infra::scm_manager::DefaultScmManager;
use crate::infra::settings::YamlSettingsStore;

/// Environment variable supplying `--username`.
pub const USERNAME_ENV: &str = "COMMONS_RELEASE_USERNAME";
/// Environment variable supplying `--password`.
pub const PASSWORD_ENV: &str = "COMMONS_RELEASE_PASSWORD";

/// Arguments for the clean-staging command.
#[derive(Args, Debug, Default)]
pub struct CleanStagingArgs {
    /// Staging area as `scm:svn:<url>` [default: staging.url]
    #[arg(long, value_name = "SCM_URL")]
    pub staging_url: Option<String>,

    /// Run as the distribution module (cleanup is skipped otherwise)
    /// [default: staging.is_dist_module]
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub dist_module: Option<bool>,

    /// Schedule removals in the local checkout without committing
    /// [default: staging.dry_run]
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub dry_run: Option<bool>,

    /// Server id in the settings file to take credentials from
    #[arg(long, value_name = "ID")]
    pub dist_server: Option<String>,

    /// SVN username [default: $USER]
    #[arg(long, env = USERNAME_ENV)]
    pub username: Option<String>,

    /// SVN password
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    /// Local checkout directory [default: <working_directory>/scm-cleanup]
    #[arg(long, value_name = "DIR")]
    pub cleanup_directory: Option<PathBuf>,

    /// Commit without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl CleanStagingArgs {
    /// Merges flags over `config` into a cleanup request.
    #[must_use]
    pub fn request(&self, config: &ReleaseConfig) -> CleanupRequest {
        CleanupRequest {
            artifact_id: config.artifact_id.clone(),
            staging_url: self
                .staging_url
                .clone()
                .unwrap_or_else(|| config.staging.url.clone()),
            is_dist_module: self.dist_module.unwrap_or(config.staging.is_dist_module),
            dry_run: self.dry_run.unwrap_or(config.staging.dry_run),
            working_directory: config.working_directory(),
            cleanup_directory: self
                .cleanup_directory
                .clone()
                .unwrap_or_else(|| config.cleanup_directory()),
            dist_server: self
                .dist_server
                .clone()
                .or_else(|| config.staging.dist_server.clone()),
            username: self
                .username
                .clone()
                .or_else(|| std::env::var("USER").ok()),
            password: self.password.clone(),
        }
    }
}

/// Run the clean-staging command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read, the prompt fails,
/// or any SCM step fails.
pub async fn run(app: &AppContext, args: &CleanStagingArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let mut request = args.request(&config);
    if request.artifact_id.is_empty() {
        // Fall back to the id recorded by the build.
        if let Ok(manifest) = JsonManifestStore.load(&config.manifest_path()) {
            request.artifact_id = manifest.artifact_id;
        }
    }

    if request.skip_reason().is_none() && !request.dry_run {
        let prompt = format!(
            "Remove everything under {} and commit?",
            request.staging_url
        );
        if !app.confirm(&prompt, true)? {
            app.output.info("Cancelled.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let outcome = clean_staging(
        &request,
        &DefaultScmManager::from_env(),
        &YamlSettingsStore::new(None),
        &HostFs,
        &app.reporter(),
    )
    .await?;

    app.renderer()
        .render_cleanup(&outcome.to_report(&request.staging_url))?;
    Ok(ExitCode::SUCCESS)
}
