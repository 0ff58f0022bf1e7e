//! Application service: SCM credential resolution.

use anyhow::{Context, Result};

use crate::application::ports::{ProgressReporter, SettingsStore};
use crate::domain::scm::Credentials;

/// Resolves the credentials for remote SCM commands.
///
/// A named server from the settings file wins over explicit
/// `username`/`password`. An unknown server id falls back to the explicit
/// pair with a warning. Returns `None` when no username is available at all,
/// leaving authentication to the SCM client's own configuration.
///
/// # Errors
///
/// Returns an error if the settings file exists but cannot be loaded.
pub fn resolve(
    dist_server: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
    settings: &impl SettingsStore,
    reporter: &impl ProgressReporter,
) -> Result<Option<Credentials>> {
    if let Some(id) = dist_server.filter(|id| !id.is_empty()) {
        let loaded = settings.load().context("cannot load release settings")?;
        if let Some(server) = loaded.server(id) {
            tracing::debug!(server = id, "using credentials from settings");
            return Ok(Some(server.to_credentials()));
        }
        reporter.warn(&format!(
            "Server '{id}' not found in settings; falling back to username/password"
        ));
    }

    Ok(username.filter(|u| !u.is_empty()).map(|u| Credentials {
        username: u.to_string(),
        password: password.filter(|p| !p.is_empty()).map(str::to_string),
    }))
}
