//! Domain types and validators for the project configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::artifact::{
    DEFAULT_ARCHIVE_SUFFIXES, DEFAULT_SIDE_SUFFIXES, normalize_suffix, normalize_suffixes,
};
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Name of the plugin directory under the build directory.
pub const WORKING_DIR_NAME: &str = "commons-release-plugin";

/// Name of the checkout directory under the working directory.
pub const CLEANUP_DIR_NAME: &str = "scm-cleanup";

/// File name of the attached-artifact manifest under the build directory.
pub const MANIFEST_FILE_NAME: &str = "attached-artifacts.json";

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "artifact_id",
    "build_directory",
    "working_directory",
    "detach.manifest",
    "detach.archive_suffixes",
    "detach.side_suffixes",
    "staging.url",
    "staging.cleanup_directory",
    "staging.dry_run",
    "staging.is_dist_module",
    "staging.dist_server",
];

const BOOL_KEYS: &[&str] = &["staging.dry_run", "staging.is_dist_module"];
const SUFFIX_LIST_KEYS: &[&str] = &["detach.archive_suffixes", "detach.side_suffixes"];
const VALID_BOOLS: &[&str] = &["true", "false"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Project configuration stored in `commons-release.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Module artifact id, used in commit messages. Falls back to the manifest's.
    pub artifact_id: String,
    /// Build output directory (`target` by default).
    pub build_directory: PathBuf,
    /// Plugin working directory; `<build_directory>/commons-release-plugin` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,
    /// Distribution detachment settings.
    pub detach: DetachConfig,
    /// Staging cleanup settings.
    pub staging: StagingConfig,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            artifact_id: String::new(),
            build_directory: PathBuf::from("target"),
            working_directory: None,
            detach: DetachConfig::default(),
            staging: StagingConfig::default(),
        }
    }
}

/// Detachment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetachConfig {
    /// Attached-artifact manifest; `<build_directory>/attached-artifacts.json` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
    /// File name suffixes of archives to detach.
    pub archive_suffixes: Vec<String>,
    /// Signature/checksum suffixes copied with each archive.
    pub side_suffixes: Vec<String>,
}

impl Default for DetachConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            archive_suffixes: DEFAULT_ARCHIVE_SUFFIXES.iter().map(|s| (*s).to_string()).collect(),
            side_suffixes: DEFAULT_SIDE_SUFFIXES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Staging cleanup configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Staging location, e.g. `scm:svn:https://dist.apache.org/repos/dist/dev/commons/foo`.
    pub url: String,
    /// Checkout directory; `<working_directory>/scm-cleanup` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup_directory: Option<PathBuf>,
    /// Check out and schedule removals, but never commit.
    pub dry_run: bool,
    /// Opt-in flag; cleanup only runs in distribution modules.
    pub is_dist_module: bool,
    /// Server id in the settings file to take credentials from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_server: Option<String>,
}

impl ReleaseConfig {
    /// Effective working directory.
    #[must_use]
    pub fn working_directory(&self) -> PathBuf {
        self.working_directory
            .clone()
            .unwrap_or_else(|| self.build_directory.join(WORKING_DIR_NAME))
    }

    /// Effective checkout directory for the staging cleanup.
    #[must_use]
    pub fn cleanup_directory(&self) -> PathBuf {
        self.staging
            .cleanup_directory
            .clone()
            .unwrap_or_else(|| self.working_directory().join(CLEANUP_DIR_NAME))
    }

    /// Effective attached-artifact manifest path.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.detach
            .manifest
            .clone()
            .unwrap_or_else(|| self.build_directory.join(MANIFEST_FILE_NAME))
    }

    /// Applies a validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        let optional_path = || {
            if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            }
        };
        match key {
            "artifact_id" => self.artifact_id = value.to_string(),
            "build_directory" => self.build_directory = PathBuf::from(value),
            "working_directory" => self.working_directory = optional_path(),
            "detach.manifest" => self.detach.manifest = optional_path(),
            "detach.archive_suffixes" => self.detach.archive_suffixes = split_suffixes(value)?,
            "detach.side_suffixes" => self.detach.side_suffixes = split_suffixes(value)?,
            "staging.url" => self.staging.url = value.to_string(),
            "staging.cleanup_directory" => self.staging.cleanup_directory = optional_path(),
            "staging.dry_run" => self.staging.dry_run = value == "true",
            "staging.is_dist_module" => self.staging.is_dist_module = value == "true",
            "staging.dist_server" => {
                self.staging.dist_server = (!value.is_empty()).then(|| value.to_string());
            }
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

fn split_suffixes(value: &str) -> Result<Vec<String>, ConfigError> {
    let parts: Vec<&str> = value.split(',').filter(|s| !s.trim().is_empty()).collect();
    normalize_suffixes(&parts)
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    if BOOL_KEYS.contains(&key) && !VALID_BOOLS.contains(&value) {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: VALID_BOOLS.join(", "),
        }
        .into());
    }
    if SUFFIX_LIST_KEYS.contains(&key) {
        let mut any = false;
        for part in value.split(',').filter(|s| !s.trim().is_empty()) {
            normalize_suffix(part)?;
            any = true;
        }
        if !any {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                valid: "comma-separated suffixes, e.g. .zip,.tar.gz".to_string(),
            }
            .into());
        }
    }
    if key == "build_directory" && value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: "a non-empty path".to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
