//! Infrastructure implementation of the `SettingsStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::SettingsStore;
use crate::domain::settings::ReleaseSettings;

/// Environment variable overriding the settings file path.
pub const SETTINGS_ENV: &str = "COMMONS_RELEASE_SETTINGS";

/// Reads `~/.commons-release/settings.yaml`.
#[derive(Debug, Clone, Default)]
pub struct YamlSettingsStore {
    explicit: Option<PathBuf>,
}

impl YamlSettingsStore {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { explicit: path }
    }

    /// Path of the settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the home directory cannot
    /// be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var(SETTINGS_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".commons-release").join("settings.yaml"))
    }
}

impl SettingsStore for YamlSettingsStore {
    fn load(&self) -> Result<ReleaseSettings> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(ReleaseSettings::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }
}
