//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::ReleaseConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<ReleaseConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &ReleaseConfig) -> Result<()> {
    store.save(config)
}

/// Load, apply `key = value`, save. Returns the updated configuration.
///
/// Nothing is written when validation fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<ReleaseConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
