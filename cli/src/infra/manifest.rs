//! Infrastructure implementation of the `ManifestStore` port (JSON on disk).

use std::path::Path;

use anyhow::{Context, Result};
use release_common::ArtifactManifest;

use crate::application::ports::ManifestStore;

/// Reads and writes `attached-artifacts.json`.
pub struct JsonManifestStore;

impl ManifestStore for JsonManifestStore {
    fn load(&self, path: &Path) -> Result<ArtifactManifest> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read artifact manifest {}", path.display()))?;
        let manifest: ArtifactManifest = serde_json::from_str(&content)
            .with_context(|| format!("cannot parse artifact manifest {}", path.display()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn save(&self, path: &Path, manifest: &ArtifactManifest) -> Result<()> {
        let content =
            serde_json::to_string_pretty(manifest).context("cannot serialize artifact manifest")?;
        // The manifest at `path` is either the old or the new list, never partial.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content)
            .with_context(|| format!("cannot write {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("cannot replace {}", path.display()))
    }
}
