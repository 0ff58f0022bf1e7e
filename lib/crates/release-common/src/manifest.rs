//! The attached-artifact manifest: the list of files the build will publish.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Artifact;

/// Problems found while validating a manifest.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("Artifact '{0}' is listed more than once in the manifest.")]
    DuplicateFile(String),

    #[error("Artifact entry has no file name: '{0}'")]
    MissingFileName(String),
}

/// Persisted attached-artifact list, one per build module.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactManifest {
    /// Module artifact identifier, e.g. `commons-text`.
    #[serde(default)]
    pub artifact_id: String,
    /// Artifacts currently attached for publication.
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl ArtifactManifest {
    /// Checks that every entry names a file and no file is attached twice.
    ///
    /// # Errors
    ///
    /// Returns the first [`ManifestError`] found.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for artifact in &self.artifacts {
            if artifact.file_name().is_none() {
                return Err(ManifestError::MissingFileName(
                    artifact.file.display().to_string(),
                ));
            }
            if !seen.insert(&artifact.file) {
                return Err(ManifestError::DuplicateFile(
                    artifact.file.display().to_string(),
                ));
            }
        }
        Ok(())
    }
}
