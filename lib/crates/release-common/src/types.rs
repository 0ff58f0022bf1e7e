use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A build output attached to the project for publication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artifact {
    /// Path of the produced file; a relative path is taken relative to the
    /// manifest's directory.
    pub file: PathBuf,
    /// Type tag, typically the extension (`zip`, `tar.gz`, `zip.asc`).
    #[serde(rename = "type")]
    pub artifact_type: String,
    /// Optional classifier (`src`, `bin`, `javadoc`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl Artifact {
    /// Build an artifact whose type tag is derived from the file name.
    ///
    /// Double extensions used by tarballs (`.tar.gz`, `.tar.bz2`) are kept
    /// whole, and signature/checksum suffixes keep the extension they sign
    /// (`foo.zip.asc` has type `zip.asc`).
    #[must_use]
    pub fn from_file(file: impl Into<PathBuf>, classifier: Option<String>) -> Self {
        let file = file.into();
        let artifact_type = type_from_file_name(&file);
        Self {
            file,
            artifact_type,
            classifier,
        }
    }

    /// The file name component, if it is valid UTF-8.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file.file_name().and_then(|n| n.to_str())
    }
}

const DOUBLE_EXTENSIONS: &[&str] = &[".tar.gz", ".tar.bz2", ".tar.xz"];
const SIDE_EXTENSIONS: &[&str] = &[".asc", ".md5", ".sha1", ".sha256", ".sha512"];

fn type_from_file_name(file: &Path) -> String {
    let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
        return String::new();
    };
    let (stem, side) = SIDE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(*ext).map(|stem| (stem, Some(&ext[1..]))))
        .unwrap_or((name, None));
    let base = DOUBLE_EXTENSIONS
        .iter()
        .find(|ext| stem.ends_with(**ext))
        .map(|ext| &ext[1..])
        .or_else(|| stem.rsplit_once('.').map(|(_, ext)| ext))
        .unwrap_or_default();
    match side {
        Some(side) if base.is_empty() => side.to_string(),
        Some(side) => format!("{base}.{side}"),
        None => base.to_string(),
    }
}

/// Result of one detachment run, rendered by `commons-release detach --json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetachmentReport {
    /// Directory the detached files were copied into.
    pub working_directory: PathBuf,
    /// Artifacts removed from the attached list.
    pub detached: Vec<Artifact>,
    /// Every file written into the working directory (archives and side-files).
    pub copied: Vec<PathBuf>,
    /// Artifacts left attached.
    pub kept: Vec<Artifact>,
}

/// How a staging cleanup run ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CleanupStatus {
    /// Guard conditions were not met; nothing was touched.
    Skipped,
    /// The staging area had no entries to remove.
    AlreadyEmpty,
    /// Entries were scheduled for removal locally but not committed.
    DryRun,
    /// Removal was committed to the remote repository.
    Committed,
}

/// Result of one staging cleanup run, rendered by `commons-release clean-staging --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanupReport {
    pub status: CleanupStatus,
    /// Staging URL the run targeted (empty when skipped on a missing URL).
    pub staging_url: String,
    /// Human-readable reason, set when `status` is `skipped`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Entries removed (or that would have been removed on a dry run).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<PathBuf>,
    /// Revision created by the commit, when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
}
