pub mod manifest;
pub mod types;

pub use manifest::{ArtifactManifest, ManifestError};
pub use types::*;
