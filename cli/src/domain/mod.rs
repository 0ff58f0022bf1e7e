//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod artifact;
pub mod config;
pub mod error;
pub mod scm;
pub mod settings;

pub use artifact::{DetachPlan, is_distribution_archive, plan_detachment, side_file_path};
pub use config::{ReleaseConfig, validate_config_key, validate_config_value};
pub use error::{ConfigError, DetachError, ScmError};
pub use scm::{CheckinResult, Credentials, ScmFileSet, ScmRepository, ScmResult, SkipReason};
pub use settings::{ReleaseSettings, ServerCredentials};
