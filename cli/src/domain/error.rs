//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Detachment errors ─────────────────────────────────────────────────────────

/// Errors raised while detaching distribution archives.
#[derive(Debug, Error)]
pub enum DetachError {
    #[error("Attached artifact does not exist: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("Attached artifact path has no file name: {}", .0.display())]
    NoFileName(PathBuf),
}

// ── SCM errors ────────────────────────────────────────────────────────────────

/// Errors raised by the SCM layer. Provider output is carried verbatim.
#[derive(Debug, Error)]
pub enum ScmError {
    #[error("Invalid SCM URL '{0}': expected scm:<provider>:<url>")]
    InvalidUrl(String),

    #[error("No SCM provider registered for '{0}'. Supported providers: svn")]
    UnsupportedProvider(String),

    #[error("Failed to checkout files from SCM: {message} [{output}]")]
    CheckoutFailed { message: String, output: String },

    #[error("Failed to remove files from SCM: {message} [{output}]")]
    RemoveFailed { message: String, output: String },

    #[error("Failed to commit files to SCM: {message} [{output}]")]
    CheckinFailed { message: String, output: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },

    #[error("Invalid file suffix '{0}': must be non-empty and contain no path separators")]
    InvalidSuffix(String),
}
