//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, and the pretty printer for command reports.

use anyhow::{Context, Result};
use serde::Serialize;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Pretty-print any report as JSON on stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{json}");
    Ok(())
}

/// Stable machine-readable code for an error chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    use crate::domain::error::{ConfigError, DetachError, ScmError};

    if let Some(scm) = err.downcast_ref::<ScmError>() {
        return match scm {
            ScmError::InvalidUrl(_) | ScmError::UnsupportedProvider(_) => "invalid_scm_url",
            ScmError::CheckoutFailed { .. } => "checkout_failed",
            ScmError::RemoveFailed { .. } => "remove_failed",
            ScmError::CheckinFailed { .. } => "checkin_failed",
        };
    }
    if err.downcast_ref::<DetachError>().is_some() {
        return "missing_artifact";
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return "invalid_config";
    }
    "error"
}
