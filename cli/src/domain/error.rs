//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Deployment errors ─────────────────────────────────────────────────────────

/// Errors raised while preparing a deployment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeployError {
    #[error("Project ID, location, and function name must be specified (missing: {0}).")]
    MissingTarget(String),

    #[error("Invalid bucket name '{0}': must be 3-63 chars of [a-z0-9._-], starting and ending with a letter or digit")]
    InvalidBucketName(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}
