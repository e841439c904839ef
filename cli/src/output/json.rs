//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed document to
//! stdout, including failures.

use anyhow::{Context, Result};
use gcf_common::CloudFunction;
use serde::Serialize;

use crate::application::services::deploy::DeployReport;
use crate::domain::config::DeployConfig;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "...",
///   "details": []
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str, details: &[serde_json::Value]) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
        "details": details,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stateless renderer emitting JSON documents.
pub struct JsonRenderer;

#[derive(Serialize)]
struct ConfigDocument<'a> {
    path: String,
    config: &'a DeployConfig,
}

#[derive(Serialize)]
struct FunctionsDocument<'a> {
    count: usize,
    functions: &'a [CloudFunction],
}

impl JsonRenderer {
    fn print(value: &impl Serialize) -> Result<()> {
        let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// Render the result of a deploy run.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_deploy(report: &DeployReport) -> Result<()> {
        Self::print(report)
    }

    /// Render a function listing.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_functions(functions: &[CloudFunction]) -> Result<()> {
        Self::print(&FunctionsDocument {
            count: functions.len(),
            functions,
        })
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(config: &DeployConfig, path: &std::path::Path) -> Result<()> {
        Self::print(&ConfigDocument {
            path: path.display().to_string(),
            config,
        })
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }
}
