//! Domain types and validators for gcf-deploy configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.
//! Every default reproduces the values the tool shipped with.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::function::FunctionTemplate;
use crate::domain::target::DeploymentTarget;

// ── Constants ────────────────────────────────────────────────────────────────

/// Number of indexed functions created per run.
pub const DEFAULT_COUNT: u32 = 50;

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "project_id",
    "location",
    "function_name",
    "source_dir",
    "archive_path",
    "object_name",
    "bucket_location",
    "count",
    "function.runtime",
    "function.entry_point",
    "function.memory",
    "function.timeout_seconds",
    "function.max_instances",
    "function.description",
    "endpoints.storage",
    "endpoints.functions",
    "operation.poll_interval_ms",
    "operation.timeout_secs",
];

const NUMERIC_KEYS: &[&str] = &[
    "count",
    "function.timeout_seconds",
    "function.max_instances",
    "operation.poll_interval_ms",
    "operation.timeout_secs",
];

const URL_KEYS: &[&str] = &["endpoints.storage", "endpoints.functions"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.gcf-deploy/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeployConfig {
    pub project_id: String,
    pub location: String,
    /// Base name; deployed functions are `<function_name>-<index>`.
    pub function_name: String,
    /// Directory whose contents become the function source.
    pub source_dir: PathBuf,
    /// Where the zip archive is written. Overwritten on every run.
    pub archive_path: PathBuf,
    /// Object key of the uploaded archive.
    pub object_name: String,
    pub bucket_location: String,
    pub count: u32,
    pub function: FunctionSettings,
    pub endpoints: Endpoints,
    pub operation: OperationSettings,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            project_id: "google-project-id".to_string(),
            location: "country-location".to_string(),
            function_name: "function-v2".to_string(),
            source_dir: PathBuf::from("helloworld/helloworldHttp"),
            archive_path: PathBuf::from("/tmp/function-source.zip"),
            object_name: "function-source.zip".to_string(),
            bucket_location: "US".to_string(),
            count: DEFAULT_COUNT,
            function: FunctionSettings::default(),
            endpoints: Endpoints::default(),
            operation: OperationSettings::default(),
        }
    }
}

/// Build and runtime settings shared by every deployed function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FunctionSettings {
    pub runtime: String,
    pub entry_point: String,
    pub memory: String,
    pub timeout_seconds: u32,
    pub max_instances: u32,
    pub description: String,
}

impl Default for FunctionSettings {
    fn default() -> Self {
        Self {
            runtime: "nodejs20".to_string(),
            entry_point: "helloHttp".to_string(),
            memory: "256M".to_string(),
            timeout_seconds: 60,
            max_instances: 1,
            description: "My Google Cloud Function v2".to_string(),
        }
    }
}

/// REST API base URLs. Overridden in tests to point at a mock server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub storage: String,
    pub functions: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            storage: "https://storage.googleapis.com".to_string(),
            functions: "https://cloudfunctions.googleapis.com".to_string(),
        }
    }
}

/// Long-running operation polling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OperationSettings {
    pub poll_interval_ms: u64,
    pub timeout_secs: u64,
}

impl Default for OperationSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            timeout_secs: 900,
        }
    }
}

/// Per-invocation overrides taken from flags or environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub project_id: Option<String>,
    pub location: Option<String>,
    pub function_name: Option<String>,
    pub source_dir: Option<PathBuf>,
    pub count: Option<u32>,
}

impl DeployConfig {
    /// Apply overrides on top of the file values.
    #[must_use]
    pub fn with_overrides(mut self, o: Overrides) -> Self {
        if let Some(v) = o.project_id {
            self.project_id = v;
        }
        if let Some(v) = o.location {
            self.location = v;
        }
        if let Some(v) = o.function_name {
            self.function_name = v;
        }
        if let Some(v) = o.source_dir {
            self.source_dir = v;
        }
        if let Some(v) = o.count {
            self.count = v;
        }
        self
    }

    #[must_use]
    pub fn target(&self) -> DeploymentTarget {
        DeploymentTarget::new(&self.project_id, &self.location, &self.function_name)
    }

    #[must_use]
    pub fn template(&self) -> FunctionTemplate {
        FunctionTemplate::from(&self.function)
    }

    /// Set a whitelisted key. Call the validators first.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        let num = || value.parse::<u64>().unwrap_or_default();
        match key {
            "project_id" => self.project_id = value.to_string(),
            "location" => self.location = value.to_string(),
            "function_name" => self.function_name = value.to_string(),
            "source_dir" => self.source_dir = PathBuf::from(value),
            "archive_path" => self.archive_path = PathBuf::from(value),
            "object_name" => self.object_name = value.to_string(),
            "bucket_location" => self.bucket_location = value.to_string(),
            "count" => self.count = u32::try_from(num())?,
            "function.runtime" => self.function.runtime = value.to_string(),
            "function.entry_point" => self.function.entry_point = value.to_string(),
            "function.memory" => self.function.memory = value.to_string(),
            "function.timeout_seconds" => self.function.timeout_seconds = u32::try_from(num())?,
            "function.max_instances" => self.function.max_instances = u32::try_from(num())?,
            "function.description" => self.function.description = value.to_string(),
            "endpoints.storage" => self.endpoints.storage = value.to_string(),
            "endpoints.functions" => self.endpoints.functions = value.to_string(),
            "operation.poll_interval_ms" => self.operation.poll_interval_ms = num(),
            "operation.timeout_secs" => self.operation.timeout_secs = num(),
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |expected: &str| -> anyhow::Error {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
        .into()
    };

    if NUMERIC_KEYS.contains(&key) {
        return match value.parse::<u64>() {
            Ok(n) if n > 0 && (key.starts_with("operation.") || u32::try_from(n).is_ok()) => Ok(()),
            _ => Err(invalid("a positive integer")),
        };
    }
    if URL_KEYS.contains(&key) {
        if value.starts_with("https://") || value.starts_with("http://") {
            return Ok(());
        }
        return Err(invalid("an http(s) URL"));
    }
    if value.trim().is_empty() {
        return Err(invalid("a non-empty value"));
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
