//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `gcf_common` and never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use gcf_common::{Bucket, BucketInsert, CloudFunction, Operation, Policy, StoredObject};
use serde::Serialize;

use crate::domain::config::DeployConfig;
use crate::domain::function::CreateFunctionRequest;

// ── Value Types ───────────────────────────────────────────────────────────────

/// What the archiver wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Regular files stored (directory entries not counted).
    pub files: usize,
    /// Size of the archive on disk.
    pub bytes: u64,
    /// Hex SHA-256 of the archive file.
    pub sha256: String,
}

// ── Local Port Traits ─────────────────────────────────────────────────────────

/// Packs a source directory into a single archive file.
#[allow(async_fn_in_trait)]
pub trait SourceArchiver {
    /// Archive the contents of `source_dir` into `dest`, replacing any
    /// existing file.
    async fn archive(&self, source_dir: &Path, dest: &Path) -> Result<ArchiveSummary>;
}

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    fn load(&self) -> Result<DeployConfig>;
    /// Persist the given configuration.
    fn save(&self, config: &DeployConfig) -> Result<()>;
    /// Location of the backing file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Cloud Port Traits ─────────────────────────────────────────────────────────

/// Supplies OAuth2 bearer tokens for API calls.
#[allow(async_fn_in_trait)]
pub trait AccessTokenSource {
    async fn access_token(&self) -> Result<String>;
}

/// Object storage operations: bucket creation and single-shot upload.
#[allow(async_fn_in_trait)]
pub trait ObjectStorage {
    /// Create a bucket in the configured project.
    async fn create_bucket(&self, bucket: &BucketInsert) -> Result<Bucket>;
    /// Upload a local file as `bucket/object` in one request.
    async fn upload_object(&self, bucket: &str, object: &str, file: &Path)
    -> Result<StoredObject>;
}

/// Serverless function control-plane operations.
#[allow(async_fn_in_trait)]
pub trait FunctionService {
    /// Start creating a function; returns the long-running operation.
    async fn create_function(&self, request: &CreateFunctionRequest) -> Result<Operation>;
    /// Wait until `operation` is done.
    ///
    /// Implementations must return an error when the finished operation
    /// carries an error status.
    async fn wait_operation(&self, operation: Operation) -> Result<Operation>;
    /// List all functions under `parent` (every page).
    async fn list_functions(&self, parent: &str) -> Result<Vec<CloudFunction>>;
    /// Fetch the IAM policy of a function resource.
    async fn get_iam_policy(&self, resource: &str) -> Result<Policy>;
    /// Replace the IAM policy of a function resource.
    async fn set_iam_policy(&self, resource: &str, policy: &Policy) -> Result<Policy>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a non-fatal error message.
    fn error(&self, message: &str);
}
