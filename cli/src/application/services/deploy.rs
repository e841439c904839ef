//! Application service: deploy use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits. Steps run strictly in
//! order; only the per-function loop swallows failures.

use std::path::PathBuf;

use anyhow::{Context, Result};
use gcf_common::{
    ApiError, BucketInsert, IamConfiguration, Operation, Policy, UniformBucketLevelAccess,
};
use serde::Serialize;

use crate::application::ports::{
    ArchiveSummary, FunctionService, ObjectStorage, ProgressReporter, SourceArchiver,
};
use crate::domain::bucket::validate_bucket_name;
use crate::domain::config::DeployConfig;
use crate::domain::function::FunctionTemplate;
use crate::domain::policy::grant_public_invoker;
use crate::domain::target::DeploymentTarget;

/// Everything one deploy run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct DeployPlan {
    pub target: DeploymentTarget,
    pub template: FunctionTemplate,
    pub source_dir: PathBuf,
    pub archive_path: PathBuf,
    pub bucket_name: String,
    pub bucket_location: String,
    pub object_name: String,
    /// Functions `<name>-1` through `<name>-<count>` are created.
    pub count: u32,
}

impl DeployPlan {
    /// Resolve a plan from configuration and a freshly generated bucket name.
    #[must_use]
    pub fn from_config(config: &DeployConfig, bucket_name: String) -> Self {
        Self {
            target: config.target(),
            template: config.template(),
            source_dir: config.source_dir.clone(),
            archive_path: config.archive_path.clone(),
            bucket_name,
            bucket_location: config.bucket_location.clone(),
            object_name: config.object_name.clone(),
            count: config.count,
        }
    }
}

/// Result of one iteration of the deployment loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FunctionResult {
    /// The create operation finished without error.
    Deployed { operation: String },
    /// The iteration failed and was skipped.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionOutcome {
    pub index: u32,
    pub function_id: String,
    #[serde(flatten)]
    pub result: FunctionResult,
}

impl FunctionOutcome {
    #[must_use]
    pub fn is_deployed(&self) -> bool {
        matches!(self.result, FunctionResult::Deployed { .. })
    }
}

/// Outcome of the `deploy` use-case.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    pub bucket: String,
    pub object: String,
    pub archive: ArchiveSummary,
    pub functions: Vec<FunctionOutcome>,
    /// Function whose policy was opened to `allUsers`.
    pub iam_resource: String,
    /// Binding count of the policy as written back.
    pub iam_bindings: usize,
}

impl DeployReport {
    #[must_use]
    pub fn deployed(&self) -> usize {
        self.functions.iter().filter(|f| f.is_deployed()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.functions.len() - self.deployed()
    }
}

/// Archive, upload, deploy `plan.count` functions, then open IAM access.
///
/// Accepts port trait bounds so the caller can inject real or mock
/// implementations. The service never touches `OutputContext` or any
/// presentation type.
///
/// # Errors
///
/// Returns an error if archiving, bucket creation, upload, or the IAM update
/// fails. Failures of individual function deployments are recorded in the
/// report instead.
pub async fn deploy(
    archiver: &impl SourceArchiver,
    storage: &impl ObjectStorage,
    functions: &impl FunctionService,
    reporter: &impl ProgressReporter,
    plan: &DeployPlan,
) -> Result<DeployReport> {
    // Step 1: Zip the source code.
    reporter.step(&format!("archiving {}...", plan.source_dir.display()));
    let archive = archiver
        .archive(&plan.source_dir, &plan.archive_path)
        .await
        .with_context(|| format!("archiving {}", plan.source_dir.display()))?;
    reporter.success(&format!(
        "archived {} files into {} ({} bytes)",
        archive.files,
        archive.path.display(),
        archive.bytes
    ));

    // Step 2: Create the bucket.
    create_bucket(storage, reporter, plan).await?;

    // Step 3: Upload the archive.
    reporter.step("uploading source archive...");
    storage
        .upload_object(&plan.bucket_name, &plan.object_name, &archive.path)
        .await
        .with_context(|| format!("uploading {} to {}", archive.path.display(), plan.bucket_name))?;
    reporter.success("Source code uploaded to Cloud Storage.");

    // Step 4: Deploy the functions, one at a time.
    let outcomes = deploy_functions(functions, reporter, plan).await;

    // Step 5: Open public invocation.
    let iam_resource = plan.target.iam_resource();
    let policy = open_public_access(functions, reporter, &iam_resource).await?;

    Ok(DeployReport {
        bucket: plan.bucket_name.clone(),
        object: plan.object_name.clone(),
        archive,
        functions: outcomes,
        iam_resource,
        iam_bindings: policy.bindings.len(),
    })
}

async fn create_bucket(
    storage: &impl ObjectStorage,
    reporter: &impl ProgressReporter,
    plan: &DeployPlan,
) -> Result<()> {
    validate_bucket_name(&plan.bucket_name)?;
    reporter.step(&format!("creating bucket {}...", plan.bucket_name));
    let request = BucketInsert {
        name: plan.bucket_name.clone(),
        location: plan.bucket_location.clone(),
        iam_configuration: IamConfiguration {
            uniform_bucket_level_access: UniformBucketLevelAccess { enabled: true },
        },
    };
    storage.create_bucket(&request).await.map_err(|e| {
        let conflict = e.downcast_ref::<ApiError>().is_some_and(ApiError::is_conflict);
        if conflict {
            e.context(format!("bucket name {} is already taken", plan.bucket_name))
        } else {
            e.context(format!("creating bucket {}", plan.bucket_name))
        }
    })?;
    reporter.success(&format!("Bucket {} created.", plan.bucket_name));
    Ok(())
}

/// Run the serial create loop over indices `1..=plan.count`.
///
/// Each iteration is awaited to completion before the next starts. A failing
/// iteration is logged and recorded; the loop always runs to the end.
pub async fn deploy_functions(
    functions: &impl FunctionService,
    reporter: &impl ProgressReporter,
    plan: &DeployPlan,
) -> Vec<FunctionOutcome> {
    let mut outcomes = Vec::with_capacity(plan.count as usize);
    for index in 1..=plan.count {
        let function_id = plan.target.function_id(index);
        let result = match deploy_function(functions, reporter, plan, index).await {
            Ok(op) => FunctionResult::Deployed {
                operation: op.name,
            },
            Err(e) => {
                let error = format!("{e:#}");
                tracing::error!(index, function_id = %function_id, %error, "Error in deployment");
                reporter.error(&format!("{function_id}: {error}"));
                FunctionResult::Failed { error }
            }
        };
        outcomes.push(FunctionOutcome {
            index,
            function_id,
            result,
        });
    }
    outcomes
}

/// Deploy the single function `<name>-<index>` and wait for it.
async fn deploy_function(
    functions: &impl FunctionService,
    reporter: &impl ProgressReporter,
    plan: &DeployPlan,
    index: u32,
) -> Result<Operation> {
    let target = &plan.target;
    tracing::info!(
        project_id = %target.project_id,
        location = %target.location,
        function_name = %target.function_name,
        index,
        "preparing function deployment"
    );
    target.validate()?;

    let request = plan
        .template
        .request(target, index, &plan.bucket_name, &plan.object_name);
    tracing::info!(name = %request.function.name, parent = %request.parent, "deploying function");
    if tracing::enabled!(tracing::Level::DEBUG) {
        let body = serde_json::to_string_pretty(&request).context("serializing request")?;
        tracing::debug!("Request object: {body}");
    }

    reporter.step(&format!(
        "deploying {} ({index}/{})...",
        request.function_id, plan.count
    ));
    let operation = functions
        .create_function(&request)
        .await
        .with_context(|| format!("creating {}", request.function.name))?;
    let done = functions
        .wait_operation(operation)
        .await
        .with_context(|| format!("waiting for {}", request.function.name))?;
    reporter.success(&format!("Function {} deployed.", request.function_id));
    Ok(done)
}

/// Read-modify-write the policy of `resource`, appending the public invoker
/// binding. No etag comparison and no deduplication.
///
/// # Errors
///
/// Returns an error if reading or writing the policy fails.
pub async fn open_public_access(
    functions: &impl FunctionService,
    reporter: &impl ProgressReporter,
    resource: &str,
) -> Result<Policy> {
    reporter.warn(&format!(
        "IAM policy target {resource} is the unsuffixed base name, not one of the deployed functions"
    ));
    reporter.step("updating IAM policy...");
    let mut policy = functions
        .get_iam_policy(resource)
        .await
        .with_context(|| format!("reading IAM policy of {resource}"))?;
    grant_public_invoker(&mut policy);
    let written = functions
        .set_iam_policy(resource, &policy)
        .await
        .with_context(|| format!("writing IAM policy of {resource}"))?;
    reporter.success("IAM policy updated to allow public access.");
    Ok(written)
}
