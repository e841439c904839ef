//! Application service: list deployed functions.

use anyhow::{Context, Result};
use gcf_common::CloudFunction;

use crate::application::ports::FunctionService;
use crate::domain::target::DeploymentTarget;

/// List the project's functions across every location.
///
/// # Errors
///
/// Returns an error if the project is empty or the list call fails.
pub async fn list_functions(
    functions: &impl FunctionService,
    target: &DeploymentTarget,
) -> Result<Vec<CloudFunction>> {
    if target.project_id.trim().is_empty() {
        anyhow::bail!("Project ID must be specified.");
    }
    let parent = target.all_locations();
    tracing::debug!(%parent, "listing functions");
    functions
        .list_functions(&parent)
        .await
        .with_context(|| format!("listing functions in {parent}"))
}
