//! `gcf-deploy deploy`: the full archive, upload, deploy, IAM run.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::deploy::{self, DeployPlan};
use crate::domain::bucket::generate_bucket_name;
use crate::domain::config::Overrides;
use crate::infra::archive::ZipArchiver;
use crate::output::TerminalReporter;

/// Arguments for the deploy command.
#[derive(Args, Debug, Default)]
pub struct DeployArgs {
    /// Google Cloud project ID
    #[arg(long, env = "GCF_DEPLOY_PROJECT")]
    pub project: Option<String>,

    /// Region the functions are created in
    #[arg(long, env = "GCF_DEPLOY_LOCATION")]
    pub location: Option<String>,

    /// Base function name; functions are named `<NAME>-1` .. `<NAME>-<COUNT>`
    #[arg(long = "function", env = "GCF_DEPLOY_FUNCTION", value_name = "NAME")]
    pub function_name: Option<String>,

    /// Directory holding the function source
    #[arg(long = "source", value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Number of functions to create
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: Option<u32>,
}

impl From<DeployArgs> for Overrides {
    fn from(args: DeployArgs) -> Self {
        Self {
            project_id: args.project,
            location: args.location,
            function_name: args.function_name,
            source_dir: args.source_dir,
            count: args.count,
        }
    }
}

/// Run the deploy command.
///
/// Partial failures in the deployment loop are reported but still exit 0.
///
/// # Errors
///
/// Returns an error if any fatal step fails.
pub async fn run(app: &AppContext, args: DeployArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?.with_overrides(args.into());
    let plan = DeployPlan::from_config(&config, generate_bucket_name());
    tracing::debug!(?plan, "resolved deploy plan");

    let transport = AppContext::transport()?;
    let storage = AppContext::storage(&transport, &config);
    let functions = AppContext::functions(&transport, &config);
    let reporter = TerminalReporter::new(&app.output);

    let report = deploy::deploy(&ZipArchiver, &storage, &functions, &reporter, &plan).await?;
    drop(reporter);

    app.renderer().render_deploy(&report)?;
    Ok(ExitCode::SUCCESS)
}
