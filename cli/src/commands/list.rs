//! `gcf-deploy list`: list deployed functions across all locations.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::{config_service, list};
use crate::domain::config::Overrides;

/// Arguments for the list command.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Project to list (defaults to the configured project)
    #[arg(long, env = "GCF_DEPLOY_PROJECT")]
    pub project: Option<String>,
}

/// Run the list command.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the list call fails.
pub async fn run(app: &AppContext, args: ListArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?.with_overrides(Overrides {
        project_id: args.project,
        ..Overrides::default()
    });
    let transport = AppContext::transport()?;
    let functions = AppContext::functions(&transport, &config);

    let found = list::list_functions(&functions, &config.target()).await?;
    app.renderer().render_functions(&found)?;
    Ok(ExitCode::SUCCESS)
}
