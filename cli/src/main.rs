//! gcf-deploy - package a function source tree and deploy it to Cloud Functions

use std::process::ExitCode;

use gcf_common::{ApiError, OperationError};
use tracing_subscriber::EnvFilter;

use gcf_deploy_cli::app::AppContext;
use gcf_deploy_cli::cli::Cli;
use gcf_deploy_cli::output::json;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse_args();
    let app = AppContext::new(&cli.output_flags());
    match cli.run(&app).await {
        Ok(code) => code,
        Err(e) => {
            report_error(&app, &e);
            ExitCode::FAILURE
        }
    }
}

/// Print the error chain and, for API failures, the returned status details.
fn report_error(app: &AppContext, e: &anyhow::Error) {
    let (code, details) = classify(e);
    if app.is_json() {
        match json::format_error(&format!("{e:#}"), code, &details) {
            Ok(out) => println!("{out}"),
            Err(_) => eprintln!("Error: {e:#}"),
        }
        return;
    }

    eprintln!("Error: {e:#}");
    if !details.is_empty()
        && let Ok(pretty) = serde_json::to_string_pretty(&details)
    {
        eprintln!("Details: {pretty}");
    }
}

fn classify(e: &anyhow::Error) -> (&'static str, Vec<serde_json::Value>) {
    for cause in e.chain() {
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            return ("API_ERROR", api.details.clone());
        }
        if let Some(op) = cause.downcast_ref::<OperationError>() {
            return ("OPERATION_FAILED", op.details.clone());
        }
    }
    ("ERROR", Vec::new())
}
