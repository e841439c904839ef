//! Human-readable terminal renderer.

use std::path::Path;

use gcf_common::{CloudFunction, Environment, FunctionState};
use owo_colors::OwoColorize as _;

use crate::application::services::deploy::{DeployReport, FunctionResult};
use crate::domain::config::DeployConfig;
use crate::infra::config::CONFIG_PATH_ENV;
use crate::output::OutputContext;

/// Renders results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("gcf-deploy {version}");
    }

    /// Render the summary printed after a deploy run.
    ///
    /// Failures were already reported as they happened; they are listed
    /// again here by id.
    pub fn render_deploy(&self, report: &DeployReport) {
        if self.ctx.quiet {
            return;
        }

        println!();
        self.ctx.header("Deployment summary:");
        let resource = self.ctx.styles.resource;
        self.ctx
            .kv("Bucket:     ", &report.bucket.style(resource).to_string());
        self.ctx.kv("Object:     ", &report.object);
        self.ctx.kv(
            "Archive:    ",
            &format!(
                "{} files, {} bytes, sha256 {}",
                report.archive.files, report.archive.bytes, report.archive.sha256
            ),
        );
        self.ctx.kv(
            "Functions:  ",
            &format!(
                "{} deployed, {} failed",
                report.deployed(),
                report.failed()
            ),
        );
        self.ctx.kv(
            "IAM policy: ",
            &format!(
                "{} ({} bindings)",
                report.iam_resource.style(resource),
                report.iam_bindings
            ),
        );
        println!();
        if report.failed() == 0 {
            self.ctx
                .success("Google Cloud Function v2 deployed and publicly accessible.");
        } else {
            self.ctx.warn(&format!(
                "{} of {} functions failed to deploy",
                report.failed(),
                report.functions.len()
            ));
            for outcome in &report.functions {
                if let FunctionResult::Failed { error } = &outcome.result {
                    println!(
                        "    {}  {error}",
                        outcome.function_id.style(resource)
                    );
                }
            }
        }
    }

    /// Render a table of functions.
    pub fn render_functions(&self, functions: &[CloudFunction]) {
        if functions.is_empty() {
            if !self.ctx.quiet {
                println!("No functions found.");
            }
            return;
        }

        println!(
            "  {:<32} {:<20} {:<10} {:<6} {}",
            "NAME".style(self.ctx.styles.bold),
            "LOCATION".style(self.ctx.styles.bold),
            "STATE".style(self.ctx.styles.bold),
            "ENV".style(self.ctx.styles.bold),
            "UPDATED".style(self.ctx.styles.bold),
        );
        for function in functions {
            let state = state_display(function.state);
            let state = match function.state {
                Some(FunctionState::Active) => state.style(self.ctx.styles.success).to_string(),
                Some(FunctionState::Failed) => state.style(self.ctx.styles.error).to_string(),
                _ => state.style(self.ctx.styles.warning).to_string(),
            };
            let updated = function.update_time.map_or_else(
                || "-".to_string(),
                |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
            );
            println!(
                "  {:<32} {:<20} {:<10} {:<6} {}",
                function.short_name().style(self.ctx.styles.resource),
                location_of(&function.name),
                state,
                environment_display(function.environment),
                updated,
            );
        }
        if !self.ctx.quiet {
            println!();
            self.ctx.info(&format!("{} functions", functions.len()));
        }
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &DeployConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<28} {}", "project_id:", config.project_id);
        println!("  {:<28} {}", "location:", config.location);
        println!("  {:<28} {}", "function_name:", config.function_name);
        println!("  {:<28} {}", "source_dir:", config.source_dir.display());
        println!("  {:<28} {}", "archive_path:", config.archive_path.display());
        println!("  {:<28} {}", "object_name:", config.object_name);
        println!("  {:<28} {}", "bucket_location:", config.bucket_location);
        println!("  {:<28} {}", "count:", config.count);
        println!("  {:<28} {}", "function.runtime:", config.function.runtime);
        println!("  {:<28} {}", "function.entry_point:", config.function.entry_point);
        println!("  {:<28} {}", "function.memory:", config.function.memory);
        println!(
            "  {:<28} {}",
            "function.timeout_seconds:", config.function.timeout_seconds
        );
        println!(
            "  {:<28} {}",
            "function.max_instances:", config.function.max_instances
        );
        println!("  {:<28} {}", "function.description:", config.function.description);
        println!("  {:<28} {}", "endpoints.storage:", config.endpoints.storage);
        println!("  {:<28} {}", "endpoints.functions:", config.endpoints.functions);
        println!(
            "  {:<28} {}",
            "operation.poll_interval_ms:", config.operation.poll_interval_ms
        );
        println!(
            "  {:<28} {}",
            "operation.timeout_secs:", config.operation.timeout_secs
        );
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [
            CONFIG_PATH_ENV,
            "GCF_DEPLOY_PROJECT",
            "GCF_DEPLOY_LOCATION",
            "GCF_DEPLOY_FUNCTION",
            "GOOGLE_APPLICATION_CREDENTIALS",
        ] {
            println!(
                "    {:<32} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
    }
}

/// Location segment of `projects/P/locations/L/functions/F`.
#[must_use]
pub fn location_of(name: &str) -> &str {
    let mut parts = name.split('/');
    while let Some(part) = parts.next() {
        if part == "locations" {
            return parts.next().unwrap_or("-");
        }
    }
    "-"
}

#[must_use]
pub fn state_display(state: Option<FunctionState>) -> &'static str {
    match state {
        Some(FunctionState::Active) => "ACTIVE",
        Some(FunctionState::Deploying) => "DEPLOYING",
        Some(FunctionState::Deleting) => "DELETING",
        Some(FunctionState::Failed) => "FAILED",
        Some(FunctionState::StateUnspecified | FunctionState::Unknown) | None => "UNKNOWN",
    }
}

#[must_use]
pub fn environment_display(environment: Option<Environment>) -> &'static str {
    match environment {
        Some(Environment::Gen1) => "GEN_1",
        Some(Environment::Gen2) => "GEN_2",
        Some(Environment::Unspecified) | None => "-",
    }
}
