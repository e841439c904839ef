//! CLI argument parsing with clap derive

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;

/// Package a source directory and deploy it as Cloud Functions (2nd gen)
#[derive(Parser)]
#[command(name = "gcf-deploy", version, propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (`NO_COLOR` is honoured as well)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Deploy flags accepted without a subcommand
    #[command(flatten)]
    pub deploy: commands::deploy::DeployArgs,

    /// Defaults to `deploy` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Archive, upload and deploy the functions, then open public access
    Deploy(commands::deploy::DeployArgs),

    /// List functions in a project
    List(commands::list::ListArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

/// Ids of the flattened top-level deploy flags.
const TOP_LEVEL_DEPLOY_FLAGS: [&str; 5] =
    ["project", "location", "function_name", "source_dir", "count"];

impl Cli {
    /// Parse `std::env::args_os`, exiting with a usage error on failure.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::try_parse_args_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse `args` like `Parser::try_parse_from`, additionally rejecting
    /// top-level deploy flags that were given alongside a subcommand.
    ///
    /// Values picked up from the environment do not count, so
    /// `GCF_DEPLOY_PROJECT=p gcf-deploy list` is accepted.
    ///
    /// # Errors
    ///
    /// Returns the clap error describing the invalid invocation.
    pub fn try_parse_args_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let cli = Self::from_arg_matches(&matches)?;
        if cli.command.is_some()
            && let Some(flag) = explicit_deploy_flag(&matches)
        {
            return Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                format!(
                    "'{flag}' must come after the 'deploy' subcommand, or be used without a subcommand"
                ),
            ));
        }
        Ok(cli)
    }

    /// Output flags for `AppContext`.
    #[must_use]
    pub fn output_flags(&self) -> OutputFlags {
        OutputFlags {
            no_color: self.no_color,
            quiet: self.quiet,
            json: self.json,
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self, app: &AppContext) -> Result<ExitCode> {
        match self.command {
            None => commands::deploy::run(app, self.deploy).await,
            Some(Command::Deploy(args)) => commands::deploy::run(app, args).await,
            Some(Command::List(args)) => commands::list::run(app, args).await,
            Some(Command::Config(cmd)) => commands::config::run(app, cmd),
            Some(Command::Version) => commands::version::run(app),
        }
    }
}

/// First deploy flag typed on the command line before the subcommand.
fn explicit_deploy_flag(matches: &ArgMatches) -> Option<String> {
    TOP_LEVEL_DEPLOY_FLAGS
        .iter()
        .find(|id| matches.value_source(id) == Some(ValueSource::CommandLine))
        .map(|id| match *id {
            "function_name" => "--function".to_string(),
            "source_dir" => "--source".to_string(),
            other => format!("--{other}"),
        })
}
