//! Application context: unified state passed to every command handler.
//!
//! Credentials and REST clients are built on demand so that offline commands
//! (`version`, `config`) never touch the network or ADC.

use anyhow::Result;

use crate::domain::config::DeployConfig;
use crate::infra::auth::Credentials;
use crate::infra::config::YamlConfigStore;
use crate::infra::functions::CloudFunctionsClient;
use crate::infra::http::ApiTransport;
use crate::infra::storage::GcsClient;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Persistent configuration file.
    pub config_store: YamlConfigStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// JSON mode implies quiet progress so stdout carries one document.
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            config_store: YamlConfigStore,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Authenticated transport shared by both REST clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn transport() -> Result<ApiTransport<Credentials>> {
        ApiTransport::new(Credentials::from_env())
    }

    /// Cloud Storage client for the configured project and endpoint.
    #[must_use]
    pub fn storage(
        transport: &ApiTransport<Credentials>,
        config: &DeployConfig,
    ) -> GcsClient<Credentials> {
        GcsClient::new(transport.clone(), &config.endpoints.storage, &config.project_id)
    }

    /// Cloud Functions client for the configured endpoint.
    #[must_use]
    pub fn functions(
        transport: &ApiTransport<Credentials>,
        config: &DeployConfig,
    ) -> CloudFunctionsClient<Credentials> {
        CloudFunctionsClient::new(
            transport.clone(),
            &config.endpoints.functions,
            &config.operation,
        )
    }
}
