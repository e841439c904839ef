//! Credential sources implementing the `AccessTokenSource` port.
//!
//! Production calls use Application Default Credentials through `gcp_auth`.
//! Setting `GCF_DEPLOY_ACCESS_TOKEN` swaps in a fixed bearer token, which is
//! how CI and the mock-endpoint tests run without a Google account.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::OnceCell;

use crate::application::ports::AccessTokenSource;

/// OAuth2 scope covering Cloud Storage and Cloud Functions.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Environment variable holding a pre-issued bearer token.
pub const ACCESS_TOKEN_ENV: &str = "GCF_DEPLOY_ACCESS_TOKEN";

/// Application Default Credentials, resolved lazily on first use.
#[derive(Default)]
pub struct AdcTokenSource {
    provider: OnceCell<Arc<dyn gcp_auth::TokenProvider>>,
}

impl AccessTokenSource for AdcTokenSource {
    async fn access_token(&self) -> Result<String> {
        let provider = self
            .provider
            .get_or_try_init(|| async {
                tracing::debug!("initializing GCP authentication provider");
                gcp_auth::provider().await
            })
            .await
            .context("loading Application Default Credentials")?;
        let token = provider
            .token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .context("acquiring GCP access token")?;
        Ok(token.as_str().to_string())
    }
}

/// A fixed bearer token.
pub struct StaticToken(pub String);

impl AccessTokenSource for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Credential source picked at startup.
pub enum Credentials {
    Static(StaticToken),
    Adc(AdcTokenSource),
}

impl Credentials {
    /// `GCF_DEPLOY_ACCESS_TOKEN` when set and non-empty, otherwise ADC.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => {
                tracing::debug!("using bearer token from {ACCESS_TOKEN_ENV}");
                Self::Static(StaticToken(token.trim().to_string()))
            }
            _ => Self::Adc(AdcTokenSource::default()),
        }
    }
}

impl AccessTokenSource for Credentials {
    async fn access_token(&self) -> Result<String> {
        match self {
            Self::Static(t) => t.access_token().await,
            Self::Adc(t) => t.access_token().await,
        }
    }
}
