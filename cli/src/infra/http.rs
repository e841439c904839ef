//! Authenticated JSON transport shared by the REST adapters.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use gcf_common::ApiError;
use serde::de::DeserializeOwned;

use crate::application::ports::AccessTokenSource;

/// Per-request timeout. Uploads and operation polls are single requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// One `reqwest::Client` plus a token source, cloned cheaply into every
/// adapter so connections are pooled across calls.
pub struct ApiTransport<T> {
    http: reqwest::Client,
    tokens: Arc<T>,
}

impl<T> Clone for ApiTransport<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<T: AccessTokenSource> ApiTransport<T> {
    /// Build a transport with the crate user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(tokens: T) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gcf-deploy/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            tokens: Arc::new(tokens),
        })
    }

    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Attach a bearer token, send, and decode a JSON body.
    ///
    /// Non-2xx responses become [`ApiError`] so callers can inspect the
    /// status details.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be obtained, the request fails,
    /// the service answers with an error status, or the body does not parse.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<R> {
        let token = self
            .tokens
            .access_token()
            .await
            .context("acquiring access token")?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("{operation}: request failed"))?;

        let status = response.status();
        let url = response.url().clone();
        tracing::debug!(operation, %url, %status, "received response");

        let body = response
            .text()
            .await
            .with_context(|| format!("{operation}: reading response body"))?;

        if !status.is_success() {
            tracing::error!(operation, %status, body = %body, "API error response");
            return Err(ApiError::from_body(operation, status.as_u16(), &body).into());
        }
        tracing::trace!(operation, body = %body, "response body");

        serde_json::from_str(&body).with_context(|| format!("{operation}: parsing response"))
    }
}
