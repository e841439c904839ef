//! Cloud Functions v2 REST adapter implementing `FunctionService`.
//!
//! Long-running operations are polled with a fixed interval until done or
//! until the total wait bound expires. Nothing is retried.

use std::time::Duration;

use anyhow::Result;
use gcf_common::{
    CloudFunction, ListFunctionsResponse, Operation, OperationError, Policy, SetIamPolicyRequest,
};
use tokio::time::Instant;

use crate::application::ports::{AccessTokenSource, FunctionService};
use crate::domain::config::OperationSettings;
use crate::domain::function::CreateFunctionRequest;
use crate::infra::http::ApiTransport;

/// Cloud Functions client.
pub struct CloudFunctionsClient<T> {
    transport: ApiTransport<T>,
    base_url: String,
    poll_interval: Duration,
    timeout: Duration,
}

impl<T: AccessTokenSource> CloudFunctionsClient<T> {
    #[must_use]
    pub fn new(transport: ApiTransport<T>, base_url: &str, operation: &OperationSettings) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_millis(operation.poll_interval_ms),
            timeout: Duration::from_secs(operation.timeout_secs),
        }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/v2/{resource}", self.base_url)
    }
}

impl<T: AccessTokenSource> FunctionService for CloudFunctionsClient<T> {
    async fn create_function(&self, request: &CreateFunctionRequest) -> Result<Operation> {
        let url = self.url(&format!("{}/functions", request.parent));
        let builder = self
            .transport
            .http()
            .post(&url)
            .query(&[("functionId", request.function_id.as_str())])
            .json(&request.function);
        let op: Operation = self.transport.execute("functions.create", builder).await?;
        tracing::debug!(operation = %op.name, done = op.done, "create accepted");
        Ok(op)
    }

    async fn wait_operation(&self, operation: Operation) -> Result<Operation> {
        let deadline = Instant::now() + self.timeout;
        let mut op = operation;
        while !op.done {
            if Instant::now() >= deadline {
                anyhow::bail!(
                    "operation {} did not finish within {}s",
                    op.name,
                    self.timeout.as_secs()
                );
            }
            tokio::time::sleep(self.poll_interval).await;
            let builder = self.transport.http().get(self.url(&op.name));
            op = self.transport.execute("operations.get", builder).await?;
            tracing::trace!(operation = %op.name, done = op.done, "polled operation");
        }
        if let Some(status) = &op.error {
            return Err(OperationError::new(&op.name, status).into());
        }
        Ok(op)
    }

    async fn list_functions(&self, parent: &str) -> Result<Vec<CloudFunction>> {
        let url = self.url(&format!("{parent}/functions"));
        let mut all = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut builder = self.transport.http().get(&url);
            if let Some(token) = &page_token {
                builder = builder.query(&[("pageToken", token.as_str())]);
            }
            let page: ListFunctionsResponse =
                self.transport.execute("functions.list", builder).await?;
            if !page.unreachable.is_empty() {
                tracing::warn!(unreachable = ?page.unreachable, "some locations were unreachable");
            }
            all.extend(page.functions);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(all)
    }

    async fn get_iam_policy(&self, resource: &str) -> Result<Policy> {
        let builder = self
            .transport
            .http()
            .get(format!("{}:getIamPolicy", self.url(resource)));
        self.transport.execute("functions.getIamPolicy", builder).await
    }

    async fn set_iam_policy(&self, resource: &str, policy: &Policy) -> Result<Policy> {
        let body = SetIamPolicyRequest {
            policy: policy.clone(),
        };
        let builder = self
            .transport
            .http()
            .post(format!("{}:setIamPolicy", self.url(resource)))
            .json(&body);
        self.transport.execute("functions.setIamPolicy", builder).await
    }
}
