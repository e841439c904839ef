//! Typed error for non-success REST responses.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A Google API call answered with a non-2xx status.
#[derive(Debug, Clone, Error)]
#[error("{operation} failed: HTTP {http_status}{}: {message}", status_suffix(.status.as_deref()))]
pub struct ApiError {
    /// Short name of the call, e.g. `buckets.insert`.
    pub operation: String,
    pub http_status: u16,
    /// Canonical code such as `ALREADY_EXISTS`, when the body carried one.
    pub status: Option<String>,
    pub message: String,
    /// `google.rpc.Status.details`, passed through untouched.
    pub details: Vec<Value>,
}

fn status_suffix(status: Option<&str>) -> String {
    status.map(|s| format!(" {s}")).unwrap_or_default()
}

#[derive(Deserialize)]
struct Envelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<Value>,
}

impl ApiError {
    /// Build from a raw response body, falling back to the body text when it
    /// is not a Google error envelope.
    #[must_use]
    pub fn from_body(operation: &str, http_status: u16, body: &str) -> Self {
        match serde_json::from_str::<Envelope>(body) {
            Ok(Envelope { error }) => Self {
                operation: operation.to_string(),
                http_status,
                status: error.status,
                message: error.message,
                details: error.details,
            },
            Err(_) => Self {
                operation: operation.to_string(),
                http_status,
                status: None,
                message: body.trim().to_string(),
                details: Vec::new(),
            },
        }
    }

    /// Conflict on create, e.g. a bucket name already taken.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.http_status == 409 || self.status.as_deref() == Some("ALREADY_EXISTS")
    }
}

/// A long-running operation finished with an error status.
#[derive(Debug, Clone, Error)]
#[error("operation {name} failed with code {code}: {message}")]
pub struct OperationError {
    pub name: String,
    pub code: i32,
    pub message: String,
    pub details: Vec<Value>,
}

impl OperationError {
    #[must_use]
    pub fn new(name: &str, status: &crate::Status) -> Self {
        Self {
            name: name.to_string(),
            code: status.code,
            message: status.message.clone(),
            details: status.details.clone(),
        }
    }
}
