use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `google.rpc.Status` as carried by failed operations and error bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Value>,
}

/// Handle for a long-running mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Operation {
    /// `projects/*/locations/*/operations/*`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}
