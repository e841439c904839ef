use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role granting permission to call a function.
pub const INVOKER_ROLE: &str = "roles/cloudfunctions.invoker";

/// Principal matching every caller, authenticated or not.
pub const ALL_USERS: &str = "allUsers";

/// Associates a role with a set of principals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Binding {
    pub role: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
}

/// Access-control policy attached to a resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// Body of `:setIamPolicy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetIamPolicyRequest {
    pub policy: Policy,
}
