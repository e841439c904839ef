//! Function resource request template.

use gcf_common::{
    BuildConfig, CloudFunction, Environment, ServiceConfig, Source, StorageSource,
};
use serde::Serialize;

use crate::domain::config::FunctionSettings;
use crate::domain::target::DeploymentTarget;

/// Static part of every create request; only the index varies per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionTemplate {
    pub description: String,
    pub runtime: String,
    pub entry_point: String,
    pub memory: String,
    pub timeout_seconds: u32,
    pub max_instances: u32,
}

impl From<&FunctionSettings> for FunctionTemplate {
    fn from(s: &FunctionSettings) -> Self {
        Self {
            description: s.description.clone(),
            runtime: s.runtime.clone(),
            entry_point: s.entry_point.clone(),
            memory: s.memory.clone(),
            timeout_seconds: s.timeout_seconds,
            max_instances: s.max_instances,
        }
    }
}

impl Default for FunctionTemplate {
    fn default() -> Self {
        Self::from(&FunctionSettings::default())
    }
}

/// A `functions.create` call: path parent, `functionId` query and body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFunctionRequest {
    pub parent: String,
    pub function: CloudFunction,
    pub function_id: String,
}

impl FunctionTemplate {
    /// Build the request for the function `<name>-<index>` sourced from
    /// `bucket/object`.
    #[must_use]
    pub fn request(
        &self,
        target: &DeploymentTarget,
        index: u32,
        bucket: &str,
        object: &str,
    ) -> CreateFunctionRequest {
        CreateFunctionRequest {
            parent: target.parent(),
            function: CloudFunction {
                name: target.function_resource(index),
                description: Some(self.description.clone()),
                build_config: Some(BuildConfig {
                    runtime: Some(self.runtime.clone()),
                    entry_point: Some(self.entry_point.clone()),
                    source: Some(Source {
                        storage_source: Some(StorageSource {
                            bucket: bucket.to_string(),
                            object: object.to_string(),
                        }),
                    }),
                }),
                service_config: Some(ServiceConfig {
                    available_memory: Some(self.memory.clone()),
                    timeout_seconds: Some(self.timeout_seconds),
                    max_instance_count: Some(self.max_instances),
                    uri: None,
                }),
                environment: Some(Environment::Gen2),
                ..CloudFunction::default()
            },
            function_id: target.function_id(index),
        }
    }
}
