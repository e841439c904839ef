//! Domain layer: pure deployment types, naming rules, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `reqwest`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod bucket;
pub mod config;
pub mod error;
pub mod function;
pub mod policy;
pub mod target;

pub use bucket::{generate_bucket_name, validate_bucket_name};
pub use config::{DeployConfig, validate_config_key, validate_config_value};
pub use error::{ConfigError, DeployError};
pub use function::{CreateFunctionRequest, FunctionTemplate};
pub use policy::grant_public_invoker;
pub use target::DeploymentTarget;
