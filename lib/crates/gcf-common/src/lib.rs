//! Wire types for the Google Cloud REST surfaces used by `gcf-deploy`.
//!
//! Field names follow the JSON mapping of the public APIs (camelCase);
//! optional fields are skipped when absent so request bodies stay minimal.

pub mod error;
pub mod function;
pub mod iam;
pub mod operation;
pub mod storage;

pub use error::{ApiError, OperationError};
pub use function::{
    BuildConfig, CloudFunction, Environment, FunctionState, ListFunctionsResponse, ServiceConfig,
    Source, StorageSource,
};
pub use iam::{Binding, Policy, SetIamPolicyRequest, ALL_USERS, INVOKER_ROLE};
pub use operation::{Operation, Status};
pub use storage::{Bucket, BucketInsert, IamConfiguration, StoredObject, UniformBucketLevelAccess};
