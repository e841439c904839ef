//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: archive creation, HTTP calls
//! to the Cloud Storage and Cloud Functions REST APIs, credential lookup, and
//! configuration file access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod archive;
pub mod auth;
pub mod config;
pub mod fs;
pub mod functions;
pub mod http;
pub mod storage;
