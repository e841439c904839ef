//! Command implementations

pub mod config;
pub mod deploy;
pub mod list;
pub mod version;
