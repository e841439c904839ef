//! Integration tests for gcf-deploy
//!
//! These tests spawn the actual binary or drive the REST adapters against
//! a local `wiremock` server. No Google credentials are needed.

mod config_command;
mod end_to_end;
mod helpers;
