//! Integration tests for `gcf-deploy config`.
//!
//! All filesystem-touching tests set `GCF_DEPLOY_CONFIG` to a temp path so
//! they never read or write `~/.gcf-deploy/config.yaml`.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::helpers::{gcf_deploy, temp_config_path};

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    gcf_deploy()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    let (_dir, path) = temp_config_path();
    gcf_deploy()
        .args(["config", "show"])
        .env("GCF_DEPLOY_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("google-project-id"))
        .stdout(predicate::str::contains("country-location"))
        .stdout(predicate::str::contains("function-v2"))
        .stdout(predicate::str::contains("nodejs20"))
        .stdout(predicate::str::contains(path.as_str()));
}

#[test]
fn test_config_set_then_show_roundtrip() {
    let (_dir, path) = temp_config_path();
    gcf_deploy()
        .args(["config", "set", "project_id", "acme-prod"])
        .env("GCF_DEPLOY_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set project_id = acme-prod"));

    gcf_deploy()
        .args(["config", "show"])
        .env("GCF_DEPLOY_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("acme-prod"));
}

#[cfg(unix)]
#[test]
fn test_config_set_writes_private_file() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = temp_config_path();
    gcf_deploy()
        .args(["config", "set", "count", "3"])
        .env("GCF_DEPLOY_CONFIG", &path)
        .assert()
        .success();
    let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    gcf_deploy()
        .args(["config", "set", "region", "us"])
        .env("GCF_DEPLOY_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting: region"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_count_fails() {
    let (_dir, path) = temp_config_path();
    gcf_deploy()
        .args(["config", "set", "count", "zero"])
        .env("GCF_DEPLOY_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for count"));
}

#[test]
fn test_config_show_json() {
    let (_dir, path) = temp_config_path();
    let output = gcf_deploy()
        .args(["--json", "config", "show"])
        .env("GCF_DEPLOY_CONFIG", &path)
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["path"], path.as_str());
    assert_eq!(value["config"]["count"], 50);
    assert_eq!(value["config"]["function"]["memory"], "256M");
}
