//! Shared fixtures for integration tests.

#![allow(clippy::expect_used, dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const TOKEN: &str = "ya29.integration-test";

/// The binary with color disabled and a throwaway token.
pub fn gcf_deploy() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gcf-deploy"));
    cmd.env("NO_COLOR", "1")
        .env("GCF_DEPLOY_ACCESS_TOKEN", TOKEN)
        .env_remove("GCF_DEPLOY_PROJECT")
        .env_remove("GCF_DEPLOY_LOCATION")
        .env_remove("GCF_DEPLOY_FUNCTION")
        .env_remove("RUST_LOG");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
pub fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

/// A minimal Node.js function source tree.
pub fn write_function_source(root: &Path) -> PathBuf {
    let src = root.join("helloworldHttp");
    std::fs::create_dir_all(&src).expect("mkdir");
    std::fs::write(
        src.join("index.js"),
        "exports.helloHttp = (req, res) => res.send('Hello World!');\n",
    )
    .expect("write index.js");
    std::fs::write(
        src.join("package.json"),
        r#"{"name":"hello-http","version":"0.0.1"}"#,
    )
    .expect("write package.json");
    src
}

/// Write a config file pointing both endpoints at `base_url`.
pub fn write_mock_config(dir: &Path, base_url: &str, count: u32) -> PathBuf {
    let source = write_function_source(dir);
    let config = format!(
        "project_id: demo-project\n\
         location: us-central1\n\
         function_name: hello\n\
         source_dir: {source}\n\
         archive_path: {archive}\n\
         count: {count}\n\
         endpoints:\n  storage: {base_url}\n  functions: {base_url}\n\
         operation:\n  poll_interval_ms: 1\n  timeout_secs: 30\n",
        source = source.display(),
        archive = dir.join("function-source.zip").display(),
    );
    let path = dir.join("config.yaml");
    std::fs::write(&path, config).expect("write config");
    path
}
