//! Full deploy runs of the binary against mocked Google endpoints.
//!
//! The mock server lives on this test's multi-threaded runtime while the
//! binary runs on a blocking thread.

#![allow(clippy::expect_used)]

use std::collections::HashSet;

use serial_test::serial;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{TOKEN, gcf_deploy, write_mock_config};

const PARENT: &str = "/v2/projects/demo-project/locations/us-central1";
const OPERATION: &str = "projects/demo-project/locations/us-central1/operations/op-1";

async fn mount_happy_path(server: &MockServer, count: u64) {
    let bearer = format!("Bearer {TOKEN}");

    Mock::given(method("POST"))
        .and(path("/storage/v1/b"))
        .and(query_param("project", "demo-project"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "mocked-gcf-source",
            "location": "US"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/upload/storage/v1/b/[a-z0-9]{13}-gcf-source/o$"))
        .and(query_param("uploadType", "media"))
        .and(query_param("name", "function-source.zip"))
        .and(header("content-type", "application/zip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "bucket": "mocked-gcf-source",
            "name": "function-source.zip",
            "size": "300"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{PARENT}/functions")))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": OPERATION,
            "done": false
        })))
        .expect(count)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v2/{OPERATION}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": OPERATION,
            "done": true,
            "response": {"state": "ACTIVE"}
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{PARENT}/functions/hello:getIamPolicy")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "version": 1,
            "etag": "BwX=",
            "bindings": [{"role": "roles/viewer", "members": ["user:ops@example.com"]}]
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{PARENT}/functions/hello:setIamPolicy")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "version": 1,
            "etag": "BwY=",
            "bindings": [
                {"role": "roles/viewer", "members": ["user:ops@example.com"]},
                {"role": "roles/cloudfunctions.invoker", "members": ["allUsers"]}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn run_binary(config: std::path::PathBuf, args: &'static [&'static str]) -> std::process::Output {
    tokio::task::spawn_blocking(move || {
        gcf_deploy()
            .env("GCF_DEPLOY_CONFIG", config)
            .args(args)
            .output()
            .expect("run binary")
    })
    .await
    .expect("join")
}

fn create_ids(requests: &[wiremock::Request]) -> Vec<String> {
    requests
        .iter()
        .filter(|r| r.method.as_str() == "POST" && r.url.path() == format!("{PARENT}/functions"))
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "functionId")
                .map(|(_, v)| v.into_owned())
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn deploy_issues_expected_calls_against_mock_endpoints() {
    let server = MockServer::start().await;
    mount_happy_path(&server, 50).await;
    let dir = TempDir::new().expect("tempdir");
    let config = write_mock_config(dir.path(), &server.uri(), 50);

    let output = run_binary(config, &["deploy"]).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stdout:\n{stdout}\nstderr:\n{stderr}");
    assert!(stdout.contains("Source code uploaded to Cloud Storage."));
    assert!(stdout.contains("IAM policy updated to allow public access."));
    assert!(stdout.contains("Google Cloud Function v2 deployed and publicly accessible."));

    let requests = server.received_requests().await.expect("recording enabled");
    let ids = create_ids(&requests);
    assert_eq!(ids.len(), 50);
    let distinct: HashSet<&String> = ids.iter().collect();
    assert_eq!(distinct.len(), 50);
    let expected: Vec<String> = (1..=50).map(|i| format!("hello-{i}")).collect();
    assert_eq!(ids, expected);

    let set_policy = requests
        .iter()
        .find(|r| r.url.path().ends_with(":setIamPolicy"))
        .expect("setIamPolicy request");
    let body: serde_json::Value = serde_json::from_slice(&set_policy.body).expect("json body");
    let bindings = body["policy"]["bindings"].as_array().expect("bindings");
    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings[1]["role"], "roles/cloudfunctions.invoker");
    assert_eq!(bindings[1]["members"][0], "allUsers");
    assert_eq!(body["policy"]["etag"], "BwX=");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn bare_invocation_runs_full_deploy() {
    let server = MockServer::start().await;
    mount_happy_path(&server, 50).await;
    let dir = TempDir::new().expect("tempdir");
    let config = write_mock_config(dir.path(), &server.uri(), 50);

    let output = run_binary(config, &[]).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stdout:\n{stdout}\nstderr:\n{stderr}");
    assert!(stdout.contains("Google Cloud Function v2 deployed and publicly accessible."));

    let requests = server.received_requests().await.expect("recording enabled");
    let count = |verb: &str, suffix: &str| {
        requests
            .iter()
            .filter(|r| r.method.as_str() == verb && r.url.path().ends_with(suffix))
            .count()
    };
    assert_eq!(count("POST", "/storage/v1/b"), 1);
    assert_eq!(count("POST", "-gcf-source/o"), 1);
    assert_eq!(count("POST", ":getIamPolicy") + count("GET", ":getIamPolicy"), 1);
    assert_eq!(count("POST", ":setIamPolicy"), 1);
    let ids = create_ids(&requests);
    let distinct: HashSet<&String> = ids.iter().collect();
    assert_eq!(ids.len(), 50);
    assert_eq!(distinct.len(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn deploy_json_report_lists_every_function() {
    let server = MockServer::start().await;
    mount_happy_path(&server, 50).await;
    let dir = TempDir::new().expect("tempdir");
    let config = write_mock_config(dir.path(), &server.uri(), 50);

    let output = run_binary(config, &["--json", "deploy"]).await;

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    let functions = report["functions"].as_array().expect("functions");
    assert_eq!(functions.len(), 50);
    assert!(functions.iter().all(|f| f["status"] == "deployed"));
    assert_eq!(functions[49]["function_id"], "hello-50");
    assert_eq!(
        report["iam_resource"],
        "projects/demo-project/locations/us-central1/functions/hello"
    );
    assert_eq!(report["iam_bindings"], 2);
    assert_eq!(report["object"], "function-source.zip");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn failed_create_is_reported_and_run_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{PARENT}/functions")))
        .and(query_param("functionId", "hello-3"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "code": 400,
                "message": "Invalid function source",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_happy_path(&server, 4).await;
    let dir = TempDir::new().expect("tempdir");
    let config = write_mock_config(dir.path(), &server.uri(), 5);

    let output = run_binary(config, &["deploy"]).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr:\n{stderr}");
    assert!(stderr.contains("hello-3"));
    assert!(stderr.contains("Invalid function source"));
    assert!(stdout.contains("1 of 5 functions failed to deploy"));
    assert_eq!(
        create_ids(&server.received_requests().await.expect("recording")).len(),
        5
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn bucket_conflict_is_fatal_with_api_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/b"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "error": {
                "code": 409,
                "message": "Your previous request to create the named bucket succeeded and you already own it.",
                "status": "CONFLICT",
                "details": [{"reason": "conflict", "domain": "global"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{PARENT}/functions")))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let dir = TempDir::new().expect("tempdir");
    let config = write_mock_config(dir.path(), &server.uri(), 50);

    let output = run_binary(config, &["deploy"]).await;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("is already taken"));
    assert!(stderr.contains("HTTP 409 CONFLICT"));
    assert!(stderr.contains("\"reason\": \"conflict\""));
}
