//! CLI integration tests against a mock gateway.

mod common;

use common::{PASSWORD, USER, endpoint, mount_session, run_cli, run_cli_success};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_help() {
    let stdout = run_cli_success(&["--help"]).await;
    assert!(stdout.contains("volumes"));
    assert!(stdout.contains("--endpoint"));
}

#[tokio::test]
async fn test_version_without_endpoint() {
    let stdout = run_cli_success(&["version"]).await;
    assert!(stdout.contains("sio"));
    assert!(!stdout.contains("API version"));
}

#[tokio::test]
async fn test_version_flag_is_stamped() {
    let stdout = run_cli_success(&["--version"]).await;
    let version = stdout.trim().strip_prefix("sio ").unwrap();
    assert!(!version.is_empty());
}

#[tokio::test]
async fn test_version_reports_gateway_api_version() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"3.5.1.2\""))
        .expect(1)
        .mount(&server)
        .await;

    let ep = endpoint(&server);
    let stdout = run_cli_success(&["version", "--endpoint", &ep]).await;
    assert!(stdout.contains("API version: 3.5"));
}

#[tokio::test]
async fn test_login_prints_session() {
    let server = MockServer::start().await;
    mount_session(&server, "tok-1").await;

    let ep = endpoint(&server);
    let stdout = run_cli_success(&[
        "login",
        "--endpoint",
        &ep,
        "--username",
        USER,
        "--password",
        PASSWORD,
        "--show-token",
    ])
    .await;

    assert!(stdout.contains("Logged in successfully"));
    assert!(stdout.contains("User: admin"));
    assert!(stdout.contains("API version: 2.0"));
    assert!(stdout.contains("Token: tok-1"));
}

#[tokio::test]
async fn test_missing_username_fails() {
    let server = MockServer::start().await;
    let ep = endpoint(&server);

    let output = run_cli(&["systems", "--endpoint", &ep]).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No username"));
}

#[tokio::test]
async fn test_rejected_login_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"2.0\""))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized",
            "httpStatusCode": 401,
            "errorCode": 0
        })))
        .mount(&server)
        .await;

    let ep = endpoint(&server);
    let output = run_cli(&[
        "systems",
        "--endpoint",
        &ep,
        "--username",
        USER,
        "--password",
        "wrong",
    ])
    .await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to login"));
}

#[tokio::test]
async fn test_systems_listing() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    Mock::given(method("GET"))
        .and(path("/api/types/System/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "788d9efb0a8f20cb", "name": "cluster1", "systemVersionName": "EMC ScaleIO Version: R2_0.5014.0", "links": []}
        ])))
        .mount(&server)
        .await;

    let ep = endpoint(&server);
    let stdout = run_cli_success(&[
        "systems",
        "--endpoint",
        &ep,
        "--username",
        USER,
        "--password",
        PASSWORD,
    ])
    .await;

    assert!(stdout.contains("788d9efb0a8f20cb"));
    assert!(stdout.contains("cluster1"));
}

#[tokio::test]
async fn test_storage_pools_by_domain_name() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    Mock::given(method("GET"))
        .and(path("/api/types/ProtectionDomain/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "pd1", "name": "domain1", "links": []}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/api/instances/ProtectionDomain::pd1/relationships/StoragePool",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "sp1", "name": "pool1", "protectionDomainId": "pd1", "links": []}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ep = endpoint(&server);
    let stdout = run_cli_success(&[
        "storage-pools",
        "--domain",
        "domain1",
        "--json",
        "--endpoint",
        &ep,
        "--username",
        USER,
        "--password",
        PASSWORD,
    ])
    .await;

    let pools: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(pools[0]["id"], "sp1");
    assert_eq!(pools[0]["name"], "pool1");
}

#[tokio::test]
async fn test_volume_create() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    Mock::given(method("GET"))
        .and(path("/api/types/StoragePool/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "sp1", "name": "pool1", "links": []}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/types/Volume/instances"))
        .and(body_json(json!({
            "name": "vol1",
            "volumeSizeInKb": "8388608",
            "storagePoolId": "sp1",
            "volumeType": "ThinProvisioned"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "vol-42"})))
        .expect(1)
        .mount(&server)
        .await;

    let ep = endpoint(&server);
    let stdout = run_cli_success(&[
        "volumes",
        "create",
        "--name",
        "vol1",
        "--size-kb",
        "8388608",
        "--pool",
        "pool1",
        "--thin",
        "--endpoint",
        &ep,
        "--username",
        USER,
        "--password",
        PASSWORD,
    ])
    .await;

    assert!(stdout.contains("Created volume vol1"));
    assert!(stdout.contains("ID: vol-42"));
}

#[tokio::test]
async fn test_volume_remove_with_mode() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    Mock::given(method("POST"))
        .and(path(
            "/api/instances/Volume::vol-42/action/removeVolume",
        ))
        .and(body_json(json!({"removeMode": "INCLUDE_DESCENDANTS"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let ep = endpoint(&server);
    let stdout = run_cli_success(&[
        "volumes",
        "remove",
        "vol-42",
        "--mode",
        "include-descendants",
        "--endpoint",
        &ep,
        "--username",
        USER,
        "--password",
        PASSWORD,
    ])
    .await;

    assert!(stdout.contains("Removed volume vol-42"));
}

#[tokio::test]
async fn test_raw_get_prints_json() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    Mock::given(method("GET"))
        .and(path("/api/instances/System::abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc"})))
        .mount(&server)
        .await;

    let ep = endpoint(&server);
    let stdout = run_cli_success(&[
        "get",
        "/api/instances/System::abc",
        "--endpoint",
        &ep,
        "--username",
        USER,
        "--password",
        PASSWORD,
    ])
    .await;

    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["id"], "abc");
}

#[tokio::test]
async fn test_gateway_error_is_reported() {
    let server = MockServer::start().await;
    mount_session(&server, "tok").await;
    Mock::given(method("GET"))
        .and(path("/api/types/Sdc/instances"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "internal failure",
            "httpStatusCode": 500,
            "errorCode": 7
        })))
        .mount(&server)
        .await;

    let ep = endpoint(&server);
    let output = run_cli(&[
        "sdcs",
        "--endpoint",
        &ep,
        "--username",
        USER,
        "--password",
        PASSWORD,
    ])
    .await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to list SDCs"));
    assert!(stderr.contains("internal failure"));
}
