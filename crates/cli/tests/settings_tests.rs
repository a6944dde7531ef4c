//! Integration tests for `keygate settings`.

mod common;

use common::*;
use predicates::prelude::*;

async fn mount_settings(server: &MockServer, token_only: bool, rate: u32) {
    Mock::given(method("GET"))
        .and(path("/panel/api-users/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "msg": "",
            "obj": {"apiTokenOnly": token_only, "apiDefaultRateLimit": rate}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_settings_get_table() {
    let server = MockServer::start().await;
    mount_settings(&server, true, 120).await;

    keygate_cmd_for(&server)
        .args(["settings", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Token only:          yes"))
        .stdout(predicate::str::contains("Default rate limit:  120/min"));
}

#[tokio::test]
async fn test_settings_get_json_uses_panel_field_names() {
    let server = MockServer::start().await;
    mount_settings(&server, false, 60).await;

    let output = keygate_cmd_for(&server)
        .args(["settings", "get", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"apiTokenOnly": false, "apiDefaultRateLimit": 60})
    );
}

#[tokio::test]
async fn test_settings_set_keeps_omitted_fields() {
    let server = MockServer::start().await;
    mount_settings(&server, true, 120).await;
    Mock::given(method("POST"))
        .and(path("/panel/api-users/settings"))
        .and(body_json(serde_json::json!({
            "apiTokenOnly": true,
            "apiDefaultRateLimit": 300
        })))
        .respond_with(ack())
        .expect(1)
        .mount(&server)
        .await;

    keygate_cmd_for(&server)
        .args(["settings", "set", "--default-rate", "300"])
        .assert()
        .success();
}

#[tokio::test]
async fn test_settings_set_negative_rate_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/panel/api-users/settings"))
        .respond_with(ack())
        .expect(0)
        .mount(&server)
        .await;

    keygate_cmd_for(&server)
        .args(["settings", "set", "--default-rate", "-3"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("non-negative"));
}

#[tokio::test]
async fn test_settings_save_rejected() {
    let server = MockServer::start().await;
    mount_settings(&server, false, 60).await;
    Mock::given(method("POST"))
        .and(path("/panel/api-users/settings"))
        .respond_with(rejected("settings are read-only"))
        .mount(&server)
        .await;

    keygate_cmd_for(&server)
        .args(["settings", "set", "--token-only", "true"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("settings are read-only"));
}
