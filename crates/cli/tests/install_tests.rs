//! Integration tests for `keygate install`.

mod common;

use common::*;
use predicates::prelude::*;

async fn mount_policy(server: &MockServer, saved: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/panel/api-users/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "msg": "",
            "obj": {"apiTokenOnly": false, "apiDefaultRateLimit": 60}
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/panel/api-users/settings"))
        .and(body_json(saved))
        .respond_with(ack())
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_install_creates_bootstrap_user_on_empty_panel() {
    let server = MockServer::start().await;
    mount_policy(
        &server,
        serde_json::json!({"apiTokenOnly": true, "apiDefaultRateLimit": 120}),
    )
    .await;
    mount_empty_list(&server).await;
    Mock::given(method("POST"))
        .and(path("/panel/api-users/create"))
        .and(body_json(serde_json::json!({"name": "api-root", "rate": 120})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "msg": "",
            "obj": {
                "user": {"id": 1, "name": "api-root", "enabled": true, "rateLimitPerMinute": 120},
                "token": "root-token"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    keygate_cmd_for(&server)
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("api-root (id 1)"))
        .stdout(predicate::str::contains(
            "Token (store securely, shown once): root-token",
        ));
}

#[tokio::test]
async fn test_install_skips_creation_when_users_exist() {
    let server = MockServer::start().await;
    mount_policy(
        &server,
        serde_json::json!({"apiTokenOnly": false, "apiDefaultRateLimit": 90}),
    )
    .await;
    mount_list(&server).await;
    Mock::given(method("POST"))
        .and(path("/panel/api-users/create"))
        .respond_with(ack())
        .expect(0)
        .mount(&server)
        .await;

    keygate_cmd_for(&server)
        .args(["install", "--token-only", "false", "--default-rate", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already present (2)"));
}

#[tokio::test]
async fn test_install_json_report() {
    let server = MockServer::start().await;
    mount_policy(
        &server,
        serde_json::json!({"apiTokenOnly": false, "apiDefaultRateLimit": 120}),
    )
    .await;
    mount_list(&server).await;

    let output = keygate_cmd_for(&server)
        .args(["install", "--token-only", "false", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["existing_users"], 2);
    assert!(value["created"].is_null());
}
