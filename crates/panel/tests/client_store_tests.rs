//! End-to-end controller tests over HTTP against a mock panel.
//!
//! # Invariants
//! - Mutations are followed by a `GET /panel/api-users/list`
//! - A rejected toggle triggers no reload
//! - A declined delete sends nothing to the delete route

use std::sync::Arc;

use keygate_client::testing::load_fixture;
use keygate_client::{AuthStrategy, PanelClient};
use keygate_panel::{
    AutoConfirm, CredentialController, DeleteOutcome, PendingForm, RecordingClipboard,
    SharedClient, TracingNotifier,
};
use secrecy::SecretString;
use tokio::sync::Mutex;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller_for(server: &MockServer, confirm: bool) -> CredentialController {
    let client = PanelClient::builder()
        .base_url(server.uri())
        .auth_strategy(AuthStrategy::ApiToken {
            token: SecretString::new("test-token".to_string().into()),
        })
        .max_retries(0)
        .build()
        .unwrap();
    let shared: SharedClient = Arc::new(Mutex::new(client));

    CredentialController::new(
        shared,
        Arc::new(AutoConfirm(confirm)),
        Arc::new(RecordingClipboard::new()),
        Arc::new(TracingNotifier),
    )
}

async fn mount_list(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/panel/api-users/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("credentials/list.json")))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_svc_bot_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/panel/api-users/create"))
        .and(body_json(serde_json::json!({"name": "svc-bot", "rate": 60})))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("credentials/create.json")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_list(&mock_server, 1).await;

    let controller = controller_for(&mock_server, true);
    controller.set_form("svc-bot", 60);
    let created = controller.create().await.unwrap();

    assert_eq!(created.unwrap().id, 7);
    let state = controller.state();
    let secret = state.visible_secret().unwrap();
    assert_eq!(secret.expose(), "abc123");
    assert!(secret.visible);
    assert_eq!(state.form, PendingForm::default());
    assert_eq!(state.credentials.len(), 2);
}

#[tokio::test]
async fn test_rejected_toggle_over_http_skips_reload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/panel/api-users/disable/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": false})))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_list(&mock_server, 1).await;

    let controller = controller_for(&mock_server, true);
    controller.load_credentials().await.unwrap();
    let before = controller.state().credential(3).map(|c| c.enabled);

    assert!(controller.toggle(3, false).await.is_err());
    assert_eq!(controller.state().credential(3).map(|c| c.enabled), before);
}

#[tokio::test]
async fn test_declined_delete_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/panel/api-users/delete/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("common/ack.json")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server, false);
    assert_eq!(controller.delete(5).await.unwrap(), DeleteOutcome::Declined);
}

#[tokio::test]
async fn test_rotate_over_http_reveals_and_reloads() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/panel/api-users/rotate/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("credentials/rotate.json")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_list(&mock_server, 1).await;

    let controller = controller_for(&mock_server, true);
    controller.rotate(3).await.unwrap();

    assert_eq!(
        controller.state().visible_secret().unwrap().expose(),
        "rotated-token-9f2c"
    );
}

#[tokio::test]
async fn test_settings_round_trip_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/panel/api-users/settings"))
        .and(body_json(serde_json::json!({
            "apiTokenOnly": true,
            "apiDefaultRateLimit": 120
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("common/ack.json")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/panel/api-users/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("settings/get.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server, true);
    controller
        .save_settings(keygate_client::ApiSettings::default())
        .await
        .unwrap();

    assert!(controller.state().settings_loaded);
}
