//! Shared test utilities for keygate integration tests.
//!
//! Invariants / Assumptions:
//! - `DOTENV_DISABLED=1` keeps a developer's `.env` out of the tests.
//! - `KEYGATE_API_TOKEN` is "test-token" unless a test overrides it.
//! - Retries are off so rate-limit tests do not sleep.

#![allow(dead_code)]

use assert_cmd::Command;
pub use keygate_client::testing::load_fixture;
pub use wiremock::matchers::{body_json, header, method, path};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns a hermetic `keygate` command.
pub fn keygate_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("keygate");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("KEYGATE_API_TOKEN", "test-token");
    cmd.env("KEYGATE_MAX_RETRIES", "0");

    cmd.env_remove("KEYGATE_BASE_URL")
        .env_remove("KEYGATE_USERNAME")
        .env_remove("KEYGATE_PASSWORD")
        .env_remove("KEYGATE_PROFILE")
        .env_remove("KEYGATE_CONFIG_PATH")
        .env_remove("KEYGATE_SKIP_VERIFY")
        .env_remove("KEYGATE_TIMEOUT")
        .env_remove("KEYGATE_METRICS_BIND")
        .env_remove("RUST_LOG");

    cmd
}

/// `keygate_cmd()` pointed at `server`.
pub fn keygate_cmd_for(server: &MockServer) -> Command {
    let mut cmd = keygate_cmd();
    cmd.env("KEYGATE_BASE_URL", server.uri());
    cmd
}

pub async fn mount_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/panel/api-users/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("credentials/list.json")))
        .mount(server)
        .await;
}

pub async fn mount_empty_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/panel/api-users/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "msg": "",
            "obj": []
        })))
        .mount(server)
        .await;
}

pub fn ack() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(load_fixture("common/ack.json"))
}

pub fn rejected(msg: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "success": false,
        "msg": msg,
        "obj": null
    }))
}
