//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::time::Duration;

#[allow(unused_imports)]
pub use keygate_client::testing::load_fixture;

#[allow(unused_imports)]
pub use keygate_client::endpoints;
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use keygate_client::{AuthStrategy, PanelClient};
use secrecy::SecretString;

/// Build a client for the mock server using API token auth.
#[allow(dead_code)]
pub fn token_client(server: &MockServer) -> PanelClient {
    PanelClient::builder()
        .base_url(server.uri())
        .auth_strategy(AuthStrategy::ApiToken {
            token: SecretString::new("test-token".to_string().into()),
        })
        .max_retries(0)
        .build()
        .expect("client should build")
}

/// Build a client for the mock server using panel login.
#[allow(dead_code)]
pub fn session_client(server: &MockServer) -> PanelClient {
    PanelClient::builder()
        .base_url(server.uri())
        .auth_strategy(AuthStrategy::SessionToken {
            username: "admin".to_string(),
            password: SecretString::new("testpassword".to_string().into()),
        })
        .max_retries(0)
        .build()
        .expect("client should build")
}

/// Advance Tokio's paused clock and yield so sleepers can observe the change.
#[allow(dead_code)]
pub async fn advance_and_yield(duration: Duration) {
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
}

/// Assert that a task has not completed after yielding to the scheduler.
#[allow(dead_code)]
pub async fn assert_pending<T>(handle: &tokio::task::JoinHandle<T>, context: &str) {
    tokio::task::yield_now().await;
    assert!(!handle.is_finished(), "Expected pending task: {}", context);
}
