//! Authentication endpoints.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::{LOGIN_PATH, read_envelope, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Log in to the panel with username and password.
///
/// On success the panel sets a session cookie, which the client's cookie
/// store keeps for subsequent requests. A rejected login is
/// [`ClientError::AuthFailed`].
pub async fn login(
    client: &Client,
    base_url: &str,
    username: &str,
    password: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!("Logging in to panel as {}", username);

    let url = format!("{}{}", base_url, LOGIN_PATH);
    let builder = client
        .post(&url)
        .form(&[("username", username), ("password", password)]);
    let response = send_request_with_retry(builder, max_retries, LOGIN_PATH, "POST", metrics).await?;

    match read_envelope::<serde_json::Value>(response, LOGIN_PATH, metrics).await {
        Ok(_) => Ok(()),
        Err(ClientError::Rejected { message, .. }) => Err(ClientError::AuthFailed(message)),
        Err(e) => Err(e),
    }
}
