//! API access policy endpoints.

use reqwest::Client;

use crate::endpoints::{api_users_url, authorize, read_envelope, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::ApiSettings;

const SETTINGS_ENDPOINT: &str = "/panel/api-users/settings";

/// Fetch the current API access policy.
pub async fn get_api_settings(
    client: &Client,
    base_url: &str,
    bearer: Option<&str>,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<ApiSettings> {
    let builder = authorize(client.get(api_users_url(base_url, "/settings")), bearer);
    let response =
        send_request_with_retry(builder, max_retries, SETTINGS_ENDPOINT, "GET", metrics).await?;

    read_envelope::<ApiSettings>(response, SETTINGS_ENDPOINT, metrics)
        .await?
        .ok_or_else(|| {
            ClientError::InvalidResponse(format!("{SETTINGS_ENDPOINT}: missing settings object"))
        })
}

/// Replace the API access policy.
pub async fn update_api_settings(
    client: &Client,
    base_url: &str,
    bearer: Option<&str>,
    settings: &ApiSettings,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    let builder =
        authorize(client.post(api_users_url(base_url, "/settings")), bearer).json(settings);
    let response =
        send_request_with_retry(builder, max_retries, SETTINGS_ENDPOINT, "POST", metrics).await?;

    read_envelope::<serde_json::Value>(response, SETTINGS_ENDPOINT, metrics).await?;
    Ok(())
}
