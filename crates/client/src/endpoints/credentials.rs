//! Credential ("API user") admin endpoints.

use reqwest::Client;

use crate::endpoints::{api_users_url, authorize, read_envelope, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{
    CreateCredentialParams, CreatedCredential, Credential, CredentialId, RateUpdate, RotatedToken,
};

/// List all credentials. A success envelope without `obj` is an empty list.
pub async fn list_credentials(
    client: &Client,
    base_url: &str,
    bearer: Option<&str>,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<Credential>> {
    let endpoint = "/panel/api-users/list";
    let builder = authorize(client.get(api_users_url(base_url, "/list")), bearer);
    let response = send_request_with_retry(builder, max_retries, endpoint, "GET", metrics).await?;

    Ok(read_envelope::<Vec<Credential>>(response, endpoint, metrics)
        .await?
        .unwrap_or_default())
}

/// Create a credential. The returned token is shown once and never again.
pub async fn create_credential(
    client: &Client,
    base_url: &str,
    bearer: Option<&str>,
    params: &CreateCredentialParams,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<CreatedCredential> {
    let endpoint = "/panel/api-users/create";
    let builder = authorize(client.post(api_users_url(base_url, "/create")), bearer).json(params);
    let response = send_request_with_retry(builder, max_retries, endpoint, "POST", metrics).await?;

    Ok(read_envelope::<CreatedCredential>(response, endpoint, metrics)
        .await?
        .unwrap_or(CreatedCredential {
            user: None,
            token: None,
        }))
}

/// Enable or disable a credential.
pub async fn set_credential_enabled(
    client: &Client,
    base_url: &str,
    bearer: Option<&str>,
    id: CredentialId,
    enabled: bool,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    let (action, endpoint) = if enabled {
        ("enable", "/panel/api-users/enable/{id}")
    } else {
        ("disable", "/panel/api-users/disable/{id}")
    };
    let url = api_users_url(base_url, &format!("/{action}/{id}"));
    let builder = authorize(client.post(url), bearer);
    let response = send_request_with_retry(builder, max_retries, endpoint, "POST", metrics).await?;

    read_envelope::<serde_json::Value>(response, endpoint, metrics).await?;
    Ok(())
}

/// Delete a credential permanently.
pub async fn delete_credential(
    client: &Client,
    base_url: &str,
    bearer: Option<&str>,
    id: CredentialId,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    let endpoint = "/panel/api-users/delete/{id}";
    let url = api_users_url(base_url, &format!("/delete/{id}"));
    let builder = authorize(client.post(url), bearer);
    let response = send_request_with_retry(builder, max_retries, endpoint, "POST", metrics).await?;

    read_envelope::<serde_json::Value>(response, endpoint, metrics).await?;
    Ok(())
}

/// Issue a new token for a credential, invalidating the old one.
///
/// A success envelope without a token is [`ClientError::InvalidResponse`]:
/// the old token is already gone and the new one would be lost.
pub async fn rotate_credential_token(
    client: &Client,
    base_url: &str,
    bearer: Option<&str>,
    id: CredentialId,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<RotatedToken> {
    let endpoint = "/panel/api-users/rotate/{id}";
    let url = api_users_url(base_url, &format!("/rotate/{id}"));
    let builder = authorize(client.post(url), bearer);
    let response = send_request_with_retry(builder, max_retries, endpoint, "POST", metrics).await?;

    match read_envelope::<RotatedToken>(response, endpoint, metrics).await? {
        Some(rotated) if rotated.token.is_some() => Ok(rotated),
        _ => Err(ClientError::InvalidResponse(format!(
            "{endpoint}: success response carried no token"
        ))),
    }
}

/// Set a credential's own rate limit (0 = use the default).
pub async fn update_credential_rate(
    client: &Client,
    base_url: &str,
    bearer: Option<&str>,
    id: CredentialId,
    rate: u32,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    let endpoint = "/panel/api-users/rate/{id}";
    let url = api_users_url(base_url, &format!("/rate/{id}"));
    let builder = authorize(client.post(url), bearer).json(&RateUpdate { rate });
    let response = send_request_with_retry(builder, max_retries, endpoint, "POST", metrics).await?;

    read_envelope::<serde_json::Value>(response, endpoint, metrics).await?;
    Ok(())
}
