//! Request helpers: authorization, retry with exponential backoff, envelope decoding.
//!
//! Requests that fail with HTTP 429 (Too Many Requests) are retried with
//! exponential backoff between attempts. Every other status is final.

use std::time::Instant;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::Envelope;

/// Attach the bearer token when API token auth is in use.
///
/// Session auth relies on the cookie store instead, so `None` leaves the request untouched.
pub fn authorize(builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
    match bearer {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Sends an HTTP request with automatic retry logic for HTTP 429 responses.
///
/// - Exponential backoff of 2^attempt seconds (1s, 2s, 4s, ...)
/// - At most `max_retries` retries after the initial attempt
/// - Non-2xx responses become [`ClientError::ApiError`] with the response body as message
///
/// `endpoint` is the path template used for logging and metrics labels.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!(endpoint, "Cannot clone request builder for retry");
                return Err(ClientError::MaxRetriesExceeded(attempt));
            }
        };

        if let Some(m) = metrics {
            m.record_request(endpoint, method);
            if attempt > 0 {
                m.record_retry(endpoint, method, attempt);
            }
        }

        let started = Instant::now();
        let sent = attempt_builder.send().await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                let err = ClientError::from(e);
                if let Some(m) = metrics {
                    m.record_request_duration(endpoint, method, started.elapsed(), None);
                    m.record_client_error(endpoint, method, &err);
                }
                return Err(err);
            }
        };

        let status = response.status().as_u16();
        if let Some(m) = metrics {
            m.record_request_duration(endpoint, method, started.elapsed(), Some(status));
        }

        if status == 429 {
            if attempt < max_retries {
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    endpoint,
                    attempt = attempt + 1,
                    max_retries = max_retries + 1,
                    backoff_secs,
                    "Rate limited (HTTP 429), retrying with exponential backoff"
                );
                tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                continue;
            }
            debug!(
                endpoint,
                attempts = attempt + 1,
                "Max retries exhausted for rate-limited request"
            );
            let err = ClientError::MaxRetriesExceeded(max_retries + 1);
            if let Some(m) = metrics {
                m.record_client_error(endpoint, method, &err);
            }
            return Err(err);
        }

        if response.status().is_success() {
            if attempt > 0 {
                debug!(endpoint, attempt = attempt + 1, "Request succeeded after retry");
            }
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response body".to_string());
        let message = error_message_from_body(&body, status);
        let err = ClientError::ApiError {
            status,
            url,
            message,
        };
        if let Some(m) = metrics {
            m.record_client_error(endpoint, method, &err);
        }
        return Err(err);
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// Prefer the envelope `msg` of an error body, fall back to the raw body.
fn error_message_from_body(body: &str, status: u16) -> String {
    if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(body)
        && !envelope.msg.trim().is_empty()
    {
        return envelope.msg;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_string()
    }
}

/// Decode a panel envelope and unwrap it.
///
/// A body that does not parse as an envelope of `T` is
/// [`ClientError::InvalidResponse`]; `success: false` is [`ClientError::Rejected`].
pub async fn read_envelope<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Option<T>> {
    let body = response.text().await?;
    let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
        if let Some(m) = metrics {
            m.record_deserialization_failure(endpoint, std::any::type_name::<T>());
        }
        ClientError::InvalidResponse(format!("{endpoint}: {e}"))
    })?;
    envelope.into_result(endpoint)
}
