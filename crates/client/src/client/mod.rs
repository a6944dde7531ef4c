//! Main panel API client and API methods.
//!
//! This module provides the primary [`PanelClient`] for the credential admin
//! endpoints. It automatically handles authentication and session management.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Login and session renewal helpers
//! - `credentials`: Credential list/create/enable/disable/rotate/rate/delete
//! - `settings`: API access policy
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Login session bookkeeping (delegated to [`crate::auth::SessionManager`])
//!
//! # Invariants
//! - All API methods handle 401/403 by logging in again and retrying once
//!   (session auth only; API tokens do not trigger retries)
//! - The `retry_call!` macro centralizes this retry pattern across all API methods

pub mod builder;
mod credentials;
mod session;
mod settings;

use crate::auth::SessionManager;
use crate::metrics::MetricsCollector;

/// Wrap an async API call with automatic re-login on 401/403 errors.
///
/// `$bearer` is bound to the bearer token (`Option<String>`, `None` for
/// session auth) before each attempt.
///
/// ```ignore
/// retry_call!(self, __bearer, endpoints::list_credentials(&self.http, &self.base_url, __bearer.as_deref(), ...).await)
/// ```
#[macro_export]
macro_rules! retry_call {
    ($self:expr, $bearer:ident, $call:expr) => {{
        let $bearer = $self.ensure_authenticated().await?;
        let result = $call;

        match result {
            Ok(data) => Ok(data),
            Err($crate::error::ClientError::ApiError { status, .. })
                if (status == 401 || status == 403) && !$self.is_api_token_auth() =>
            {
                ::tracing::debug!(
                    "Session rejected (status {}), logging in again...",
                    status
                );
                $self.session_manager.clear_session();
                let $bearer = $self.ensure_authenticated().await?;
                $call
            }
            Err(e) => Err(e),
        }
    }};
}

/// Panel admin API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use keygate_client::{PanelClient, AuthStrategy};
/// use secrecy::SecretString;
///
/// let client = PanelClient::builder()
///     .base_url("https://panel.example.com:2053/s3cret".to_string())
///     .auth_strategy(AuthStrategy::ApiToken {
///         token: SecretString::new("my-token".to_string().into()),
///     })
///     .build()?;
/// ```
#[derive(Debug)]
pub struct PanelClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) session_manager: SessionManager,
    pub(crate) max_retries: usize,
    pub(crate) session_ttl_seconds: u64,
    pub(crate) session_expiry_buffer_seconds: u64,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl PanelClient {
    /// Create a new client builder.
    pub fn builder() -> builder::PanelClientBuilder {
        builder::PanelClientBuilder::new()
    }

    /// Panel root URL including the web base path.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
