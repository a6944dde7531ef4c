//! Client-level session management helpers.
//!
//! # Invariants
//! - [`PanelClient::ensure_authenticated`] requires `&mut self` because it may trigger a login
//! - API token authentication never triggers login
//! - Session authentication logs in again before the assumed session lifetime runs out

use crate::auth::AuthStrategy;
use crate::client::PanelClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use secrecy::ExposeSecret;

impl PanelClient {
    /// Make sure the next request is authenticated, logging in if necessary.
    ///
    /// Returns the bearer token for API token auth, `None` for session auth
    /// (the session cookie is sent by the cookie store).
    pub(crate) async fn ensure_authenticated(&mut self) -> Result<Option<String>> {
        if let Some(token) = self.session_manager.bearer_token() {
            return Ok(Some(token.to_string()));
        }

        if self.session_manager.needs_login() {
            self.login().await?;
        }

        Ok(None)
    }

    pub fn is_api_token_auth(&self) -> bool {
        self.session_manager.is_api_token()
    }

    /// Log in with username/password and remember the session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if the strategy is not session based
    /// or the panel rejects the credentials.
    pub async fn login(&mut self) -> Result<()> {
        let AuthStrategy::SessionToken { username, password } = self.session_manager.strategy()
        else {
            return Err(ClientError::AuthFailed(
                "Cannot login with API token auth strategy".to_string(),
            ));
        };

        endpoints::login(
            &self.http,
            &self.base_url,
            username,
            password.expose_secret(),
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
        .map_err(|e| match e {
            ClientError::ApiError { status, .. } if status == 401 || status == 403 => {
                ClientError::SessionExpired {
                    username: username.clone(),
                }
            }
            other => other,
        })?;

        tracing::debug!("Panel login succeeded");
        self.session_manager
            .mark_logged_in(self.session_ttl_seconds, self.session_expiry_buffer_seconds);
        Ok(())
    }
}
