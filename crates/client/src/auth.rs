//! Authentication strategies and session management.
//!
//! Panel logins are cookie based: the session cookie lives in the HTTP
//! client's cookie store, and `SessionManager` only tracks when that login
//! happened so it can be renewed before it lapses.

use secrecy::{ExposeSecret, SecretString};
use std::time::{Duration, Instant};

/// Strategy for authenticating with the panel.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Panel login with username and password.
    /// The client logs in lazily and keeps the session cookie.
    SessionToken {
        username: String,
        password: SecretString,
    },
    /// API token sent as `Authorization: Bearer` on every request.
    ApiToken { token: SecretString },
}

/// Tracks the panel login session.
#[derive(Debug)]
pub struct SessionManager {
    auth_strategy: AuthStrategy,
    session: Option<LoginSession>,
}

/// A completed login with its assumed lifetime.
#[derive(Debug, Clone, Copy)]
struct LoginSession {
    expires_at: Instant,
    expiry_buffer: Duration,
}

impl LoginSession {
    fn is_expired(&self) -> bool {
        self.expires_at
            .saturating_duration_since(Instant::now())
            .is_zero()
    }

    /// True when less than the buffer window remains.
    fn will_expire_soon(&self) -> bool {
        self.expires_at.saturating_duration_since(Instant::now()) < self.expiry_buffer
    }
}

impl SessionManager {
    /// Create a new session manager with the given auth strategy.
    pub fn new(strategy: AuthStrategy) -> Self {
        Self {
            auth_strategy: strategy,
            session: None,
        }
    }

    pub fn strategy(&self) -> &AuthStrategy {
        &self.auth_strategy
    }

    /// Check if we're using API token auth (no session management needed).
    pub fn is_api_token(&self) -> bool {
        matches!(self.auth_strategy, AuthStrategy::ApiToken { .. })
    }

    /// The bearer token for API token auth; `None` for session auth.
    pub fn bearer_token(&self) -> Option<&str> {
        match &self.auth_strategy {
            AuthStrategy::ApiToken { token } => Some(token.expose_secret()),
            AuthStrategy::SessionToken { .. } => None,
        }
    }

    /// Record a successful login that stays valid for `ttl_seconds`.
    pub fn mark_logged_in(&mut self, ttl_seconds: u64, expiry_buffer_seconds: u64) {
        self.session = Some(LoginSession {
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            expiry_buffer: Duration::from_secs(expiry_buffer_seconds),
        });
    }

    /// Returns false for API token auth, true if no login happened yet.
    fn check_session<F>(&self, check: F) -> bool
    where
        F: FnOnce(&LoginSession) -> bool,
    {
        if self.is_api_token() {
            return false;
        }
        self.session.as_ref().map(check).unwrap_or(true)
    }

    pub fn is_session_expired(&self) -> bool {
        self.check_session(LoginSession::is_expired)
    }

    /// Check if the session will expire within the buffer window.
    pub fn session_expires_soon(&self) -> bool {
        self.check_session(LoginSession::will_expire_soon)
    }

    /// Whether a login is needed before the next request.
    pub fn needs_login(&self) -> bool {
        self.is_session_expired() || self.session_expires_soon()
    }

    /// Forget the current login (force re-authentication).
    pub fn clear_session(&mut self) {
        self.session = None;
    }
}
