//! Connection configuration types for keygate.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeouts, retries, session TTL).
//! - Define the main `Config` structure combining connection and auth.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - `base_url` already includes the panel's web base path, without a trailing slash.

use crate::constants::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_MAX_RETRIES, DEFAULT_SESSION_TTL_SECS,
    DEFAULT_TIMEOUT_SECS,
};
use crate::types::auth::{AuthConfig, AuthStrategy};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for a panel instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Panel root URL including its web base path (e.g., https://panel.example.com:2053/secret)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: usize,
    /// Seconds before session expiry at which a new login is performed
    #[serde(default = "default_session_expiry_buffer")]
    pub session_expiry_buffer_seconds: u64,
    /// How long a panel login session is assumed to stay valid
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
}

pub(crate) fn default_session_expiry_buffer() -> u64 {
    DEFAULT_EXPIRY_BUFFER_SECS
}

pub(crate) fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

impl ConnectionConfig {
    /// Connection settings for `base_url` with every other field at its default.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            session_expiry_buffer_seconds: default_session_expiry_buffer(),
            session_ttl_seconds: default_session_ttl(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
}

impl Config {
    /// Create a new config with the specified base URL and API token.
    pub fn with_api_token(base_url: String, token: SecretString) -> Self {
        Self {
            connection: ConnectionConfig::with_base_url(base_url),
            auth: AuthConfig {
                strategy: AuthStrategy::ApiToken { token },
            },
        }
    }

    /// Create a new config with the specified base URL and panel login.
    pub fn with_session_token(base_url: String, username: String, password: SecretString) -> Self {
        Self {
            connection: ConnectionConfig::with_base_url(base_url),
            auth: AuthConfig {
                strategy: AuthStrategy::SessionToken { username, password },
            },
        }
    }
}
