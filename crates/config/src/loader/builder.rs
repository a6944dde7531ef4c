//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Build and validate the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Profile file loading logic (delegated to profile.rs).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over profile file values.
//! - Builder methods take precedence over environment variables when called after `from_env()`.
//! - An API token takes precedence over username/password.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::profile::apply_profile;
use crate::constants::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_MAX_RETRIES, DEFAULT_SESSION_TTL_SECS,
    DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES, MAX_SESSION_TTL_SECS, MAX_TIMEOUT_SECS,
};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig};

/// Configuration loader that builds config from environment variables and profiles.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    api_token: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    session_expiry_buffer_seconds: Option<u64>,
    session_ttl_seconds: Option<u64>,
    profile_name: Option<String>,
    profile_missing: Option<String>,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Set the active profile name to load from the profiles file.
    pub fn with_profile_name(mut self, name: String) -> Self {
        self.profile_name = Some(name);
        self
    }

    /// Override the profiles file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Read configuration from the selected profile.
    pub fn from_profile(mut self) -> Result<Self, ConfigError> {
        apply_profile(&mut self)?;
        Ok(self)
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    pub fn with_api_token(mut self, token: String) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// True when base_url and a complete auth pair are present.
    fn has_complete_config(&self) -> bool {
        let has_complete_auth =
            self.api_token.is_some() || (self.username.is_some() && self.password.is_some());
        self.base_url.is_some() && has_complete_auth
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        if let Some(ref profile_name) = self.profile_missing {
            // Env/CLI values may fully stand in for a missing profile
            if !self.has_complete_config() {
                return Err(ConfigError::ProfileNotFound(profile_name.clone()));
            }
        }

        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let strategy = if let Some(token) = self.api_token {
            AuthStrategy::ApiToken { token }
        } else if let (Some(username), Some(password)) = (self.username, self.password) {
            AuthStrategy::SessionToken { username, password }
        } else {
            return Err(ConfigError::MissingAuth);
        };

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            session_expiry_buffer_seconds: self
                .session_expiry_buffer_seconds
                .unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
            session_ttl_seconds: self.session_ttl_seconds.unwrap_or(DEFAULT_SESSION_TTL_SECS),
        };

        Self::validate_connection(&connection)?;

        tracing::debug!(
            base_url = %connection.base_url,
            token_auth = matches!(strategy, AuthStrategy::ApiToken { .. }),
            "configuration loaded"
        );

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
        })
    }

    /// Checks timeout, session TTL and retry bounds.
    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.session_ttl_seconds <= connection.session_expiry_buffer_seconds {
            return Err(ConfigError::InvalidSessionTtl {
                message: format!(
                    "session_ttl_seconds ({}) must be greater than session_expiry_buffer_seconds ({})",
                    connection.session_ttl_seconds, connection.session_expiry_buffer_seconds
                ),
            });
        }

        if connection.session_ttl_seconds > MAX_SESSION_TTL_SECS {
            return Err(ConfigError::InvalidSessionTtl {
                message: format!(
                    "session_ttl_seconds exceeds maximum allowed value of {} seconds",
                    MAX_SESSION_TTL_SECS
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }

        Ok(())
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn profile_name(&self) -> Option<&String> {
        self.profile_name.as_ref()
    }

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_profile_name(&mut self, name: Option<String>) {
        self.profile_name = name;
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub(crate) fn set_profile_missing(&mut self, name: Option<String>) {
        self.profile_missing = name;
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_api_token(&mut self, token: Option<SecretString>) {
        self.api_token = token;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_session_expiry_buffer_seconds(&mut self, buffer: Option<u64>) {
        self.session_expiry_buffer_seconds = buffer;
    }

    pub(crate) fn set_session_ttl_seconds(&mut self, ttl: Option<u64>) {
        self.session_ttl_seconds = ttl;
    }
}

/// Validates and normalizes a base URL string.
///
/// Validation rules:
/// - Trim surrounding whitespace
/// - Treat blank/whitespace-only as missing (returns Err(ConfigError::MissingBaseUrl))
/// - Parse as an absolute URL with an http or https scheme and a host
/// - Keep the path (the panel's web base path), strip the trailing slash
pub(crate) fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://localhost:2053): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!(
                "scheme must be http or https (e.g. https://localhost:2053), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://localhost:2053)".into(),
        });
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "must not contain a query string or fragment".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
