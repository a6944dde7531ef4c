//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `KEYGATE_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Loading from profile files (see profile.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::MAX_MAX_RETRIES;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an environment variable into `T`, mapping failures to `InvalidValue`.
fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
///
/// Environment variables take precedence over profile settings.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("KEYGATE_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(username) = env_var_or_none("KEYGATE_USERNAME") {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none("KEYGATE_PASSWORD") {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(token) = env_var_or_none("KEYGATE_API_TOKEN") {
        loader.set_api_token(Some(SecretString::new(token.into())));
    }
    if let Some(skip) = parse_env::<bool>("KEYGATE_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("KEYGATE_TIMEOUT", "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(value) =
        parse_env::<usize>("KEYGATE_MAX_RETRIES", "must be a non-negative integer")?
    {
        if value > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!("must be between 0 and {} (got {})", MAX_MAX_RETRIES, value),
            });
        }
        loader.set_max_retries(Some(value));
    }
    if let Some(buffer) = parse_env::<u64>("KEYGATE_SESSION_EXPIRY_BUFFER", "must be a number")? {
        loader.set_session_expiry_buffer_seconds(Some(buffer));
    }
    if let Some(ttl) = parse_env::<u64>("KEYGATE_SESSION_TTL", "must be a number")? {
        loader.set_session_ttl_seconds(Some(ttl));
    }

    // Config path and profile name from environment (only if not already set via CLI)
    if loader.config_path().is_none()
        && let Some(config_path) = env_var_or_none("KEYGATE_CONFIG_PATH")
    {
        loader.set_config_path(Some(std::path::PathBuf::from(config_path)));
    }
    if loader.profile_name().is_none()
        && let Some(profile) = env_var_or_none("KEYGATE_PROFILE")
    {
        loader.set_profile_name(Some(profile));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key1 = "_KEYGATE_TEST_UNSET_VAR";
        assert!(env_var_or_none(key1).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key1, Some(""))], || {
            assert!(env_var_or_none(key1).is_none());
        });

        temp_env::with_vars([(key1, Some("   "))], || {
            assert!(env_var_or_none(key1).is_none());
        });

        let key2 = "_KEYGATE_TEST_SET_VAR";
        temp_env::with_vars([(key2, Some(" test-value "))], || {
            assert_eq!(env_var_or_none(key2), Some("test-value".to_string()));
        });
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_names_the_variable() {
        temp_env::with_vars([("KEYGATE_TIMEOUT", Some("soon"))], || {
            let mut loader = ConfigLoader::new();
            match apply_env(&mut loader) {
                Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "KEYGATE_TIMEOUT"),
                other => panic!("expected InvalidValue, got {other:?}"),
            }
        });
    }

    #[test]
    #[serial]
    fn test_max_retries_above_bound_rejected() {
        temp_env::with_vars([("KEYGATE_MAX_RETRIES", Some("99"))], || {
            let mut loader = ConfigLoader::new();
            assert!(matches!(
                apply_env(&mut loader),
                Err(ConfigError::InvalidMaxRetries { .. })
            ));
        });
    }
}
