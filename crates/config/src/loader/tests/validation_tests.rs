//! Validation of URLs, timeouts, session TTL and retry bounds.

use crate::loader::builder::{ConfigLoader, validate_and_normalize_base_url};
use crate::loader::error::ConfigError;
use proptest::prelude::*;
use std::time::Duration;

fn loader() -> ConfigLoader {
    ConfigLoader::new()
        .with_base_url("https://localhost:2053".to_string())
        .with_api_token("token".to_string())
}

#[test]
fn test_rejects_non_http_scheme() {
    let result = validate_and_normalize_base_url("ftp://localhost:2053");
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_rejects_relative_url() {
    let result = validate_and_normalize_base_url("localhost:2053/panel");
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_blank_url_is_missing() {
    let result = validate_and_normalize_base_url("   ");
    assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
}

#[test]
fn test_rejects_query_string() {
    let result = validate_and_normalize_base_url("https://localhost:2053/?x=1");
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_zero_timeout_rejected() {
    let result = loader().with_timeout(Duration::from_secs(0)).build();
    assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
}

#[test]
fn test_timeout_above_max_rejected() {
    let result = loader().with_timeout(Duration::from_secs(3601)).build();
    assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
}

#[test]
fn test_max_retries_above_bound_rejected() {
    let result = loader().with_max_retries(11).build();
    assert!(matches!(result, Err(ConfigError::InvalidMaxRetries { .. })));
}

proptest! {
    #[test]
    fn prop_normalized_url_never_ends_with_slash(
        host in "[a-z]{1,12}",
        port in 1u16..=65535,
        path in "(/[a-z0-9]{1,8}){0,3}/?",
    ) {
        let raw = format!("https://{host}.example:{port}{path}");
        let normalized = validate_and_normalize_base_url(&raw).unwrap();
        prop_assert!(!normalized.ends_with('/'));
        prop_assert!(normalized.starts_with("https://"));
    }
}
