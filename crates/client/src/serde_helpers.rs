//! Serde helpers for panel response quirks.
//!
//! Invariants / assumptions:
//! - The panel serializes Go `int` fields; rate limits are clamped server side
//!   but are still typed signed on the wire.
//! - An empty token string means "no token was issued".
//! - These helpers must not log or print secrets.

use secrecy::SecretString;
use serde::Deserialize;

/// Deserialize a signed rate as `u32`, clamping negatives to zero.
pub fn rate_from_signed<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?.unwrap_or(0);
    Ok(value.clamp(0, i64::from(u32::MAX)) as u32)
}

/// Deserialize an optional token; missing, null and blank all become `None`.
pub fn opt_secret_token<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|token| !token.trim().is_empty())
        .map(|token| SecretString::new(token.into())))
}
