//! Credential ("API user") models.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::settings::ApiSettings;

/// Server-assigned credential identifier. Never 0 for a stored credential.
pub type CredentialId = u64;

/// A named API credential as listed by the panel.
///
/// There is no secret field: a `token` key in a listing is dropped during
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: CredentialId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    /// Requests per minute; 0 means "use the default rate limit".
    #[serde(default, deserialize_with = "crate::serde_helpers::rate_from_signed")]
    pub rate_limit_per_minute: u32,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Stable list key.
    pub fn key(&self) -> CredentialId {
        self.id
    }

    /// The limit the panel enforces for this credential.
    pub fn effective_rate_limit(&self, settings: &ApiSettings) -> u32 {
        if self.rate_limit_per_minute == 0 {
            settings.default_rate_limit_per_minute
        } else {
            self.rate_limit_per_minute
        }
    }
}

/// Body of `POST /create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCredentialParams {
    pub name: String,
    pub rate: u32,
}

/// Body of `POST /rate/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateUpdate {
    pub rate: u32,
}

/// Payload of a successful create: the stored credential and its one-time token.
#[derive(Debug, Deserialize)]
pub struct CreatedCredential {
    #[serde(default)]
    pub user: Option<Credential>,
    #[serde(default, deserialize_with = "crate::serde_helpers::opt_secret_token")]
    pub token: Option<SecretString>,
}

/// Payload of a successful rotate.
#[derive(Debug, Deserialize)]
pub struct RotatedToken {
    #[serde(default, deserialize_with = "crate::serde_helpers::opt_secret_token")]
    pub token: Option<SecretString>,
}
