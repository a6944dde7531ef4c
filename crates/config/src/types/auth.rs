//! Authentication types for keygate configuration.
//!
//! Responsibilities:
//! - Define authentication strategies (panel login session, API token).
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - The login flow itself (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization includes secrets for profile files; secrecy is for runtime safety.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Serde helpers for `SecretString` fields.
pub(crate) mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }

    /// Same as the parent module, for `Option<SecretString>`.
    pub mod option {
        use super::*;

        pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            secret
                .as_ref()
                .map(|s| s.expose_secret())
                .serialize(serializer)
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = Option::<String>::deserialize(deserializer)?;
            Ok(s.map(|s| SecretString::new(s.into())))
        }
    }
}

/// Strategy for authenticating with the panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthStrategy {
    /// Panel login with username and password (cookie session).
    #[serde(rename = "session")]
    SessionToken {
        username: String,
        #[serde(with = "secret_string")]
        password: SecretString,
    },
    /// API token sent as a bearer credential on every request.
    #[serde(rename = "token")]
    ApiToken {
        #[serde(with = "secret_string")]
        token: SecretString,
    },
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The authentication strategy to use.
    #[serde(flatten)]
    pub strategy: AuthStrategy,
}
