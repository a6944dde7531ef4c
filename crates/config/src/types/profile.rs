//! Profile configuration types for keygate.
//!
//! Responsibilities:
//! - Define `ProfileConfig` for named connection profiles.
//! - Define `ProfilesFile`, the on-disk JSON layout holding all profiles.
//!
//! Does NOT handle:
//! - Profile loading or merging (see `loader` module).
//!
//! Invariants:
//! - All fields are optional to allow partial profile definitions.
//! - Unknown keys in the profiles file are ignored.

use std::collections::BTreeMap;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::types::auth::secret_string;

/// Profile configuration for a named panel connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Panel root URL including its web base path
    pub base_url: Option<String>,
    /// Username for panel login
    pub username: Option<String>,
    /// Password for panel login
    #[serde(with = "secret_string::option")]
    pub password: Option<SecretString>,
    /// API token for bearer authentication
    #[serde(with = "secret_string::option")]
    pub api_token: Option<SecretString>,
    /// Whether to skip TLS verification
    pub skip_verify: Option<bool>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: Option<usize>,
    /// Seconds before session expiry at which a new login is performed
    pub session_expiry_buffer_seconds: Option<u64>,
    /// How long a panel login session is assumed to stay valid
    pub session_ttl_seconds: Option<u64>,
}

/// Contents of the profiles file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilesFile {
    pub profiles: BTreeMap<String, ProfileConfig>,
}
