//! Global API access policy.

use keygate_config::constants::{DEFAULT_API_RATE_LIMIT_PER_MINUTE, DEFAULT_API_TOKEN_ONLY};
use serde::{Deserialize, Serialize};

/// The panel's API access policy, replaced wholesale on every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// API requests must present a token; a logged-in browser session is not enough.
    #[serde(rename = "apiTokenOnly")]
    pub token_only: bool,
    /// Rate limit applied to credentials whose own limit is 0.
    #[serde(
        rename = "apiDefaultRateLimit",
        deserialize_with = "crate::serde_helpers::rate_from_signed"
    )]
    pub default_rate_limit_per_minute: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            token_only: DEFAULT_API_TOKEN_ONLY,
            default_rate_limit_per_minute: DEFAULT_API_RATE_LIMIT_PER_MINUTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let settings = ApiSettings {
            token_only: false,
            default_rate_limit_per_minute: 90,
        };
        let json = serde_json::to_value(settings).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"apiTokenOnly": false, "apiDefaultRateLimit": 90})
        );
    }

    #[test]
    fn test_defaults() {
        let settings = ApiSettings::default();
        assert!(settings.token_only);
        assert_eq!(settings.default_rate_limit_per_minute, 120);
    }
}
