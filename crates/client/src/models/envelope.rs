//! The `{success, msg, obj}` envelope every panel endpoint answers with.

use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Standard panel response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub msg: String,
    pub obj: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap a successful envelope into its (possibly absent) payload.
    ///
    /// `success: false` becomes [`ClientError::Rejected`] carrying the panel's message.
    pub fn into_result(self, endpoint: &str) -> Result<Option<T>> {
        if self.success {
            Ok(self.obj)
        } else {
            let message = if self.msg.trim().is_empty() {
                "request was not successful".to_string()
            } else {
                self.msg
            };
            Err(ClientError::Rejected {
                endpoint: endpoint.to_string(),
                message,
            })
        }
    }
}
