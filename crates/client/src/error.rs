//! Error types for the panel client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during panel client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success HTTP status from the panel.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// The panel answered with `success: false`.
    #[error("{endpoint} rejected the request: {message}")]
    Rejected { endpoint: String, message: String },

    /// Session expired and could not be renewed.
    #[error("Session expired for '{username}', please log in again")]
    SessionExpired { username: String },

    /// Invalid response format from the panel.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Check if this error is transient and the caller may try again later.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_timeout() || e.is_connect(),
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            Self::MaxRetriesExceeded(_) => true,
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502, 503, 504: transient gateway/server errors
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::AuthFailed(_) | Self::SessionExpired { .. } => true,
            Self::ApiError { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            Self::MaxRetriesExceeded(_) => Some(429),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "https://localhost:2053/panel/api-users/list".to_string(),
            message: "nope".to_string(),
        }
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(ClientError::AuthFailed("test".to_string()).is_auth_error());
        assert!(
            ClientError::SessionExpired {
                username: "admin".to_string()
            }
            .is_auth_error()
        );
        assert!(api_error(401).is_auth_error());
        assert!(api_error(403).is_auth_error());
        assert!(!api_error(404).is_auth_error());
    }

    #[test]
    fn test_is_retryable_status() {
        assert!(ClientError::is_retryable_status(429));
        assert!(ClientError::is_retryable_status(502));
        assert!(ClientError::is_retryable_status(503));
        assert!(ClientError::is_retryable_status(504));

        assert!(!ClientError::is_retryable_status(400));
        assert!(!ClientError::is_retryable_status(401));
        assert!(!ClientError::is_retryable_status(404));
        assert!(!ClientError::is_retryable_status(500));
        assert!(!ClientError::is_retryable_status(200));
    }

    #[test]
    fn test_rejected_is_not_retryable() {
        let err = ClientError::Rejected {
            endpoint: "/panel/api-users/create".to_string(),
            message: "name required".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(!err.is_auth_error());
        assert_eq!(
            err.to_string(),
            "/panel/api-users/create rejected the request: name required"
        );
    }

    #[test]
    fn test_status_extraction() {
        assert_eq!(api_error(500).status(), Some(500));
        assert_eq!(ClientError::MaxRetriesExceeded(4).status(), Some(429));
        assert_eq!(ClientError::InvalidResponse("x".to_string()).status(), None);
    }
}
