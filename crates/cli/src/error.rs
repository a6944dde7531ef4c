//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` and `PanelError` values to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for Ctrl+C (Unix standard: 128 + SIGINT).
//! - A declined delete is not an error and exits 0.

use keygate_client::ClientError;
use keygate_panel::PanelError;

/// Structured exit codes for `keygate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,

    /// Unhandled or generic failure, including configuration errors.
    GeneralError = 1,

    /// Invalid credentials, expired session, or HTTP 401.
    ///
    /// Scripts should refresh credentials.
    AuthenticationFailed = 2,

    /// Network, timeout, DNS, or malformed base URL.
    ///
    /// Scripts may retry with backoff.
    ConnectionError = 3,

    /// The panel reported that the API user does not exist.
    NotFound = 4,

    /// Input refused locally or by the panel.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// HTTP 403.
    PermissionDenied = 6,

    /// HTTP 429 after all retries.
    RateLimited = 7,

    /// HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) => ExitCode::AuthenticationFailed,
            ClientError::SessionExpired { .. } => ExitCode::AuthenticationFailed,

            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::Rejected { message, .. } => {
                if message.to_ascii_lowercase().contains("not found") {
                    ExitCode::NotFound
                } else {
                    ExitCode::ValidationError
                }
            }
            ClientError::InvalidResponse(_) => ExitCode::ValidationError,

            ClientError::ApiError { status: 400, .. } => ExitCode::ValidationError,
            ClientError::ApiError { status: 401, .. } => ExitCode::AuthenticationFailed,
            ClientError::ApiError { status: 403, .. } => ExitCode::PermissionDenied,
            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,
            ClientError::ApiError { status: 429, .. } => ExitCode::RateLimited,
            ClientError::ApiError {
                status: 502..=504, ..
            } => ExitCode::ServiceUnavailable,
            ClientError::ApiError { .. } => ExitCode::GeneralError,

            // Only 429 responses are retried, so exhaustion means rate limiting
            ClientError::MaxRetriesExceeded(_) => ExitCode::RateLimited,
        }
    }
}

impl From<&PanelError> for ExitCode {
    fn from(err: &PanelError) -> Self {
        match err {
            PanelError::Validation(_) => ExitCode::ValidationError,
            PanelError::Request(failure) => ExitCode::from(&failure.source),
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no panel or client error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(panel_err) = cause.downcast_ref::<PanelError>() {
                return ExitCode::from(panel_err);
            }
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
        }

        ExitCode::GeneralError
    }
}
