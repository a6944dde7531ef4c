//! Error types for controller operations.
//!
//! Declining a confirmation is not an error; see [`crate::DeleteOutcome`].

use keygate_client::ClientError;
use thiserror::Error;

/// Input rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Rate limit must be a non-negative integer")]
    NegativeRate,

    #[error("Rate limit {0} is out of range")]
    RateOutOfRange(i64),

    #[error("A credential id must be provided")]
    InvalidId,
}

/// A request that reached the transport and failed there or at the server.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct RequestFailure {
    pub operation: &'static str,
    #[source]
    pub source: ClientError,
}

impl RequestFailure {
    pub fn new(operation: &'static str, source: ClientError) -> Self {
        Self { operation, source }
    }
}

#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestFailure),
}

impl PanelError {
    /// The underlying transport error, if the failure came from a request.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Request(failure) => Some(&failure.source),
            Self::Validation(_) => None,
        }
    }
}
