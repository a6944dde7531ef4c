//! Data models for panel API responses.
//!
//! This module contains the response envelope and the typed payloads of the
//! `/panel/api-users` endpoints.

mod credentials;
mod envelope;
mod settings;

pub use credentials::{
    CreateCredentialParams, CreatedCredential, Credential, CredentialId, RateUpdate, RotatedToken,
};
pub use envelope::Envelope;
pub use settings::ApiSettings;
