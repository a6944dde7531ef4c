//! Panel API client for credential administration.
//!
//! This crate provides a type-safe client for the `/panel/api-users` admin
//! endpoints of a 3x-ui style panel. It supports both panel login (cookie
//! session) and API token authentication with automatic session renewal.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
mod serde_helpers;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{AuthStrategy, SessionManager};
pub use client::PanelClient;
pub use client::builder::PanelClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    ApiSettings, CreateCredentialParams, CreatedCredential, Credential, CredentialId, Envelope,
    RateUpdate, RotatedToken,
};
