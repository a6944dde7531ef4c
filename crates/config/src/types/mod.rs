//! Configuration type definitions for keygate.
//!
//! Responsibilities:
//! - Define configuration types for authentication, connections, and profiles.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Actual network connections or login flows (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization helpers (`secret_string`, `duration_seconds`) are private modules.

mod auth;
pub(crate) mod connection;
mod profile;

pub use auth::{AuthConfig, AuthStrategy};
pub use connection::{Config, ConnectionConfig};
pub use profile::{ProfileConfig, ProfilesFile};
