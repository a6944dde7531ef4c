//! Configuration management for keygate.
//!
//! This crate provides types and loaders for the panel connection and
//! authentication settings, read from `.env` files, environment variables,
//! and JSON profile files.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, ProfileConfig, ProfilesFile};
