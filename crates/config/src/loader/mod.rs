//! Configuration loader for environment variables and files.
//!
//! Responsibilities:
//! - Load configuration from `.env` files, environment variables, and JSON profile files.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Writing profiles back to disk.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over profile file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;
mod path;
mod profile;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
pub use path::default_config_path;

#[cfg(test)]
mod tests;
