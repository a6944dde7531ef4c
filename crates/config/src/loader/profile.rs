//! Profile file loading for configuration.
//!
//! Responsibilities:
//! - Load the JSON profiles file and apply the selected profile to a ConfigLoader.
//!
//! Does NOT handle:
//! - Environment variable parsing (see env.rs).
//! - Building the final Config (see builder.rs).
//!
//! Invariants:
//! - Profile settings are applied before environment variables (env vars take precedence).
//! - Missing profiles (or a missing file) are recorded for later error handling in build().

use std::path::Path;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use super::path::default_config_path;
use crate::types::{ProfileConfig, ProfilesFile};

/// Apply profile configuration from the profiles file to the loader.
///
/// If the profile is not found, this records the missing profile name
/// for later error handling in `build()`.
pub fn apply_profile(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let profile_name = match loader.profile_name() {
        Some(name) => name.clone(),
        None => return Ok(()),
    };

    let config_path = match loader.config_path() {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "profiles file does not exist");
        loader.set_profile_missing(Some(profile_name));
        return Ok(());
    }

    let file = read_profiles_file(&config_path)?;
    match file.profiles.get(&profile_name) {
        Some(profile) => apply_profile_config(loader, profile),
        None => loader.set_profile_missing(Some(profile_name)),
    }
    Ok(())
}

fn read_profiles_file(path: &Path) -> Result<ProfilesFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
    })?;
    serde_json::from_str(&contents).map_err(|_| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
    })
}

fn apply_profile_config(loader: &mut ConfigLoader, profile: &ProfileConfig) {
    if let Some(url) = &profile.base_url {
        loader.set_base_url(Some(url.clone()));
    }
    if let Some(username) = &profile.username {
        loader.set_username(Some(username.clone()));
    }
    if let Some(password) = &profile.password {
        loader.set_password(Some(password.clone()));
    }
    if let Some(token) = &profile.api_token {
        loader.set_api_token(Some(token.clone()));
    }
    if let Some(skip) = profile.skip_verify {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = profile.timeout_seconds {
        loader.set_timeout(Some(std::time::Duration::from_secs(secs)));
    }
    if let Some(retries) = profile.max_retries {
        loader.set_max_retries(Some(retries));
    }
    if let Some(buffer) = profile.session_expiry_buffer_seconds {
        loader.set_session_expiry_buffer_seconds(Some(buffer));
    }
    if let Some(ttl) = profile.session_ttl_seconds {
        loader.set_session_ttl_seconds(Some(ttl));
    }
}
