//! Default location of the profiles file.

use std::path::PathBuf;

use super::error::ConfigError;

/// Returns the default path to the profiles file.
///
/// - Linux: `~/.config/keygate/config.json`
/// - macOS: `~/Library/Application Support/keygate/config.json`
/// - Windows: `%AppData%\keygate\config\config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = directories::ProjectDirs::from("", "", "keygate").ok_or_else(|| {
        ConfigError::ConfigDirUnavailable("no home directory for the current user".to_string())
    })?;

    Ok(proj_dirs.config_dir().join("config.json"))
}
