//! Where the config file lives, and first-run creation of it.

use std::path::{Path, PathBuf};

use studybuddy_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "studybuddy";
const CONFIG_FILE: &str = "config.toml";

/// `<config_dir>/studybuddy/config.toml`, e.g. `~/.config/studybuddy/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, default_config_toml())
    };
    write().map_err(|e| {
        ConfigError::ParseError(format!("cannot write default config {}: {e}", path.display()))
    })?;

    info!(path = %path.display(), "wrote default config");
    Ok(())
}
