//! Core TOML config loading: read from path or platform default.

use std::path::Path;

use studybuddy_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::StudyBuddyConfig;
use crate::validation;

/// Load config from a specific TOML file.
///
/// Missing fields take their defaults. A config that fails validation is
/// still returned, with a warning.
pub fn load_from_path(path: &Path) -> Result<StudyBuddyConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: StudyBuddyConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}, using parsed values anyway");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform default path, creating it if absent.
pub fn load_default() -> Result<StudyBuddyConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(StudyBuddyConfig::default())
        }
        other => other,
    }
}
