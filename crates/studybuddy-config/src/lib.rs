//! StudyBuddy configuration and local preferences.
//!
//! Provides TOML-based configuration with validation, plus a small JSON
//! preference store for UI toggles that survive restarts. All config
//! sections use defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use studybuddy_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("talking to {}", config.api.base_url);
//! ```

pub mod prefs;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use prefs::{PreferenceStore, Preferences, Theme};
pub use schema::{ApiConfig, LogLevel, LoggingConfig, MessengerConfig, StudyBuddyConfig};

use studybuddy_common::ConfigError;

/// Load config from the platform default path.
///
/// Creates a commented default `config.toml` if none exists, then
/// validates the result.
pub fn load_config() -> Result<StudyBuddyConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let config = StudyBuddyConfig::default();
        assert!(validation::validate(&config).is_ok());
    }

    #[test]
    fn default_config_serializes_every_section() {
        let toml_str = toml::to_string(&StudyBuddyConfig::default()).unwrap();
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[messenger]"));
        assert!(toml_str.contains("[logging]"));
    }
}
