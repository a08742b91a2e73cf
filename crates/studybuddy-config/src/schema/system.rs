//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive scoped to the studybuddy crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "studybuddy=debug",
            LogLevel::Info => "studybuddy=info",
            LogLevel::Warning => "studybuddy=warn",
            LogLevel::Error => "studybuddy=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
