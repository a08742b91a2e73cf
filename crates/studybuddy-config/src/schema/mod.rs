//! Configuration schema types for StudyBuddy.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod messenger;
mod system;

pub use api::*;
pub use messenger::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyBuddyConfig {
    pub api: ApiConfig,
    pub messenger: MessengerConfig,
    pub logging: LoggingConfig,
}
