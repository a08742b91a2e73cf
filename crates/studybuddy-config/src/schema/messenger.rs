//! Demo messenger settings.

use serde::{Deserialize, Serialize};

/// Simulated reply behavior for the demo messenger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessengerConfig {
    pub reply_delay_min_ms: u64,
    pub reply_delay_max_ms: u64,
    /// Replacement reply pool. Empty means the built-in replies.
    pub canned_replies: Vec<String>,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: 1000,
            reply_delay_max_ms: 3000,
            canned_replies: Vec::new(),
        }
    }
}
