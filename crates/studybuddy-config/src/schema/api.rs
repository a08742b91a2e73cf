//! Remote chat API settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://aiagent.invordigital.com";

/// Where the study assistant lives and how patient we are with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// TCP/TLS connect timeout in seconds (valid range: 1-300).
    pub connect_timeout_secs: u64,
    /// Whole-request timeout. Unset means a slow server stalls the turn.
    pub request_timeout_secs: Option<u64>,
    /// How many tips from `/chat-tips` to offer as suggestions (1-10).
    pub tips_shown: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.into(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            tips_shown: 3,
        }
    }
}
