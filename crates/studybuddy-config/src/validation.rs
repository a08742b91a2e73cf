//! Configuration validation.
//!
//! Collects every problem into a single `ConfigError` so users can fix
//! their file in one pass.

use std::sync::LazyLock;

use regex::Regex;
use studybuddy_common::ConfigError;

use crate::schema::StudyBuddyConfig;

static BASE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+(/[^\s?#]*)?$").unwrap());

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &StudyBuddyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_messenger(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &StudyBuddyConfig) {
    let api = &config.api;
    if !BASE_URL_RE.is_match(&api.base_url) {
        errors.push(format!(
            "api.base_url must be an http(s) URL, got '{}'",
            api.base_url
        ));
    }
    if !(1..=300).contains(&api.connect_timeout_secs) {
        errors.push(format!(
            "api.connect_timeout_secs must be 1-300, got {}",
            api.connect_timeout_secs
        ));
    }
    if api.request_timeout_secs == Some(0) {
        errors.push("api.request_timeout_secs must be positive when set".into());
    }
    if !(1..=10).contains(&api.tips_shown) {
        errors.push(format!(
            "api.tips_shown must be 1-10, got {}",
            api.tips_shown
        ));
    }
}

fn validate_messenger(errors: &mut Vec<String>, config: &StudyBuddyConfig) {
    let m = &config.messenger;
    if m.reply_delay_min_ms > m.reply_delay_max_ms {
        errors.push(format!(
            "messenger.reply_delay_min_ms ({}) exceeds reply_delay_max_ms ({})",
            m.reply_delay_min_ms, m.reply_delay_max_ms
        ));
    }
}
