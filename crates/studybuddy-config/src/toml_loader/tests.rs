//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

use studybuddy_common::ConfigError;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let err = load_from_path(Path::new("/tmp/nonexistent_studybuddy_config.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[api]
base_url = "http://127.0.0.1:5000"
tips_shown = 5

[messenger]
canned_replies = ["Sure."]
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.api.tips_shown, 5);
    assert_eq!(config.messenger.canned_replies, vec!["Sure.".to_string()]);
    assert_eq!(config.api.connect_timeout_secs, 10);
    assert_eq!(config.messenger.reply_delay_max_ms, 3000);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api\nbase_url = ").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn invalid_values_are_returned_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[api]
tips_shown = 0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.tips_shown, 0);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studybuddy").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.base_url, "https://aiagent.invordigital.com");
    assert_eq!(config.api.request_timeout_secs, None);
}

#[test]
fn default_config_path_ends_with_app_dir() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("studybuddy/config.toml"));
    }
}
