//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> String {
    r##"# StudyBuddy Configuration
# Only override what you want to change -- missing fields use defaults.

[api]
# base_url = "https://aiagent.invordigital.com"
# connect_timeout_secs = 10    # 1-300
# request_timeout_secs = 60    # unset: wait for the server indefinitely
# tips_shown = 3               # 1-10

[messenger]
# reply_delay_min_ms = 1000
# reply_delay_max_ms = 3000
# canned_replies = ["Cool!", "Tell me more about that."]

[logging]
# level = "INFO"               # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
