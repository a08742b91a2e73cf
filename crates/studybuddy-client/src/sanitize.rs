//! Text cleanup for assistant replies and suggestion tips.
//!
//! There are two cleaners with different rules. `display_text` is applied
//! to every rendered reply; `suggestion_fill_text` turns a server tip into
//! something the user can send as-is. They are not interchangeable.

use std::sync::LazyLock;

use regex::Regex;

static TRY_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[^A-Za-z0-9]*try[:\s-]*").unwrap());

/// Strip markdown bold markers and turn hyphens into spaces.
///
/// Only the rendered copy goes through this; the transcript keeps the
/// original reply.
pub fn display_text(reply: &str) -> String {
    reply.replace("**", "").replace('-', " ")
}

/// Clean a suggestion tip before placing it in the message box.
///
/// Drops a leading "Try:" style phrase, bold markers, and one pair of
/// surrounding quotes. Hyphens are kept.
pub fn suggestion_fill_text(tip: &str) -> String {
    let without_prefix = TRY_PREFIX_RE.replace(tip.trim(), "");
    let unbolded = without_prefix.trim().replace("**", "");
    strip_matching_quotes(&unbolded).to_string()
}

fn strip_matching_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.starts_with(quote) && s.ends_with(quote) {
            return s.get(1..s.len() - 1).unwrap_or("").trim();
        }
    }
    s
}
