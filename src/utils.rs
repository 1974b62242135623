use chrono::{DateTime, Utc};
use std::path::Path;

const DB_FILE: &str = "skillbridge.db";

pub fn sqlite_url(data_dir: &Path) -> String {
    format!("sqlite:{}?mode=rwc", data_dir.join(DB_FILE).display())
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Coarse relative age used by the notes list: `just now`, `5m ago`, `3h ago`, `2d ago`.
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

/// Truncates to at most `max_chars` characters without splitting a code point.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
