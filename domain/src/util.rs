//! Shared utility functions.

use chrono::NaiveDate;

/// Date format used by tool parameters and the upstream API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Date part of an upstream date or datetime string.
///
/// The API mixes `2024-03-01T10:00:00` and `2024-03-01 10:00:00`.
pub fn date_prefix(s: &str) -> &str {
    s.split(['T', ' ']).next().unwrap_or(s)
}

/// Parse `YYYY-MM-DD`, ignoring any time component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_prefix(s.trim()), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Upstream `DateTime` literal for midnight of `date`.
pub fn midnight(date: &str) -> String {
    format!("{}T00:00:00", date)
}
