//! String formatting helpers.

use chrono::{DateTime, Local, Utc};

/// Truncate to `max_len` characters, ending with "..." when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// First 8 characters of an id, enough to recognise it in a table.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Render a Unix-millisecond instant in local time.
///
/// Plain output uses RFC 3339 so that it stays sortable.
pub fn format_timestamp(millis: i64, pretty: bool) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) if pretty => dt.with_timezone(&Local).format("%d.%m.%Y %H:%M").to_string(),
        Some(dt) => dt.to_rfc3339(),
        None => millis.to_string(),
    }
}

/// Collapse newlines so a value fits on one output line.
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

/// Format a number without a trailing ".0".
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Pre-flight inspection", 10), "Pre-fli...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("7a2e3c0b-1234-5678"), "7a2e3c0b");
        assert_eq!(short_id("drone-1"), "drone-1");
    }

    #[test]
    fn test_format_timestamp_plain_is_rfc3339() {
        assert_eq!(format_timestamp(0, false), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\r\nb"), "a b");
    }

    #[test]
    fn test_number() {
        assert_eq!(number(12.0), "12");
        assert_eq!(number(0.8), "0.8");
    }
}
