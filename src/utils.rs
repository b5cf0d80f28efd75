//! Utility functions for log previews and date display.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary) with
/// `"…(+N bytes)"` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Render an ISO-8601 timestamp as a short date, `M/D/YYYY`, in the
/// reader's local time zone.
pub fn short_date(timestamp: &str) -> String {
    short_date_in(timestamp, &Local)
}

/// [`short_date`] for an explicit time zone.
///
/// Timestamps with an offset and bare dates (read as UTC midnight) are
/// converted into `tz` first; zone-less date-times are already wall-clock
/// time. Anything else renders as `Invalid Date`.
pub fn short_date_in<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> String {
    let ts = timestamp.trim();
    let date = DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(tz).date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| {
            NaiveDate::parse_from_str(ts, "%Y-%m-%d")
                .map(|d| d.and_time(NaiveTime::MIN).and_utc().with_timezone(tz).date_naive())
        });
    match date {
        Ok(d) => d.format("%-m/%-d/%Y").to_string(),
        Err(_) => "Invalid Date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let result = truncate_for_log("ééé", 3);
        assert_eq!(result, "é…(+4 bytes)");
    }

    #[test]
    fn test_short_date_rfc3339() {
        assert_eq!(short_date_in("2025-01-27T09:15:00Z", &Utc), "1/27/2025");
        assert_eq!(short_date_in("2025-11-03T23:59:59+05:00", &Utc), "11/3/2025");
    }

    #[test]
    fn test_short_date_converts_to_reader_zone() {
        let karachi = FixedOffset::east_opt(5 * 3600).unwrap();
        assert_eq!(short_date_in("2025-01-27T22:00:00Z", &karachi), "1/28/2025");
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(short_date_in("2025-01-27T02:00:00Z", &new_york), "1/26/2025");
    }

    #[test]
    fn test_short_date_without_zone() {
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(short_date_in("2025-02-01T10:00:00", &new_york), "2/1/2025");
        assert_eq!(short_date_in("2025-02-01", &Utc), "2/1/2025");
        assert_eq!(short_date_in("2025-02-01", &new_york), "1/31/2025");
    }

    #[test]
    fn test_short_date_invalid() {
        assert_eq!(short_date("yesterday"), "Invalid Date");
        assert_eq!(short_date(""), "Invalid Date");
    }
}
