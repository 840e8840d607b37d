//! Shared utilities for CLI commands.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Date-time layouts tried in order, after RFC 3339.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts, interpreted as midnight UTC.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Parse a date string as a UTC instant.
///
/// Supports:
/// - Dates: "2025-06-15", "2025/06/15", "15-06-2025", "15/06/2025"
/// - Date and time: "2025-06-15 14:30", "2025-06-15 14:30:05", "2025-06-15T14:30"
/// - RFC 3339: "2025-06-15T14:30:00+02:00"
/// - "today": the current UTC date at midnight
pub fn parse_date(s: &str) -> anyhow::Result<DateTime<Utc>> {
    parse_date_relative_to(s, Utc::now())
}

/// Like [`parse_date`], with "today" resolved against `now`.
pub fn parse_date_relative_to(s: &str, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    let trimmed = s.trim();

    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(now.date_naive().and_time(NaiveTime::MIN).and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Ok(dt.and_utc());
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
    {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    anyhow::bail!(
        "Invalid date: {s}. Use YYYY-MM-DD, DD/MM/YYYY, YYYY-MM-DD HH:MM[:SS], RFC 3339, or 'today'"
    )
}
