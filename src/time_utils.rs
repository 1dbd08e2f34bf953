// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date formatting and parsing.

use chrono::{DateTime, NaiveDate, Utc};

/// Wire format for every date parameter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date (UTC), used when a write or a required read has no date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Date to send for a write: the given date, or today.
pub fn date_or_today(date: Option<NaiveDate>) -> String {
    format_date(date.unwrap_or_else(today))
}

/// Parse user-supplied date input.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (reduced to its UTC date).
/// Returns `None` for empty or unparseable input.
pub fn parse_date_param(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_date_param("2024-03-09"),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
        assert_eq!(
            parse_date_param("  2024-03-09 "),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
    }

    #[test]
    fn test_parse_timestamp_uses_utc_date() {
        assert_eq!(
            parse_date_param("2024-03-09T23:30:00-02:00"),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date_param(""), None);
        assert_eq!(parse_date_param("yesterday"), None);
        assert_eq!(parse_date_param("2024-13-01"), None);
    }

    #[test]
    fn test_date_or_today() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(date_or_today(Some(date)), "2023-12-31");
        assert_eq!(date_or_today(None), format_date(today()));
    }
}
