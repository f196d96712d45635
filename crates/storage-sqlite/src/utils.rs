//! Timestamp helpers for TEXT columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings in UTC with
//! microsecond precision, so lexical order matches chronological order and
//! range filters can run on the raw column.

use chrono::{DateTime, SecondsFormat, Utc};

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_formatted_timestamps_sort_chronologically() {
        let base = Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap();
        let earlier = format_timestamp(base);
        let later = format_timestamp(base + Duration::milliseconds(1));
        let much_later = format_timestamp(base + Duration::days(2));

        assert_eq!(earlier, "2024-01-09T23:59:59.000000Z");
        assert!(earlier < later);
        assert!(later < much_later);
    }

    #[test]
    fn test_parse_accepts_offsets() {
        let parsed = parse_timestamp("2024-01-10T02:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
