use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::errors::{Error, Result};

/// Calendar date an event counts toward.
///
/// Activity days are bucketed in UTC so that scoring does not depend on the
/// host timezone.
pub fn activity_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Rejects scoring windows that are not at least one day long.
pub fn validate_period_days(period_days: i64) -> Result<i64> {
    if period_days <= 0 {
        return Err(Error::InvalidArgument(format!(
            "period must be at least one day, got {}",
            period_days
        )));
    }
    Ok(period_days)
}

/// Start of the trailing window of `period_days` days ending at `now`.
pub fn window_start(now: DateTime<Utc>, period_days: i64) -> Result<DateTime<Utc>> {
    let period_days = validate_period_days(period_days)?;
    Duration::try_days(period_days)
        .and_then(|span| now.checked_sub_signed(span))
        .ok_or_else(|| {
            Error::InvalidArgument(format!("period of {} days is out of range", period_days))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_activity_date_uses_utc() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 59).unwrap();
        assert_eq!(
            activity_date(instant),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn test_window_start() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let start = window_start(now, 30).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_non_positive_period_is_rejected() {
        let now = Utc::now();
        assert!(matches!(window_start(now, 0), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            validate_period_days(-7),
            Err(Error::InvalidArgument(_))
        ));
    }
}
