//! Shared utility functions for storm timeline crates.

/// Timestamp and calendar-day helpers.
///
/// All timestamps are wall-clock `NaiveDateTime` values in the monitoring
/// site's local time. Offsets are expressed in milliseconds.
pub mod dates {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    /// Milliseconds in one calendar day.
    pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

    /// Formats accepted by [`parse_timestamp`], tried in order.
    const TIMESTAMP_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    /// Parse a timestamp string sent by the classification service.
    ///
    /// Accepts ISO-8601 with or without fractional seconds, a space instead
    /// of the `T` separator, and RFC 3339 strings carrying an offset (the
    /// offset is dropped and the wall-clock value kept). A bare date is read
    /// as local midnight.
    pub fn parse_timestamp(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
            return Ok(dt.naive_local());
        }
        for format in TIMESTAMP_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(dt);
            }
        }
        let date = parse_date(s)?;
        Ok(day_start(&date))
    }

    /// Parse a date string in "YYYY-MM-DD" format, ignoring any time suffix.
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        let date_part = s.get(..10).unwrap_or(s);
        Ok(NaiveDate::parse_from_str(date_part, "%Y-%m-%d")?)
    }

    /// Format a timestamp as "YYYY-MM-DDTHH:MM:SS"
    pub fn format_timestamp(ts: &NaiveDateTime) -> String {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    /// Format a timestamp for display in tooltips, e.g. "2023-01-05 14:30"
    pub fn format_display(ts: &NaiveDateTime) -> String {
        ts.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Local midnight at the start of `date`.
    pub fn day_start(date: &NaiveDate) -> NaiveDateTime {
        date.and_time(chrono::NaiveTime::MIN)
    }

    /// Local midnight at the end of `date` (start of the following day).
    pub fn day_end(date: &NaiveDate) -> NaiveDateTime {
        day_start(date) + TimeDelta::milliseconds(MILLIS_PER_DAY)
    }

    /// Signed milliseconds from `from` to `to`.
    pub fn millis_between(from: &NaiveDateTime, to: &NaiveDateTime) -> i64 {
        (*to - *from).num_milliseconds()
    }

    /// `base + millis`, rounded to the nearest millisecond.
    pub fn add_millis(base: &NaiveDateTime, millis: f64) -> NaiveDateTime {
        *base + TimeDelta::milliseconds(millis.round() as i64)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, 0)
                .unwrap()
        }

        #[test]
        fn test_parse_timestamp_formats() {
            let expected = ts(2023, 1, 5, 14, 30);
            assert_eq!(parse_timestamp("2023-01-05T14:30:00").unwrap(), expected);
            assert_eq!(parse_timestamp("2023-01-05 14:30:00").unwrap(), expected);
            assert_eq!(parse_timestamp("2023-01-05T14:30").unwrap(), expected);
            assert_eq!(parse_timestamp("2023-01-05T14:30:00.000").unwrap(), expected);
            assert_eq!(parse_timestamp("2023-01-05T14:30:00Z").unwrap(), expected);
            assert_eq!(
                parse_timestamp("2023-01-05T14:30:00+10:00").unwrap(),
                expected
            );
        }

        #[test]
        fn test_parse_bare_date_is_midnight() {
            assert_eq!(parse_timestamp("2023-01-05").unwrap(), ts(2023, 1, 5, 0, 0));
        }

        #[test]
        fn test_parse_timestamp_rejects_garbage() {
            assert!(parse_timestamp("yesterday").is_err());
            assert!(parse_timestamp("").is_err());
        }

        #[test]
        fn test_day_bounds() {
            let date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
            assert_eq!(day_start(&date), ts(2024, 2, 28, 0, 0));
            assert_eq!(day_end(&date), ts(2024, 2, 29, 0, 0));
            assert_eq!(millis_between(&day_start(&date), &day_end(&date)), MILLIS_PER_DAY);
        }

        #[test]
        fn test_add_millis_round_trip() {
            let base = ts(2023, 6, 1, 0, 0);
            let later = add_millis(&base, 90_000.4);
            assert_eq!(millis_between(&base, &later), 90_000);
            assert_eq!(format_timestamp(&later), "2023-06-01T00:01:30");
            assert_eq!(format_display(&later), "2023-06-01 00:01");
        }
    }
}
