use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Converts fractional unix seconds back to a UTC timestamp.
///
/// Returns `None` for non-finite input or values outside chrono's range.
#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round();
    if millis > (i64::MAX as f64) || millis < (i64::MIN as f64) {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
}

/// Midnight UTC of a calendar date.
#[must_use]
pub fn date_to_datetime(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[must_use]
pub fn date_to_unix_seconds(date: NaiveDate) -> f64 {
    datetime_to_unix_seconds(date_to_datetime(date))
}

/// Parses a `YYYY-MM-DD` calendar date, tolerating a trailing time part.
#[must_use]
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
