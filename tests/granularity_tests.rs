use chrono::{NaiveDate, TimeDelta};
use gantt_rs::core::primitives::date_to_datetime;
use gantt_rs::core::{
    GranularityLevel, period_floor, period_starts, resolve_granularity,
    resolve_granularity_for_days,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn thresholds_are_inclusive_upper_bounds() {
    let cases = [
        (1.0, GranularityLevel::Day),
        (14.0, GranularityLevel::Day),
        (15.0, GranularityLevel::Week),
        (60.0, GranularityLevel::Week),
        (61.0, GranularityLevel::Month),
        (365.0, GranularityLevel::Month),
        (366.0, GranularityLevel::Quarter),
        (730.0, GranularityLevel::Quarter),
        (731.0, GranularityLevel::Year),
        (5_000.0, GranularityLevel::Year),
    ];
    for (days, expected) in cases {
        assert_eq!(resolve_granularity_for_days(days), expected, "span of {days} days");
    }
}

#[test]
fn resolution_uses_elapsed_time_between_bounds() {
    let start = date_to_datetime(date(2024, 1, 1));
    assert_eq!(
        resolve_granularity(start, start + TimeDelta::days(14)),
        GranularityLevel::Day
    );
    assert_eq!(
        resolve_granularity(start, start + TimeDelta::days(14) + TimeDelta::hours(1)),
        GranularityLevel::Week
    );
    // Reversed bounds resolve the same way.
    assert_eq!(
        resolve_granularity(start + TimeDelta::days(400), start),
        GranularityLevel::Quarter
    );
}

#[test]
fn non_finite_span_falls_back_to_year() {
    assert_eq!(resolve_granularity_for_days(f64::NAN), GranularityLevel::Year);
}

#[test]
fn period_starts_cover_the_range() {
    let start = date_to_datetime(date(2024, 2, 15));
    let end = date_to_datetime(date(2024, 7, 1));

    assert_eq!(
        period_starts(GranularityLevel::Month, start, end),
        vec![
            date(2024, 3, 1),
            date(2024, 4, 1),
            date(2024, 5, 1),
            date(2024, 6, 1),
            date(2024, 7, 1),
        ]
    );
    assert_eq!(
        period_starts(GranularityLevel::Quarter, start, end),
        vec![date(2024, 4, 1), date(2024, 7, 1)]
    );
    assert!(period_starts(GranularityLevel::Year, start, end).is_empty());
}

#[test]
fn period_starts_include_an_aligned_start() {
    let start = date_to_datetime(date(2024, 1, 1));
    let end = date_to_datetime(date(2026, 1, 1));
    assert_eq!(
        period_starts(GranularityLevel::Year, start, end),
        vec![date(2024, 1, 1), date(2025, 1, 1), date(2026, 1, 1)]
    );
}

#[test]
fn week_starts_fall_on_sundays() {
    let start = date_to_datetime(date(2024, 3, 1));
    let end = date_to_datetime(date(2024, 3, 31));
    let weeks = period_starts(GranularityLevel::Week, start, end);
    assert_eq!(
        weeks,
        vec![
            date(2024, 3, 3),
            date(2024, 3, 10),
            date(2024, 3, 17),
            date(2024, 3, 24),
            date(2024, 3, 31),
        ]
    );
    for week in weeks {
        assert_eq!(period_floor(GranularityLevel::Week, week), week);
    }
}

#[test]
fn day_starts_are_consecutive() {
    let start = date_to_datetime(date(2024, 2, 27));
    let end = date_to_datetime(date(2024, 3, 2));
    assert_eq!(
        period_starts(GranularityLevel::Day, start, end),
        vec![
            date(2024, 2, 27),
            date(2024, 2, 28),
            date(2024, 2, 29),
            date(2024, 3, 1),
            date(2024, 3, 2),
        ]
    );
}
