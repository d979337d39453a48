use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{SECONDS_PER_DAY, date_to_datetime};

/// Upper bound on generated period starts for one call.
pub const MAX_PERIOD_STARTS: usize = 4_096;

pub const DAY_MAX_SPAN_DAYS: f64 = 14.0;
pub const WEEK_MAX_SPAN_DAYS: f64 = 60.0;
pub const MONTH_MAX_SPAN_DAYS: f64 = 365.0;
pub const QUARTER_MAX_SPAN_DAYS: f64 = 730.0;

/// Calendar unit used for axis ticks and label formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GranularityLevel {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl GranularityLevel {
    pub const ALL: [Self; 5] = [Self::Day, Self::Week, Self::Month, Self::Quarter, Self::Year];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Tick level used when zoomed out below the coarsening threshold.
    #[must_use]
    pub fn coarsened(self) -> Self {
        match self {
            Self::Day | Self::Week => Self::Week,
            Self::Month => Self::Month,
            Self::Quarter | Self::Year => Self::Quarter,
        }
    }
}

/// Picks the granularity for a visible time range.
#[must_use]
pub fn resolve_granularity(start: DateTime<Utc>, end: DateTime<Utc>) -> GranularityLevel {
    let elapsed_seconds = (end - start).num_milliseconds().abs() as f64 / 1000.0;
    resolve_granularity_for_days(elapsed_seconds / SECONDS_PER_DAY)
}

/// Threshold ladder over elapsed days; each bound is inclusive.
#[must_use]
pub fn resolve_granularity_for_days(days: f64) -> GranularityLevel {
    if !days.is_finite() {
        return GranularityLevel::Year;
    }
    let days = days.abs();
    if days <= DAY_MAX_SPAN_DAYS {
        GranularityLevel::Day
    } else if days <= WEEK_MAX_SPAN_DAYS {
        GranularityLevel::Week
    } else if days <= MONTH_MAX_SPAN_DAYS {
        GranularityLevel::Month
    } else if days <= QUARTER_MAX_SPAN_DAYS {
        GranularityLevel::Quarter
    } else {
        GranularityLevel::Year
    }
}

/// Start of the period containing `date`. Weeks start on Sunday.
#[must_use]
pub fn period_floor(level: GranularityLevel, date: NaiveDate) -> NaiveDate {
    match level {
        GranularityLevel::Day => date,
        GranularityLevel::Week => date
            .checked_sub_days(Days::new(u64::from(
                date.weekday().num_days_from_sunday(),
            )))
            .unwrap_or(date),
        GranularityLevel::Month => date.with_day(1).unwrap_or(date),
        GranularityLevel::Quarter => {
            let quarter_month = ((date.month0() / 3) * 3) + 1;
            NaiveDate::from_ymd_opt(date.year(), quarter_month, 1).unwrap_or(date)
        }
        GranularityLevel::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
    }
}

/// Start of the period following the one that starts at `period_start`.
#[must_use]
pub fn period_step(level: GranularityLevel, period_start: NaiveDate) -> Option<NaiveDate> {
    match level {
        GranularityLevel::Day => period_start.checked_add_days(Days::new(1)),
        GranularityLevel::Week => period_start.checked_add_days(Days::new(7)),
        GranularityLevel::Month => period_start.checked_add_months(Months::new(1)),
        GranularityLevel::Quarter => period_start.checked_add_months(Months::new(3)),
        GranularityLevel::Year => period_start.checked_add_months(Months::new(12)),
    }
}

/// Period starts of `level` falling inside `[start, end]`, ascending.
#[must_use]
pub fn period_starts(
    level: GranularityLevel,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<NaiveDate> {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let first_day = start.date_naive();
    let last_day = end.date_naive();

    let mut cursor = period_floor(level, first_day);
    if date_to_datetime(cursor) < start {
        match period_step(level, cursor) {
            Some(next) => cursor = next,
            None => return Vec::new(),
        }
    }

    let mut starts = Vec::new();
    while cursor <= last_day && starts.len() < MAX_PERIOD_STARTS {
        starts.push(cursor);
        match period_step(level, cursor) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    starts
}

/// 1-based quarter of the year.
#[must_use]
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}
