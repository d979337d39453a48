use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{GranularityLevel, quarter_of};
use crate::render::LabelLocale;

/// Below this zoom factor tick sets coarsen one level.
pub const TICK_COARSENING_ZOOM: f64 = 0.9;
const COMPACT_FORM_MAX_ZOOM: f64 = 1.0;
const MEDIUM_FORM_MAX_ZOOM: f64 = 1.2;

const RU_MONTHS_NOMINATIVE: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь", "Октябрь",
    "Ноябрь", "Декабрь",
];
const RU_MONTHS_GENITIVE: [&str; 12] = [
    "Января", "Февраля", "Марта", "Апреля", "Мая", "Июня", "Июля", "Августа", "Сентября",
    "Октября", "Ноября", "Декабря",
];
const RU_MONTHS_SHORT: [&str; 12] = [
    "Янв", "Фев", "Мар", "Апр", "Май", "Июн", "Июл", "Авг", "Сен", "Окт", "Ноя", "Дек",
];

/// Amplitude of tick labels, chosen from the zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeLabelForm {
    /// `dd.mm`
    Compact,
    /// `dd.mm.yy`
    Medium,
    /// Granularity-specific, locale-aware.
    Full,
}

impl TimeLabelForm {
    #[must_use]
    pub fn for_zoom(k: f64) -> Self {
        if k < COMPACT_FORM_MAX_ZOOM {
            Self::Compact
        } else if k < MEDIUM_FORM_MAX_ZOOM {
            Self::Medium
        } else {
            Self::Full
        }
    }
}

/// Tick level actually drawn for `granularity` at zoom `k`.
#[must_use]
pub fn tick_level(granularity: GranularityLevel, k: f64) -> GranularityLevel {
    if k < TICK_COARSENING_ZOOM {
        granularity.coarsened()
    } else {
        granularity
    }
}

/// Period level labelled in the band above the plot.
#[must_use]
pub fn period_band_level(granularity: GranularityLevel) -> GranularityLevel {
    match granularity {
        GranularityLevel::Quarter => GranularityLevel::Quarter,
        GranularityLevel::Year => GranularityLevel::Year,
        GranularityLevel::Day | GranularityLevel::Week | GranularityLevel::Month => {
            GranularityLevel::Month
        }
    }
}

/// Locale-aware formatter for time axis ticks and period labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeAxisLabeler {
    pub locale: LabelLocale,
}

impl TimeAxisLabeler {
    #[must_use]
    pub fn new(locale: LabelLocale) -> Self {
        Self { locale }
    }

    /// Tick label for `date` at zoom `k`.
    #[must_use]
    pub fn tick_label(self, date: NaiveDate, granularity: GranularityLevel, k: f64) -> String {
        match TimeLabelForm::for_zoom(k) {
            TimeLabelForm::Compact => date.format("%d.%m").to_string(),
            TimeLabelForm::Medium => date.format("%d.%m.%y").to_string(),
            TimeLabelForm::Full => self.period_label(date, granularity, false),
        }
    }

    /// Granularity label; `short` selects the abbreviated variant.
    #[must_use]
    pub fn period_label(self, date: NaiveDate, level: GranularityLevel, short: bool) -> String {
        match self.locale {
            LabelLocale::EnUs => en_period_label(date, level, short),
            LabelLocale::RuRu => ru_period_label(date, level, short),
        }
    }
}

fn en_period_label(date: NaiveDate, level: GranularityLevel, short: bool) -> String {
    match level {
        GranularityLevel::Day => date.format("%d %b").to_string(),
        GranularityLevel::Week if short => date.format("W%W").to_string(),
        GranularityLevel::Week => date.format("W%W %Y").to_string(),
        GranularityLevel::Month if short => date.format("%b").to_string(),
        GranularityLevel::Month => date.format("%B %Y").to_string(),
        GranularityLevel::Quarter if short => format!("Q{}", quarter_of(date)),
        GranularityLevel::Quarter => format!("{} Q{}", date.year(), quarter_of(date)),
        GranularityLevel::Year => date.format("%Y").to_string(),
    }
}

fn ru_period_label(date: NaiveDate, level: GranularityLevel, short: bool) -> String {
    let month = date.month0() as usize;
    match level {
        GranularityLevel::Day if short => format!("{} {}", date.day(), RU_MONTHS_SHORT[month]),
        GranularityLevel::Day => format!("{} {}", date.day(), RU_MONTHS_GENITIVE[month]),
        GranularityLevel::Week if short => format!("Нед.{}", ru_week_number(date)),
        GranularityLevel::Week => format!(
            "Неделя {}, {}",
            ru_week_number(date),
            RU_MONTHS_GENITIVE[month]
        ),
        GranularityLevel::Month if short => RU_MONTHS_SHORT[month].to_owned(),
        GranularityLevel::Month => format!("{} {}", RU_MONTHS_NOMINATIVE[month], date.year()),
        GranularityLevel::Quarter if short => format!("К{}", quarter_of(date)),
        GranularityLevel::Quarter => format!("Квартал {}, {}", quarter_of(date), date.year()),
        GranularityLevel::Year => date.year().to_string(),
    }
}

/// Week of year counted from the week holding January 1st, weeks starting on
/// Sunday.
fn ru_week_number(date: NaiveDate) -> u32 {
    let jan_first_weekday = date
        .with_ordinal(1)
        .map_or(0, |jan_first| jan_first.weekday().num_days_from_sunday());
    (date.ordinal0() + jan_first_weekday + 1).div_ceil(7)
}
