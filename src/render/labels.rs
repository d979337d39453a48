use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::TimelineItem;

pub const DEFAULT_LABEL_MAX_CHARS: usize = 40;
pub const MIN_FONT_SIZE_PX: f64 = 7.0;

/// Locale of generated labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LabelLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "ru-RU")]
    RuRu,
}

impl LabelLocale {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::RuRu => "ru-RU",
        }
    }

    #[must_use]
    pub fn today_label(self) -> &'static str {
        match self {
            Self::EnUs => "Today",
            Self::RuRu => "Сегодня",
        }
    }

    #[must_use]
    pub fn no_data_label(self) -> &'static str {
        match self {
            Self::EnUs => "No data",
            Self::RuRu => "Нет данных",
        }
    }
}

/// Shortens `text` to `max_chars` characters, ending in `...` when cut.
#[must_use]
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

/// Font size for zoom `k`: full size from `k >= 1.5`, otherwise `base * k / 2`,
/// never below 7px.
#[must_use]
pub fn scaled_font_size(base_px: f64, k: f64) -> f64 {
    let scaled = if k >= 1.5 { base_px } else { base_px * (k / 2.0) };
    scaled.max(MIN_FONT_SIZE_PX)
}

/// Formats an integer-rounded decimal with locale digit grouping.
#[must_use]
pub fn format_grouped_amount(value: Decimal, locale: LabelLocale) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let separator = match locale {
        LabelLocale::EnUs => ',',
        LabelLocale::RuRu => '\u{a0}',
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}

/// Replaceable text seam for item shapes.
pub trait ItemLabelFormatter {
    fn company(&self, item: &TimelineItem) -> String {
        truncate_label(&item.company, DEFAULT_LABEL_MAX_CHARS)
    }

    fn price(&self, item: &TimelineItem) -> Option<String>;

    fn amount(&self, item: &TimelineItem) -> String;

    /// Date caption of a dot; compact below `k < 0.7`.
    fn dot_date(&self, end: NaiveDate, k: f64) -> String {
        if k < 0.7 {
            end.format("%d.%m").to_string()
        } else {
            end.format("%d.%m.%Y").to_string()
        }
    }
}

/// Plain locale-aware labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultLabelFormatter {
    pub locale: LabelLocale,
}

impl DefaultLabelFormatter {
    #[must_use]
    pub fn new(locale: LabelLocale) -> Self {
        Self { locale }
    }
}

impl ItemLabelFormatter for DefaultLabelFormatter {
    fn price(&self, item: &TimelineItem) -> Option<String> {
        let total = item.total_price?;
        let grouped = format_grouped_amount(total, self.locale);
        Some(match self.locale {
            LabelLocale::EnUs => grouped,
            LabelLocale::RuRu => format!("{grouped}\u{a0}₽"),
        })
    }

    fn amount(&self, item: &TimelineItem) -> String {
        match self.locale {
            LabelLocale::EnUs => format!("{} pcs", item.amount),
            LabelLocale::RuRu => format!("{} шт.", item.amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{LabelLocale, format_grouped_amount, scaled_font_size, truncate_label};

    #[test]
    fn truncation_keeps_short_names() {
        assert_eq!(truncate_label("Acme", 40), "Acme");
        let long = "a".repeat(45);
        let cut = truncate_label(&long, 40);
        assert_eq!(cut.chars().count(), 40);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn font_scaling_has_floor() {
        assert_eq!(scaled_font_size(14.0, 2.0), 14.0);
        assert_eq!(scaled_font_size(14.0, 1.0), 7.0);
        assert_eq!(scaled_font_size(20.0, 1.0), 10.0);
        assert_eq!(scaled_font_size(12.0, 0.5), 7.0);
    }

    #[test]
    fn amounts_are_grouped_per_locale() {
        let value = Decimal::new(123_456_789, 2);
        assert_eq!(format_grouped_amount(value, LabelLocale::EnUs), "1,234,568");
        assert_eq!(
            format_grouped_amount(value, LabelLocale::RuRu),
            "1\u{a0}234\u{a0}568"
        );
    }
}
