use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::PlotArea;
use crate::core::TimeScale;
use crate::core::primitives::date_to_datetime;
use crate::error::{GanttError, GanttResult};
use crate::render::{
    Color, LabelLocale, LinePrimitive, LineStrokeStyle, TextHAlign, TextPrimitive, TimelineStyle,
};

pub const MARKER_LINE_WIDTH_PX: f64 = 2.0;
pub const MARKER_DASH: LineStrokeStyle = LineStrokeStyle::Dashed { dash: 5.0, gap: 3.0 };
pub const MARKER_LABEL_FONT_PX: f64 = 10.0;
const MARKER_LABEL_GAP_PX: f64 = 4.0;

/// Vertical line at a calendar date, drawn across the plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateMarker {
    pub id: String,
    pub date: NaiveDate,
    pub label: Option<String>,
    /// Falls back to the style's marker color.
    pub color: Option<Color>,
}

impl DateMarker {
    #[must_use]
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            label: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn validate(&self) -> GanttResult<()> {
        if self.id.is_empty() {
            return Err(GanttError::InvalidData(
                "date marker id must not be empty".to_owned(),
            ));
        }
        if let Some(color) = self.color {
            color.validate()?;
        }
        Ok(())
    }
}

/// The "today" marker in the given locale.
#[must_use]
pub fn today_marker(today: NaiveDate, locale: LabelLocale, style: &TimelineStyle) -> DateMarker {
    DateMarker::new("today", today)
        .with_label(locale.today_label())
        .with_color(style.today_color)
}

/// Lines and labels for markers whose date falls inside the visible time
/// domain. `time` is the rescaled scale in plot-local pixels.
#[must_use]
pub fn marker_primitives(
    markers: &[DateMarker],
    time: TimeScale,
    plot: PlotArea,
    style: &TimelineStyle,
) -> (Vec<LinePrimitive>, Vec<TextPrimitive>) {
    let mut lines = Vec::new();
    let mut texts = Vec::new();

    for marker in markers {
        let x_local = time.apply(date_to_datetime(marker.date));
        if !x_local.is_finite() || x_local < 0.0 || x_local > plot.width {
            continue;
        }
        let x = plot.left + x_local;
        let color = marker.color.unwrap_or(style.marker_color);
        lines.push(
            LinePrimitive::new(x, plot.top, x, plot.bottom(), MARKER_LINE_WIDTH_PX, color)
                .with_stroke_style(MARKER_DASH),
        );
        if let Some(label) = marker.label.as_deref().filter(|label| !label.is_empty()) {
            texts.push(TextPrimitive::new(
                label,
                x,
                plot.top - MARKER_LABEL_GAP_PX - MARKER_LABEL_FONT_PX,
                MARKER_LABEL_FONT_PX,
                color,
                TextHAlign::Center,
            ));
        }
    }

    (lines, texts)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{marker_primitives, today_marker};
    use crate::core::{PlotArea, TimeScale};
    use crate::core::primitives::date_to_datetime;
    use crate::render::{LabelLocale, TimelineStyle};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn markers_outside_domain_are_skipped() {
        let style = TimelineStyle::default();
        let scale = TimeScale::new(
            date_to_datetime(date(2024, 1, 1)),
            date_to_datetime(date(2024, 12, 31)),
            500.0,
        )
        .expect("scale");
        let plot = PlotArea::new(100.0, 80.0, 500.0, 300.0);
        let markers = [
            today_marker(date(2024, 6, 1), LabelLocale::RuRu, &style),
            today_marker(date(2025, 6, 1), LabelLocale::EnUs, &style),
        ];

        let (lines, texts) = marker_primitives(&markers, scale, plot, &style);
        assert_eq!(lines.len(), 1);
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text, "Сегодня");
        assert!(lines[0].x1 > 100.0 && lines[0].x1 < 600.0);
    }
}
