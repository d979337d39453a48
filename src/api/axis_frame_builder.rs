use std::collections::HashSet;

use chrono::NaiveDate;
use smallvec::SmallVec;

use crate::core::primitives::date_to_datetime;
use crate::core::{GranularityLevel, PlotArea, TimeScale, ValueScale, period_starts};
use crate::error::GanttResult;
use crate::interaction::OverviewSelector;
use crate::render::{
    Color, LineStrokeStyle, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
    TimelineStyle,
};

use super::TimelineLayout;
use super::time_axis_labels::{TimeAxisLabeler, period_band_level, tick_level};

pub const VALUE_TICK_TARGET: usize = 6;
const AXIS_FONT_PX: f64 = 10.0;
const PERIOD_FONT_PX: f64 = 12.0;
const TRACK_FONT_PX: f64 = 9.0;
const CAPTION_FONT_PX: f64 = 11.0;
const TICK_LENGTH_PX: f64 = 6.0;
const LABEL_GAP_PX: f64 = 4.0;
const PERIOD_LABEL_OFFSET_PX: f64 = 25.0;
const SHORT_PERIOD_LABEL_PX: f64 = 80.0;
const SELECTION_FILL_ALPHA: f64 = 0.6;
const TRACK_CORNER_RADIUS_PX: f64 = 4.0;

/// Inputs of one axis/grid/overview pass.
pub struct AxisFrameInput<'a> {
    pub layout: TimelineLayout,
    /// Rescaled time scale of the current view.
    pub time: TimeScale,
    /// Rescaled value scale of the current view.
    pub value: ValueScale,
    pub granularity: GranularityLevel,
    pub k: f64,
    pub labeler: TimeAxisLabeler,
    pub style: &'a TimelineStyle,
}

/// Grid, ticks, period band and value axis for the current view.
pub fn build_axis_frame(input: &AxisFrameInput<'_>) -> GanttResult<RenderFrame> {
    let plot = input.layout.plot;
    let mut frame = RenderFrame::new(input.layout.viewport);
    let (start, end) = input.time.domain()?;

    frame.lines.extend(time_grid_lines(input.time, plot, input.granularity, input.style));

    let baseline_color = input.style.axis_text_color;
    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.bottom(),
        plot.right(),
        plot.bottom(),
        1.0,
        baseline_color,
    ));
    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.top,
        plot.left,
        plot.bottom(),
        1.0,
        baseline_color,
    ));

    let level = tick_level(input.granularity, input.k);
    for date in period_starts(level, start, end) {
        let Some(x) = plot_x(input.time, plot, date) else {
            continue;
        };
        frame.lines.push(LinePrimitive::new(
            x,
            plot.bottom(),
            x,
            plot.bottom() + TICK_LENGTH_PX,
            1.0,
            baseline_color,
        ));
        frame.texts.push(TextPrimitive::new(
            input.labeler.tick_label(date, level, input.k),
            x,
            plot.bottom() + TICK_LENGTH_PX + LABEL_GAP_PX,
            AXIS_FONT_PX,
            input.style.axis_text_color,
            TextHAlign::Center,
        ));
    }

    let band_level = period_band_level(input.granularity);
    let band_starts = period_starts(band_level, start, end);
    let band_xs: Vec<Option<f64>> = band_starts
        .iter()
        .map(|date| plot_x(input.time, plot, *date))
        .collect();
    for (position, date) in band_starts.iter().enumerate() {
        let Some(x) = band_xs[position] else {
            continue;
        };
        let spacing = band_xs
            .get(position + 1)
            .copied()
            .flatten()
            .map_or(f64::INFINITY, |next| next - x);
        frame.texts.push(TextPrimitive::new(
            input
                .labeler
                .period_label(*date, band_level, spacing < SHORT_PERIOD_LABEL_PX),
            x,
            plot.top - PERIOD_LABEL_OFFSET_PX,
            PERIOD_FONT_PX,
            input.style.text_color,
            TextHAlign::Center,
        ));
    }

    let (low, high) = input.value.domain();
    for tick in value_ticks(low, high, VALUE_TICK_TARGET) {
        let y_local = input.value.apply(tick);
        if !y_local.is_finite() || y_local < 0.0 || y_local > plot.height {
            continue;
        }
        let y = plot.top + y_local;
        frame.lines.push(
            LinePrimitive::new(plot.left, y, plot.right(), y, 0.5, input.style.value_grid_color)
                .with_stroke_style(LineStrokeStyle::Dashed { dash: 3.0, gap: 3.0 }),
        );
        frame.texts.push(TextPrimitive::new(
            format_percent(tick),
            plot.left - TICK_LENGTH_PX,
            y - AXIS_FONT_PX / 2.0,
            AXIS_FONT_PX,
            input.style.axis_text_color,
            TextHAlign::Right,
        ));
    }

    Ok(frame)
}

/// Vertical period lines; finer levels appear only at matching granularity.
///
/// Where levels share a date, the coarsest level's style wins.
#[must_use]
pub fn time_grid_lines(
    time: TimeScale,
    plot: PlotArea,
    granularity: GranularityLevel,
    style: &TimelineStyle,
) -> Vec<LinePrimitive> {
    let Ok((start, end)) = time.domain() else {
        return Vec::new();
    };

    let mut levels: SmallVec<[GranularityLevel; 5]> = SmallVec::new();
    levels.extend([
        GranularityLevel::Year,
        GranularityLevel::Quarter,
        GranularityLevel::Month,
    ]);
    if granularity <= GranularityLevel::Week {
        levels.push(GranularityLevel::Week);
    }
    if granularity == GranularityLevel::Day {
        levels.push(GranularityLevel::Day);
    }

    let mut drawn: HashSet<NaiveDate> = HashSet::new();
    let mut lines = Vec::new();
    for level in levels {
        let (color, width, stroke) = grid_line_style(level, style);
        for date in period_starts(level, start, end) {
            if !drawn.insert(date) {
                continue;
            }
            let Some(x) = plot_x(time, plot, date) else {
                continue;
            };
            lines.push(
                LinePrimitive::new(x, plot.top, x, plot.bottom(), width, color)
                    .with_stroke_style(stroke),
            );
        }
    }
    lines
}

fn grid_line_style(
    level: GranularityLevel,
    style: &TimelineStyle,
) -> (Color, f64, LineStrokeStyle) {
    match level {
        GranularityLevel::Year => (style.year_line_color, 1.5, LineStrokeStyle::Solid),
        GranularityLevel::Quarter => (
            style.quarter_line_color,
            1.2,
            LineStrokeStyle::Dashed { dash: 5.0, gap: 3.0 },
        ),
        GranularityLevel::Month => (
            style.month_line_color,
            1.0,
            LineStrokeStyle::Dashed { dash: 3.0, gap: 3.0 },
        ),
        GranularityLevel::Week => (
            style.week_line_color,
            0.8,
            LineStrokeStyle::Dashed { dash: 2.0, gap: 2.0 },
        ),
        GranularityLevel::Day => (
            style.day_line_color,
            0.5,
            LineStrokeStyle::Dashed { dash: 1.0, gap: 2.0 },
        ),
    }
}

/// Round tick values covering `[low, high]`, about `count` of them.
///
/// Steps are 1, 2 or 5 times a power of ten.
#[must_use]
pub fn value_ticks(low: f64, high: f64, count: usize) -> Vec<f64> {
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    if !low.is_finite() || !high.is_finite() || count == 0 || low == high {
        return Vec::new();
    }

    let step = (high - low) / count as f64;
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        let increment = factor * 10_f64.powf(power);
        let first = (low / increment).ceil() as i64;
        let last = (high / increment).floor() as i64;
        (first..=last).map(|i| i as f64 * increment).collect()
    } else {
        let inverse = 10_f64.powf(-power) / factor;
        let first = (low * inverse).ceil() as i64;
        let last = (high * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    }
}

fn format_percent(value: f64) -> String {
    let rounded = (value * 1_000.0).round() / 1_000.0;
    format!("{rounded}%")
}

/// Both overview tracks with their current selections.
#[must_use]
pub fn build_overview_frame(
    layout: TimelineLayout,
    overview_time: TimeScale,
    time_brush: &OverviewSelector,
    value_brush: &OverviewSelector,
    style: &TimelineStyle,
) -> RenderFrame {
    let mut frame = RenderFrame::new(layout.viewport);
    let time_track = layout.time_track;
    let value_track = layout.value_track;

    for track in [time_track, value_track] {
        frame.rects.push(
            RectPrimitive::new(
                track.left,
                track.top,
                track.width,
                track.height,
                style.brush_track_color,
            )
            .with_border(1.0, style.value_grid_color)
            .with_corner_radius(TRACK_CORNER_RADIUS_PX),
        );
    }

    if let Ok((start, end)) = overview_time.domain() {
        let marker_bottom = time_track.bottom() - TRACK_FONT_PX - 2.0 * LABEL_GAP_PX;
        for date in period_starts(GranularityLevel::Quarter, start, end) {
            let x_local = overview_time.apply(date_to_datetime(date));
            if !x_local.is_finite() || x_local < 0.0 || x_local > time_track.width {
                continue;
            }
            let x = time_track.left + x_local;
            frame.lines.push(
                LinePrimitive::new(
                    x,
                    time_track.top + LABEL_GAP_PX,
                    x,
                    marker_bottom,
                    1.0,
                    style.quarter_line_color,
                )
                .with_stroke_style(LineStrokeStyle::Dashed { dash: 3.0, gap: 3.0 }),
            );
            frame.texts.push(TextPrimitive::new(
                date.format("%d.%m").to_string(),
                x,
                marker_bottom + LABEL_GAP_PX,
                TRACK_FONT_PX,
                style.axis_text_color,
                TextHAlign::Center,
            ));
        }
    }

    let selection_fill = style.brush_fill_color.with_alpha(SELECTION_FILL_ALPHA);
    if let Some((start, end)) = time_brush.selection() {
        frame.rects.push(
            RectPrimitive::new(
                time_track.left + start,
                time_track.top,
                end - start,
                time_track.height,
                selection_fill,
            )
            .with_border(1.0, style.brush_border_color),
        );
        if let Some(caption) = time_brush.caption(overview_time) {
            frame.texts.push(
                TextPrimitive::new(
                    caption,
                    time_track.left + (start + end) / 2.0,
                    time_track.top + LABEL_GAP_PX,
                    CAPTION_FONT_PX,
                    style.text_color,
                    TextHAlign::Center,
                )
                .bold(),
            );
        }
    }
    if let Some((start, end)) = value_brush.selection() {
        frame.rects.push(
            RectPrimitive::new(
                value_track.left,
                value_track.top + start,
                value_track.width,
                end - start,
                selection_fill,
            )
            .with_border(1.0, style.brush_border_color),
        );
    }

    frame
}

fn plot_x(time: TimeScale, plot: PlotArea, date: NaiveDate) -> Option<f64> {
    let x = time.apply(date_to_datetime(date));
    (x.is_finite() && (0.0..=plot.width).contains(&x)).then_some(plot.left + x)
}

#[cfg(test)]
mod tests {
    use super::{format_percent, value_ticks};

    #[test]
    fn value_ticks_use_round_steps() {
        assert_eq!(
            value_ticks(0.0, 150.0, 6),
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0]
        );
        assert_eq!(value_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert!(value_ticks(3.0, 3.0, 6).is_empty());
    }

    #[test]
    fn percent_labels_drop_trailing_zeros() {
        assert_eq!(format_percent(40.0), "40%");
        assert_eq!(format_percent(12.5), "12.5%");
    }
}
