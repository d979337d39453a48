use serde::{Deserialize, Serialize};

use crate::core::ItemStatus;
use crate::error::{GanttError, GanttResult};
use crate::render::Color;

/// Pixel geometry of item shapes at zoom factor 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemGeometry {
    pub bar_height: f64,
    pub bar_width: f64,
    pub dot_radius: f64,
    pub corner_radius: f64,
}

impl Default for ItemGeometry {
    fn default() -> Self {
        Self {
            bar_height: 60.0,
            bar_width: 200.0,
            dot_radius: 5.0,
            corner_radius: 12.0,
        }
    }
}

impl ItemGeometry {
    pub fn validate(self) -> GanttResult<Self> {
        for (name, value) in [
            ("bar height", self.bar_height),
            ("bar width", self.bar_width),
            ("dot radius", self.dot_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GanttError::InvalidData(format!(
                    "item {name} must be finite and > 0"
                )));
            }
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(GanttError::InvalidData(
                "item corner radius must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Bar width at zoom `k`; the zoom contribution is clamped to `[0.5, 2]`.
    #[must_use]
    pub fn scaled_bar_width(self, k: f64) -> f64 {
        self.bar_width * k.clamp(0.5, 2.0)
    }

    /// Dot radius at zoom `k`; the zoom contribution is clamped to `[0.7, 1.5]`.
    #[must_use]
    pub fn scaled_dot_radius(self, k: f64) -> f64 {
        self.dot_radius * k.clamp(0.7, 1.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusPalette {
    pub active: Color,
    pub renewal: Color,
    pub expired: Color,
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self {
            active: Color::from_hex(0x4285f4),
            renewal: Color::from_hex(0xfbbc05),
            expired: Color::from_hex(0xea4335),
        }
    }
}

impl StatusPalette {
    #[must_use]
    pub fn color_for(&self, status: ItemStatus) -> Color {
        match status {
            ItemStatus::Active => self.active,
            ItemStatus::Renewal => self.renewal,
            ItemStatus::Expired => self.expired,
        }
    }
}

/// Colors and stroke widths shared by every layer and the axis builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineStyle {
    pub status: StatusPalette,
    pub background: Color,
    pub bar_fill: Color,
    pub bar_border_width: f64,
    pub text_color: Color,
    pub accent_text_color: Color,
    pub axis_text_color: Color,
    pub dot_stroke_color: Color,
    pub year_line_color: Color,
    pub quarter_line_color: Color,
    pub month_line_color: Color,
    pub week_line_color: Color,
    pub day_line_color: Color,
    pub value_grid_color: Color,
    pub today_color: Color,
    pub marker_color: Color,
    pub brush_fill_color: Color,
    pub brush_border_color: Color,
    pub brush_track_color: Color,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            status: StatusPalette::default(),
            background: Color::rgb(1.0, 1.0, 1.0),
            bar_fill: Color::rgb(1.0, 1.0, 1.0),
            bar_border_width: 1.5,
            text_color: Color::from_hex(0x333333),
            accent_text_color: Color::from_hex(0x0078d4),
            axis_text_color: Color::from_hex(0x666666),
            dot_stroke_color: Color::rgb(1.0, 1.0, 1.0),
            year_line_color: Color::from_hex(0x6c8ebf),
            quarter_line_color: Color::from_hex(0xb3c6ff),
            month_line_color: Color::from_hex(0xd0d0d0),
            week_line_color: Color::from_hex(0xe6e6e6),
            day_line_color: Color::from_hex(0xf2f2f2),
            value_grid_color: Color::from_hex(0xe0e0e0),
            today_color: Color::from_hex(0xff6b6b),
            marker_color: Color::from_hex(0x7e57c2),
            brush_fill_color: Color::from_hex(0xcce4f7),
            brush_border_color: Color::from_hex(0x0078d4),
            brush_track_color: Color::from_hex(0xf5f5f5),
        }
    }
}

impl TimelineStyle {
    pub fn validate(self) -> GanttResult<Self> {
        for color in [
            self.status.active,
            self.status.renewal,
            self.status.expired,
            self.background,
            self.bar_fill,
            self.text_color,
            self.accent_text_color,
            self.axis_text_color,
            self.dot_stroke_color,
            self.year_line_color,
            self.quarter_line_color,
            self.month_line_color,
            self.week_line_color,
            self.day_line_color,
            self.value_grid_color,
            self.today_color,
            self.marker_color,
            self.brush_fill_color,
            self.brush_border_color,
            self.brush_track_color,
        ] {
            color.validate()?;
        }
        if !self.bar_border_width.is_finite() || self.bar_border_width < 0.0 {
            return Err(GanttError::InvalidData(
                "bar border width must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}
