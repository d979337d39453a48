use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

/// Point in surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Visible window into the full time/value domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportExtent {
    pub time_start: DateTime<Utc>,
    pub time_end: DateTime<Utc>,
    /// Lower value bound (bottom edge of the plot).
    pub value_start: f64,
    /// Upper value bound (top edge of the plot).
    pub value_end: f64,
    pub width: u32,
    pub height: u32,
}

impl ViewportExtent {
    /// Elapsed days between the time bounds.
    #[must_use]
    pub fn time_span_days(&self) -> f64 {
        let millis = (self.time_end - self.time_start).num_milliseconds() as f64;
        millis / 86_400_000.0
    }

    #[must_use]
    pub fn contains_time(&self, time: DateTime<Utc>) -> bool {
        time >= self.time_start && time <= self.time_end
    }
}

/// Plot rectangle inside the drawing surface, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Converts a surface point into plot-local pixels.
    #[must_use]
    pub fn to_local(self, x: f64, y: f64) -> PixelPoint {
        PixelPoint::new(x - self.left, y - self.top)
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}
