use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{CullingConfig, DEFAULT_WARNING_THRESHOLD_DAYS, TimeScaleTuning, Viewport, ZoomBounds};
use crate::error::{GanttError, GanttResult};
use crate::render::{ItemGeometry, LabelLocale, LodConfig, TimelineStyle};

/// Outer spacing between the surface edge and the plot, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for ChartMargins {
    fn default() -> Self {
        Self {
            top: 80.0,
            right: 30.0,
            bottom: 100.0,
            left: 100.0,
        }
    }
}

impl ChartMargins {
    pub fn validate(self) -> GanttResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GanttError::InvalidData(format!(
                    "{side} margin must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Sizes of the two overview selectors and their placement gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverviewConfig {
    /// Height of the time selector track under the plot.
    pub time_brush_height: f64,
    /// Width of the value selector track left of the plot.
    pub value_brush_width: f64,
    /// Band between the plot and the time track, holding the tick labels.
    pub axis_band_height: f64,
    /// Gap between the value track and the plot, holding the value labels.
    pub value_axis_gap: f64,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            time_brush_height: 40.0,
            value_brush_width: 40.0,
            axis_band_height: 40.0,
            value_axis_gap: 40.0,
        }
    }
}

impl OverviewConfig {
    pub fn validate(self) -> GanttResult<Self> {
        if !self.time_brush_height.is_finite() || self.time_brush_height <= 0.0 {
            return Err(GanttError::InvalidData(
                "time brush height must be finite and > 0".to_owned(),
            ));
        }
        if !self.value_brush_width.is_finite() || self.value_brush_width <= 0.0 {
            return Err(GanttError::InvalidData(
                "value brush width must be finite and > 0".to_owned(),
            ));
        }
        if !self.axis_band_height.is_finite()
            || self.axis_band_height < 0.0
            || !self.value_axis_gap.is_finite()
            || self.value_axis_gap < 0.0
        {
            return Err(GanttError::InvalidData(
                "overview gaps must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// View applied after every data load.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum InitialView {
    /// Whole padded data domain.
    #[default]
    Full,
    /// Time sub-range as fractions of the full domain width.
    Window { start_ratio: f64, end_ratio: f64 },
}

impl InitialView {
    /// The `[0.1, 0.6]` window the dashboard opens with.
    #[must_use]
    pub fn dashboard_window() -> Self {
        Self::Window {
            start_ratio: 0.1,
            end_ratio: 0.6,
        }
    }

    pub fn validate(self) -> GanttResult<Self> {
        if let Self::Window {
            start_ratio,
            end_ratio,
        } = self
        {
            if !start_ratio.is_finite()
                || !end_ratio.is_finite()
                || start_ratio < 0.0
                || end_ratio > 1.0
                || start_ratio >= end_ratio
            {
                return Err(GanttError::InvalidData(
                    "initial window must satisfy 0 <= start < end <= 1".to_owned(),
                ));
            }
        }
        Ok(self)
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: ChartMargins,
    #[serde(default)]
    pub geometry: ItemGeometry,
    #[serde(default)]
    pub zoom_bounds: ZoomBounds,
    #[serde(default)]
    pub lod: LodConfig,
    #[serde(default)]
    pub culling: CullingConfig,
    #[serde(default)]
    pub overview: OverviewConfig,
    #[serde(default)]
    pub locale: LabelLocale,
    /// Date used for status derivation and the today marker; `None` reads the
    /// system clock at load time.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default = "default_show_today_marker")]
    pub show_today_marker: bool,
    #[serde(default = "default_warning_threshold_days")]
    pub warning_threshold_days: i64,
    #[serde(default = "default_value_domain")]
    pub value_domain: (f64, f64),
    #[serde(default)]
    pub time_tuning: TimeScaleTuning,
    #[serde(default)]
    pub initial_view: InitialView,
    #[serde(default)]
    pub style: TimelineStyle,
}

impl TimelineEngineConfig {
    /// Creates a config with default layout for the given surface size.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margins: ChartMargins::default(),
            geometry: ItemGeometry::default(),
            zoom_bounds: ZoomBounds::default(),
            lod: LodConfig::default(),
            culling: CullingConfig::default(),
            overview: OverviewConfig::default(),
            locale: LabelLocale::default(),
            today: None,
            show_today_marker: default_show_today_marker(),
            warning_threshold_days: default_warning_threshold_days(),
            value_domain: default_value_domain(),
            time_tuning: TimeScaleTuning::default(),
            initial_view: InitialView::default(),
            style: TimelineStyle::default(),
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: ChartMargins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: ItemGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_zoom_bounds(mut self, zoom_bounds: ZoomBounds) -> Self {
        self.zoom_bounds = zoom_bounds;
        self
    }

    #[must_use]
    pub fn with_lod(mut self, lod: LodConfig) -> Self {
        self.lod = lod;
        self
    }

    #[must_use]
    pub fn with_culling(mut self, culling: CullingConfig) -> Self {
        self.culling = culling;
        self
    }

    #[must_use]
    pub fn with_overview(mut self, overview: OverviewConfig) -> Self {
        self.overview = overview;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: LabelLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Pins "today" instead of reading the system clock.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    #[must_use]
    pub fn with_today_marker(mut self, show: bool) -> Self {
        self.show_today_marker = show;
        self
    }

    #[must_use]
    pub fn with_warning_threshold_days(mut self, days: i64) -> Self {
        self.warning_threshold_days = days;
        self
    }

    #[must_use]
    pub fn with_value_domain(mut self, low: f64, high: f64) -> Self {
        self.value_domain = (low, high);
        self
    }

    #[must_use]
    pub fn with_time_tuning(mut self, tuning: TimeScaleTuning) -> Self {
        self.time_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_initial_view(mut self, initial_view: InitialView) -> Self {
        self.initial_view = initial_view;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: TimelineStyle) -> Self {
        self.style = style;
        self
    }

    /// Validates every nested section; the viewport is checked by the engine.
    pub fn validate(self) -> GanttResult<Self> {
        self.margins.validate()?;
        self.geometry.validate()?;
        self.zoom_bounds.validate()?;
        self.lod.validate()?;
        self.culling.validate()?;
        self.overview.validate()?;
        self.time_tuning.validate()?;
        self.initial_view.validate()?;
        self.style.validate()?;
        if self.warning_threshold_days < 0 {
            return Err(GanttError::InvalidData(
                "warning threshold days must be >= 0".to_owned(),
            ));
        }
        let (low, high) = self.value_domain;
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(GanttError::InvalidData(
                "value domain must be finite with low <= high".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> GanttResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_show_today_marker() -> bool {
    true
}

fn default_warning_threshold_days() -> i64 {
    DEFAULT_WARNING_THRESHOLD_DAYS
}

fn default_value_domain() -> (f64, f64) {
    (0.0, 150.0)
}
