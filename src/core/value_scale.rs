use serde::{Deserialize, Serialize};

use crate::core::scale::{LinearScale, normalize_range};
use crate::core::transform::AxisTransform;
use crate::error::{GanttError, GanttResult};

/// Span substituted when the configured value domain collapses to a point.
pub const MIN_VALUE_SPAN: f64 = 1.0;

/// Value → vertical pixel scale, inverted so larger values sit higher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    linear: LinearScale,
}

impl ValueScale {
    /// Maps `[low, high]` onto `[height_px, 0]`.
    pub fn new(low: f64, high: f64, height_px: f64) -> GanttResult<Self> {
        if !height_px.is_finite() || height_px <= 0.0 {
            return Err(GanttError::InvalidData(
                "value scale height must be finite and > 0".to_owned(),
            ));
        }
        let (low, high) = normalize_range(low, high, MIN_VALUE_SPAN)?;
        Ok(Self {
            linear: LinearScale::new(low, high, height_px, 0.0)?,
        })
    }

    #[must_use]
    pub fn linear(self) -> LinearScale {
        self.linear
    }

    /// `(bottom value, top value)`.
    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        self.linear.range().0
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        self.linear.apply(value)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    pub fn rescale(self, transform: AxisTransform) -> GanttResult<Self> {
        Ok(Self {
            linear: self.linear.rescale(transform)?,
        })
    }

    pub fn with_height(self, height_px: f64) -> GanttResult<Self> {
        let (low, high) = self.linear.domain();
        Self::new(low, high, height_px)
    }

    /// Transform whose rescaled domain equals `[low, high]`.
    pub fn transform_for_domain(self, low: f64, high: f64) -> GanttResult<AxisTransform> {
        self.linear.transform_for_domain(low.min(high), low.max(high))
    }
}
