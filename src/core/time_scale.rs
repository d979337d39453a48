use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{
    SECONDS_PER_DAY, datetime_to_unix_seconds, unix_seconds_to_datetime,
};
use crate::core::scale::{LinearScale, normalize_range};
use crate::core::transform::AxisTransform;
use crate::error::{GanttError, GanttResult};

/// Tuning controls for fitting the base time domain to data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScaleTuning {
    /// Fraction of the data span added on each side.
    pub padding_ratio: f64,
    /// Span substituted when all items share one instant.
    pub min_span_seconds: f64,
}

impl Default for TimeScaleTuning {
    fn default() -> Self {
        Self {
            padding_ratio: 0.1,
            min_span_seconds: SECONDS_PER_DAY,
        }
    }
}

impl TimeScaleTuning {
    pub fn validate(self) -> GanttResult<Self> {
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(GanttError::InvalidData(
                "time scale padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_span_seconds.is_finite() || self.min_span_seconds <= 0.0 {
            return Err(GanttError::InvalidData(
                "time scale min span must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Linear time → horizontal pixel scale.
///
/// `data_*` is the raw fitted item range; the linear domain adds padding and
/// is the fixed base every transform is composed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
    data_start: f64,
    data_end: f64,
}

impl TimeScale {
    /// Creates a scale whose domain is exactly `[start, end]` over `[0, width_px]`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, width_px: f64) -> GanttResult<Self> {
        Self::from_seconds(
            datetime_to_unix_seconds(start),
            datetime_to_unix_seconds(end),
            width_px,
            TimeScaleTuning {
                padding_ratio: 0.0,
                ..TimeScaleTuning::default()
            },
        )
    }

    /// Fits a padded domain around `[data_start, data_end]` (unix seconds).
    pub fn from_seconds(
        data_start: f64,
        data_end: f64,
        width_px: f64,
        tuning: TimeScaleTuning,
    ) -> GanttResult<Self> {
        let tuning = tuning.validate()?;
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(GanttError::InvalidData(
                "time scale width must be finite and > 0".to_owned(),
            ));
        }

        let (data_start, data_end) =
            normalize_range(data_start, data_end, tuning.min_span_seconds)?;
        let padding = (data_end - data_start) * tuning.padding_ratio;
        let linear = LinearScale::new(data_start - padding, data_end + padding, 0.0, width_px)?;

        Ok(Self {
            linear,
            data_start,
            data_end,
        })
    }

    /// Fits the domain to a set of instants, skipping non-finite ones.
    pub fn from_instants<I>(instants: I, width_px: f64, tuning: TimeScaleTuning) -> GanttResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for instant in instants.into_iter().filter(|value| value.is_finite()) {
            min = min.min(instant);
            max = max.max(instant);
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(GanttError::InvalidData(
                "time scale cannot be built from empty data".to_owned(),
            ));
        }
        Self::from_seconds(min, max, width_px, tuning)
    }

    #[must_use]
    pub fn linear(self) -> LinearScale {
        self.linear
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        self.linear.range().1
    }

    /// Padded base domain in unix seconds.
    #[must_use]
    pub fn domain_seconds(self) -> (f64, f64) {
        self.linear.domain()
    }

    /// Raw data extent in unix seconds (after the zero-span guard).
    #[must_use]
    pub fn data_range_seconds(self) -> (f64, f64) {
        (self.data_start, self.data_end)
    }

    pub fn domain(self) -> GanttResult<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, end) = self.linear.domain();
        match (unix_seconds_to_datetime(start), unix_seconds_to_datetime(end)) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(GanttError::InvalidData(
                "time domain is outside the representable calendar".to_owned(),
            )),
        }
    }

    #[must_use]
    pub fn apply(self, time: DateTime<Utc>) -> f64 {
        self.linear.apply(datetime_to_unix_seconds(time))
    }

    #[must_use]
    pub fn apply_seconds(self, seconds: f64) -> f64 {
        self.linear.apply(seconds)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> Option<DateTime<Utc>> {
        unix_seconds_to_datetime(self.linear.invert(pixel))
    }

    #[must_use]
    pub fn invert_seconds(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    /// Scaled copy for the given transform; the base scale is unchanged.
    pub fn rescale(self, transform: AxisTransform) -> GanttResult<Self> {
        Ok(Self {
            linear: self.linear.rescale(transform)?,
            ..self
        })
    }

    /// Same domain over a new surface width.
    pub fn with_width(self, width_px: f64) -> GanttResult<Self> {
        Ok(Self {
            linear: self.linear.with_range(0.0, width_px)?,
            ..self
        })
    }

    /// Transform whose rescaled domain equals `[start, end]` (unix seconds).
    pub fn transform_for_domain(self, start: f64, end: f64) -> GanttResult<AxisTransform> {
        self.linear.transform_for_domain(start, end)
    }
}
