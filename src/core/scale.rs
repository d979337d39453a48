use serde::{Deserialize, Serialize};

use crate::core::transform::AxisTransform;
use crate::error::{GanttError, GanttResult};

/// Continuous linear mapping from a domain interval onto a pixel range.
///
/// The range may be descending (`range_start > range_end`), which is how the
/// value axis maps larger values to smaller pixel y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> GanttResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(GanttError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(GanttError::InvalidData(
                "scale range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Pixels per domain unit (signed).
    #[must_use]
    pub fn slope(self) -> f64 {
        (self.range_end - self.range_start) / (self.domain_end - self.domain_start)
    }

    /// Maps a domain value to pixels. Non-finite input yields `NaN`.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        if !value.is_finite() {
            return f64::NAN;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a pixel back to the domain. Non-finite input yields `NaN`.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        if !pixel.is_finite() {
            return f64::NAN;
        }
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Returns a copy whose domain is what the transformed view shows over the
    /// same pixel range. The receiver is left untouched.
    pub fn rescale(self, transform: AxisTransform) -> GanttResult<Self> {
        let start = self.invert(transform.invert(self.range_start));
        let end = self.invert(transform.invert(self.range_end));
        Self::new(start, end, self.range_start, self.range_end)
    }

    /// Same domain mapped onto a different pixel range.
    pub fn with_range(self, range_start: f64, range_end: f64) -> GanttResult<Self> {
        Self::new(self.domain_start, self.domain_end, range_start, range_end)
    }

    /// Solves the axis transform whose rescaled domain equals `[start, end]`.
    pub fn transform_for_domain(self, start: f64, end: f64) -> GanttResult<AxisTransform> {
        if !start.is_finite() || !end.is_finite() || start == end {
            return Err(GanttError::InvalidData(
                "target domain must be finite and non-zero".to_owned(),
            ));
        }
        let p0 = self.apply(start);
        let p1 = self.apply(end);
        let k = (self.range_end - self.range_start) / (p1 - p0);
        let t = self.range_start - p0 * k;
        AxisTransform::new(k, t)
    }
}

/// Expands `[start, end]` to at least `min_span`, centred on the midpoint.
pub(crate) fn normalize_range(start: f64, end: f64, min_span: f64) -> GanttResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(GanttError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    let (low, high) = (start.min(end), start.max(end));
    if high - low < min_span {
        let mid = (low + high) / 2.0;
        let half = min_span / 2.0;
        return Ok((mid - half, mid + half));
    }

    Ok((low, high))
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, normalize_range};
    use crate::core::transform::AxisTransform;

    #[test]
    fn descending_range_inverts_orientation() {
        let scale = LinearScale::new(0.0, 150.0, 300.0, 0.0).expect("scale");
        assert_eq!(scale.apply(0.0), 300.0);
        assert_eq!(scale.apply(150.0), 0.0);
        assert_eq!(scale.invert(150.0), 75.0);
    }

    #[test]
    fn rescale_keeps_base_untouched() {
        let base = LinearScale::new(0.0, 100.0, 0.0, 1000.0).expect("scale");
        let zoomed = base
            .rescale(AxisTransform::new(2.0, -500.0).expect("transform"))
            .expect("rescale");
        assert_eq!(base.domain(), (0.0, 100.0));
        let (start, end) = zoomed.domain();
        assert!((start - 25.0).abs() <= 1e-9);
        assert!((end - 75.0).abs() <= 1e-9);
    }

    #[test]
    fn transform_for_domain_roundtrips_through_rescale() {
        let base = LinearScale::new(10.0, 110.0, 0.0, 800.0).expect("scale");
        let transform = base.transform_for_domain(30.0, 55.0).expect("solve");
        let (start, end) = base.rescale(transform).expect("rescale").domain();
        assert!((start - 30.0).abs() <= 1e-9);
        assert!((end - 55.0).abs() <= 1e-9);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let (low, high) = normalize_range(5.0, 5.0, 2.0).expect("normalize");
        assert_eq!((low, high), (4.0, 6.0));
    }
}
