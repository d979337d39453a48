use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

/// One-dimensional pan + zoom composed on top of a base scale.
///
/// `apply(p) = p * k + t` maps a base-scale pixel to a screen pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTransform {
    pub k: f64,
    pub t: f64,
}

impl Default for AxisTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AxisTransform {
    pub const IDENTITY: Self = Self { k: 1.0, t: 0.0 };

    pub fn new(k: f64, t: f64) -> GanttResult<Self> {
        if !k.is_finite() || k <= 0.0 {
            return Err(GanttError::InvalidData(
                "axis transform scale must be finite and > 0".to_owned(),
            ));
        }
        if !t.is_finite() {
            return Err(GanttError::InvalidData(
                "axis transform translation must be finite".to_owned(),
            ));
        }
        Ok(Self { k, t })
    }

    #[must_use]
    pub fn apply(self, pixel: f64) -> f64 {
        pixel * self.k + self.t
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        (pixel - self.t) / self.k
    }

    /// Changes the scale to `k` while keeping the screen pixel `anchor_px`
    /// over the same base position.
    #[must_use]
    pub fn zoom_to_about(self, k: f64, anchor_px: f64) -> Self {
        let base = self.invert(anchor_px);
        Self {
            k,
            t: anchor_px - base * k,
        }
    }

    #[must_use]
    pub fn translated(self, delta_px: f64) -> Self {
        Self {
            k: self.k,
            t: self.t + delta_px,
        }
    }
}

/// Bounded zoom-factor range for gesture input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 10.0,
        }
    }
}

impl ZoomBounds {
    pub fn new(min: f64, max: f64) -> GanttResult<Self> {
        Self { min, max }.validate()
    }

    pub fn validate(self) -> GanttResult<Self> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min <= 0.0 || self.min > self.max
        {
            return Err(GanttError::InvalidData(
                "zoom bounds must be finite with 0 < min <= max".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp(self, k: f64) -> f64 {
        if !k.is_finite() {
            return 1.0_f64.clamp(self.min, self.max);
        }
        k.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(self, k: f64) -> bool {
        k >= self.min && k <= self.max
    }

    /// Constrains a proposed zoom step.
    ///
    /// A step may never carry `k` further outside the bounds than it already
    /// is; a factor that is already outside (set by an overview selector) is
    /// allowed to move back towards the range without jumping.
    #[must_use]
    pub fn constrain_step(self, current: f64, proposed: f64) -> f64 {
        if proposed > self.max {
            if current > self.max {
                return proposed.min(current);
            }
            return self.max;
        }
        if proposed < self.min {
            if current < self.min {
                return proposed.max(current);
            }
            return self.min;
        }
        proposed
    }
}

/// Which control produced a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformOrigin {
    Gesture,
    BrushTime,
    BrushValue,
    Programmatic,
}

/// Composed viewport transform plus the control that last produced it.
///
/// `k` is the bounded zoom factor that drives level of detail, label
/// amplitude and bar width. The per-axis maps keep the exact affine state of
/// each axis so the time and value axes stay decoupled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    pub k: f64,
    pub tx: f64,
    pub ty: f64,
    pub origin: TransformOrigin,
    pub time: AxisTransform,
    pub value: AxisTransform,
}

impl TransformState {
    #[must_use]
    pub fn from_axes(
        time: AxisTransform,
        value: AxisTransform,
        origin: TransformOrigin,
        bounds: ZoomBounds,
    ) -> Self {
        Self {
            k: bounds.clamp(time.k),
            tx: time.t,
            ty: value.t,
            origin,
            time,
            value,
        }
    }

    /// Identity view covering the full base domain.
    #[must_use]
    pub fn identity(bounds: ZoomBounds) -> Self {
        Self::from_axes(
            AxisTransform::IDENTITY,
            AxisTransform::IDENTITY,
            TransformOrigin::Programmatic,
            bounds,
        )
    }

    #[must_use]
    pub fn with_origin(mut self, origin: TransformOrigin) -> Self {
        self.origin = origin;
        self
    }
}
