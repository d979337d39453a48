use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AxisTransform, PixelPoint, TransformOrigin, TransformState, ZoomBounds};
use crate::error::{GanttError, GanttResult};

use super::InteractionMode;

/// Unit of a wheel delta as reported by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    fn multiplier(self) -> f64 {
        match self {
            Self::Pixel => 0.002,
            Self::Line => 0.05,
            Self::Page => 1.0,
        }
    }
}

/// Free-form pan/zoom over the main plot.
///
/// Coordinates are plot-local pixels. Only input frames that change the view
/// produce a `TransformState`; pointer-down never does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureController {
    bounds: ZoomBounds,
    time: AxisTransform,
    value: AxisTransform,
    drag_anchor: Option<PixelPoint>,
    mode: InteractionMode,
}

impl GestureController {
    pub fn new(bounds: ZoomBounds) -> GanttResult<Self> {
        Ok(Self {
            bounds: bounds.validate()?,
            time: AxisTransform::IDENTITY,
            value: AxisTransform::IDENTITY,
            drag_anchor: None,
            mode: InteractionMode::Idle,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn axes(&self) -> (AxisTransform, AxisTransform) {
        (self.time, self.value)
    }

    #[must_use]
    pub fn transform_state(&self) -> TransformState {
        TransformState::from_axes(self.time, self.value, TransformOrigin::Gesture, self.bounds)
    }

    /// Replaces the stored transform without emitting.
    pub fn set_axes(&mut self, time: AxisTransform, value: AxisTransform) {
        self.time = time;
        self.value = value;
    }

    pub fn reset(&mut self) {
        self.time = AxisTransform::IDENTITY;
        self.value = AxisTransform::IDENTITY;
        self.drag_anchor = None;
        self.mode = InteractionMode::Idle;
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> GanttResult<()> {
        validate_pointer(x, y)?;
        self.drag_anchor = Some(PixelPoint::new(x, y));
        self.mode = InteractionMode::Panning;
        trace!(x, y, "gesture pan start");
        Ok(())
    }

    /// Pans by the pointer delta while a drag is active.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> GanttResult<Option<TransformState>> {
        validate_pointer(x, y)?;
        let Some(anchor) = self.drag_anchor else {
            return Ok(None);
        };
        let dx = x - anchor.x;
        let dy = y - anchor.y;
        self.drag_anchor = Some(PixelPoint::new(x, y));
        if dx == 0.0 && dy == 0.0 {
            return Ok(None);
        }

        self.time = self.time.translated(dx);
        self.value = self.value.translated(dy);
        Ok(Some(self.transform_state()))
    }

    pub fn pointer_up(&mut self) {
        if self.drag_anchor.take().is_some() {
            trace!("gesture pan end");
        }
        self.mode = InteractionMode::Idle;
    }

    /// Zooms around `(x, y)`; `delta_y > 0` zooms out.
    ///
    /// The time-axis factor is bounded; the value axis follows with the same
    /// effective factor.
    pub fn wheel(
        &mut self,
        x: f64,
        y: f64,
        delta_y: f64,
        delta_mode: WheelDeltaMode,
    ) -> GanttResult<Option<TransformState>> {
        validate_pointer(x, y)?;
        if !delta_y.is_finite() {
            return Err(GanttError::InvalidData(
                "wheel delta must be finite".to_owned(),
            ));
        }

        let exponent = -delta_y * delta_mode.multiplier();
        let proposed = self.time.k * 2_f64.powf(exponent);
        let next_k = self.bounds.constrain_step(self.time.k, proposed);
        if next_k == self.time.k {
            return Ok(None);
        }

        let factor = next_k / self.time.k;
        self.time = self.time.zoom_to_about(next_k, x);
        self.value = self.value.zoom_to_about(self.value.k * factor, y);
        trace!(k = next_k, x, y, "gesture wheel zoom");
        Ok(Some(self.transform_state()))
    }

    /// Double-click zoom is disabled; the input is consumed without effect.
    pub fn double_click(&mut self, x: f64, y: f64) -> GanttResult<Option<TransformState>> {
        validate_pointer(x, y)?;
        trace!(x, y, "double-click zoom suppressed");
        Ok(None)
    }
}

fn validate_pointer(x: f64, y: f64) -> GanttResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(GanttError::InvalidData(
            "pointer coordinates must be finite".to_owned(),
        ));
    }
    Ok(())
}
