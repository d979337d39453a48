use crate::error::{GanttError, GanttResult};
use crate::interaction::{BrushAxis, WheelDeltaMode};
use crate::render::Renderer;

use super::{TimelineEngine, engine_core::PointerTarget};

impl<R: Renderer> TimelineEngine<R> {
    /// Starts a press at surface point `(x, y)`.
    ///
    /// The region under the press (plot, time track or value track) keeps the
    /// pointer until release. Presses elsewhere are ignored.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> GanttResult<()> {
        validate_surface_point(x, y)?;
        let layout = self.core.session.layout();
        let target = if layout.time_track.contains(x, y) {
            self.core
                .session
                .brush_pointer_down(BrushAxis::Time, x - layout.time_track.left)?;
            Some(PointerTarget::TimeTrack)
        } else if layout.value_track.contains(x, y) {
            self.core
                .session
                .brush_pointer_down(BrushAxis::Value, y - layout.value_track.top)?;
            Some(PointerTarget::ValueTrack)
        } else if layout.plot.contains(x, y) {
            let local = layout.plot.to_local(x, y);
            self.core.session.gesture_pointer_down(local.x, local.y)?;
            Some(PointerTarget::Plot)
        } else {
            None
        };
        self.core.pointer.target = target;
        Ok(())
    }

    /// Moves the pointer; drags the captured region or updates hover.
    ///
    /// Hover is resolved against the last rendered frame and reports nothing
    /// while a view change is waiting to be rendered.
    /// Returns `true` when the view changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> GanttResult<bool> {
        validate_surface_point(x, y)?;
        let layout = self.core.session.layout();
        let changed = match self.core.pointer.target {
            Some(PointerTarget::Plot) => {
                let local = layout.plot.to_local(x, y);
                self.core.session.gesture_pointer_move(local.x, local.y)?
            }
            Some(PointerTarget::TimeTrack) => self
                .core
                .session
                .brush_pointer_move(BrushAxis::Time, x - layout.time_track.left)?,
            Some(PointerTarget::ValueTrack) => self
                .core
                .session
                .brush_pointer_move(BrushAxis::Value, y - layout.value_track.top)?,
            None => {
                self.update_hover(x, y);
                false
            }
        };
        if changed {
            self.after_view_change()?;
        }
        Ok(changed)
    }

    /// Releases the captured region, if any.
    pub fn pointer_up(&mut self) {
        match self.core.pointer.target.take() {
            Some(PointerTarget::Plot) => self.core.session.gesture_pointer_up(),
            Some(PointerTarget::TimeTrack) => self.core.session.brush_pointer_up(BrushAxis::Time),
            Some(PointerTarget::ValueTrack) => {
                self.core.session.brush_pointer_up(BrushAxis::Value);
            }
            None => {}
        }
    }

    /// Pointer left the surface: ends hover and any drag in progress.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
        self.clear_hover();
    }

    /// Wheel zoom anchored at surface point `(x, y)`; only inside the plot.
    pub fn wheel(
        &mut self,
        x: f64,
        y: f64,
        delta_y: f64,
        delta_mode: WheelDeltaMode,
    ) -> GanttResult<bool> {
        validate_surface_point(x, y)?;
        let plot = self.core.session.layout().plot;
        if !plot.contains(x, y) {
            return Ok(false);
        }
        let local = plot.to_local(x, y);
        let changed = self
            .core
            .session
            .gesture_wheel(local.x, local.y, delta_y, delta_mode)?;
        if changed {
            self.after_view_change()?;
        }
        Ok(changed)
    }

    /// Double click inside the plot; zoom-on-double-click is suppressed, so
    /// this only validates input and reports no view change.
    pub fn double_click(&mut self, x: f64, y: f64) -> GanttResult<bool> {
        validate_surface_point(x, y)?;
        let plot = self.core.session.layout().plot;
        if !plot.contains(x, y) {
            return Ok(false);
        }
        let local = plot.to_local(x, y);
        let changed = self.core.session.gesture_double_click(local.x, local.y)?;
        if changed {
            self.after_view_change()?;
        }
        Ok(changed)
    }

    /// Brings the surface in line with the session and informs observers.
    ///
    /// Hover ends here; hit testing resumes with the next rendered frame.
    pub(super) fn after_view_change(&mut self) -> GanttResult<()> {
        self.clear_hover();
        self.core.scene_stale = true;
        self.core.surface.activate(self.core.session.lod_strategy());
        self.emit_viewport_change()
    }
}

fn validate_surface_point(x: f64, y: f64) -> GanttResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(GanttError::InvalidData(
            "pointer coordinates must be finite".to_owned(),
        ));
    }
    Ok(())
}
