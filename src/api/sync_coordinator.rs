use tracing::{debug, trace};

use crate::core::{AxisTransform, GranularityLevel, TransformOrigin, TransformState, VisibleSet};
use crate::error::{GanttError, GanttResult};
use crate::interaction::{
    BrushAxis, BrushEvent, OverviewSelector, SyncPhase, WheelDeltaMode, axis_for_selection,
    selection_for_axis,
};
use crate::render::{LodDecision, LodSelector};

use super::TimelineSession;

/// Session state a failed pass is rolled back to.
struct PassRollback {
    transform: TransformState,
    time_brush: OverviewSelector,
    value_brush: OverviewSelector,
    lod: LodSelector,
    last_lod: LodDecision,
    visible: VisibleSet,
    granularity: GranularityLevel,
}

impl PassRollback {
    fn capture(session: &TimelineSession) -> Self {
        Self {
            transform: session.transform,
            time_brush: session.time_brush,
            value_brush: session.value_brush,
            lod: session.lod,
            last_lod: session.last_lod,
            visible: session.visible.clone(),
            granularity: session.granularity,
        }
    }

    fn restore(self, session: &mut TimelineSession) {
        session.transform = self.transform;
        session.gesture.set_axes(self.transform.time, self.transform.value);
        session.time_brush = self.time_brush;
        session.value_brush = self.value_brush;
        session.lod = self.lod;
        session.last_lod = self.last_lod;
        session.visible = self.visible;
        session.granularity = self.granularity;
    }
}

impl TimelineSession {
    /// Runs `pass` under the sync guard for `phase`.
    ///
    /// Any input routed back into the session while the pass runs is an echo
    /// and is dropped. A failing pass restores the view it started from and
    /// returns the guard to `Idle`.
    pub fn with_pass<T>(
        &mut self,
        phase: SyncPhase,
        pass: impl FnOnce(&mut Self) -> GanttResult<T>,
    ) -> GanttResult<T> {
        self.guard.begin(phase)?;
        let rollback = PassRollback::capture(self);
        match pass(self) {
            Ok(value) => {
                self.guard.finish(phase)?;
                trace!(
                    phase = ?phase,
                    k = self.transform.k,
                    visible = self.visible.len(),
                    granularity = self.granularity.as_str(),
                    "sync pass complete"
                );
                Ok(value)
            }
            Err(err) => {
                rollback.restore(self);
                self.guard.abort();
                debug!(phase = ?phase, error = %err, "sync pass rolled back");
                Err(err)
            }
        }
    }

    /// Gesture origin: adopt the transform and move both selectors to match.
    ///
    /// Externally built states are validated per axis and their zoom step is
    /// constrained like a wheel step, anchored at the plot centre.
    /// Returns `false` when the update was dropped as an echo.
    pub fn apply_gesture(&mut self, state: TransformState) -> GanttResult<bool> {
        if !self.guard.admit(SyncPhase::ApplyingGesture) {
            return Ok(false);
        }
        let state = self.constrain_gesture_state(state)?;
        self.run_gesture_pass(state)?;
        Ok(true)
    }

    /// Selector origin: rebuild the transform of that axis only.
    ///
    /// Returns `false` when the update was dropped as an echo.
    pub fn apply_brush_event(&mut self, event: BrushEvent) -> GanttResult<bool> {
        let (phase, origin) = match event.axis {
            BrushAxis::Time => (SyncPhase::ApplyingBrushTime, TransformOrigin::BrushTime),
            BrushAxis::Value => (SyncPhase::ApplyingBrushValue, TransformOrigin::BrushValue),
        };
        if !self.guard.admit(phase) {
            return Ok(false);
        }
        self.with_pass(phase, |session| {
            let length = match event.axis {
                BrushAxis::Time => session.layout.plot.width,
                BrushAxis::Value => session.layout.plot.height,
            };
            let start = event.start.min(event.end).clamp(0.0, length);
            let end = event.start.max(event.end).clamp(0.0, length);
            session.selector_mut(event.axis).move_to(start, end)?;
            let solved = axis_for_selection(start, end, length)?;
            let (time, value) = match event.axis {
                BrushAxis::Time => (solved, session.transform.value),
                BrushAxis::Value => (session.transform.time, solved),
            };
            session.transform = TransformState::from_axes(time, value, origin, session.bounds);
            session.gesture.set_axes(time, value);
            session.refresh_derived()?;
            Ok(true)
        })
    }

    /// Host-driven view change; moves both selectors without emitting.
    pub fn apply_programmatic(
        &mut self,
        time: AxisTransform,
        value: AxisTransform,
    ) -> GanttResult<()> {
        if !self.guard.is_idle() {
            return Err(GanttError::SyncConflict {
                active: self.guard.phase(),
                requested: SyncPhase::Idle,
            });
        }
        self.transform = self.programmatic_state(time, value);
        self.gesture.set_axes(time, value);
        self.sync_selectors()?;
        self.refresh_derived()
    }

    /// Shows exactly `[start, end]` (unix seconds) on the time axis.
    pub fn set_time_domain(&mut self, start: f64, end: f64) -> GanttResult<()> {
        let time = self.base_time.transform_for_domain(start, end)?;
        self.apply_programmatic(time, self.transform.value)
    }

    /// Shows exactly `[low, high]` on the value axis.
    pub fn set_value_domain(&mut self, low: f64, high: f64) -> GanttResult<()> {
        let value = self.base_value.transform_for_domain(low, high)?;
        self.apply_programmatic(self.transform.time, value)
    }

    pub fn gesture_pointer_down(&mut self, x: f64, y: f64) -> GanttResult<()> {
        self.gesture.pointer_down(x, y)
    }

    pub fn gesture_pointer_move(&mut self, x: f64, y: f64) -> GanttResult<bool> {
        if !self.guard.admit(SyncPhase::ApplyingGesture) {
            return Ok(false);
        }
        match self.gesture.pointer_move(x, y)? {
            Some(state) => self.run_gesture_pass(state).map(|()| true),
            None => Ok(false),
        }
    }

    pub fn gesture_pointer_up(&mut self) {
        self.gesture.pointer_up();
    }

    pub fn gesture_wheel(
        &mut self,
        x: f64,
        y: f64,
        delta_y: f64,
        delta_mode: WheelDeltaMode,
    ) -> GanttResult<bool> {
        if !self.guard.admit(SyncPhase::ApplyingGesture) {
            return Ok(false);
        }
        match self.gesture.wheel(x, y, delta_y, delta_mode)? {
            Some(state) => self.run_gesture_pass(state).map(|()| true),
            None => Ok(false),
        }
    }

    pub fn gesture_double_click(&mut self, x: f64, y: f64) -> GanttResult<bool> {
        Ok(self.gesture.double_click(x, y)?.is_some())
    }

    pub fn brush_pointer_down(&mut self, axis: BrushAxis, position: f64) -> GanttResult<()> {
        self.selector_mut(axis).pointer_down(position)
    }

    pub fn brush_pointer_move(&mut self, axis: BrushAxis, position: f64) -> GanttResult<bool> {
        let phase = match axis {
            BrushAxis::Time => SyncPhase::ApplyingBrushTime,
            BrushAxis::Value => SyncPhase::ApplyingBrushValue,
        };
        if !self.guard.admit(phase) {
            return Ok(false);
        }
        match self.selector_mut(axis).pointer_move(position)? {
            Some(event) => self.apply_brush_event(event),
            None => Ok(false),
        }
    }

    pub fn brush_pointer_up(&mut self, axis: BrushAxis) {
        self.selector_mut(axis).pointer_up();
    }

    fn run_gesture_pass(&mut self, state: TransformState) -> GanttResult<()> {
        self.with_pass(SyncPhase::ApplyingGesture, |session| {
            session.transform = state.with_origin(TransformOrigin::Gesture);
            session.gesture.set_axes(state.time, state.value);
            session.sync_selectors()?;
            session.refresh_derived()
        })
    }

    fn constrain_gesture_state(&self, state: TransformState) -> GanttResult<TransformState> {
        let time = AxisTransform::new(state.time.k, state.time.t)?;
        let value = AxisTransform::new(state.value.k, state.value.t)?;
        let next_k = self.bounds.constrain_step(self.transform.time.k, time.k);
        let (time, value) = if next_k == time.k {
            (time, value)
        } else {
            let factor = next_k / time.k;
            (
                time.zoom_to_about(next_k, self.layout.plot.width / 2.0),
                value.zoom_to_about(value.k * factor, self.layout.plot.height / 2.0),
            )
        };
        Ok(TransformState::from_axes(
            time,
            value,
            TransformOrigin::Gesture,
            self.bounds,
        ))
    }

    fn sync_selectors(&mut self) -> GanttResult<()> {
        match selection_for_axis(self.transform.time, self.layout.plot.width) {
            Some((start, end)) => self.time_brush.move_to(start, end)?,
            None => self.time_brush.clear(),
        }
        match selection_for_axis(self.transform.value, self.layout.plot.height) {
            Some((start, end)) => self.value_brush.move_to(start, end)?,
            None => self.value_brush.clear(),
        }
        Ok(())
    }

    fn selector_mut(&mut self, axis: BrushAxis) -> &mut OverviewSelector {
        match axis {
            BrushAxis::Time => &mut self.time_brush,
            BrushAxis::Value => &mut self.value_brush,
        }
    }
}
