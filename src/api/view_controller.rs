use chrono::NaiveDate;

use crate::core::primitives::date_to_unix_seconds;
use crate::core::{AxisTransform, TransformState};
use crate::error::{GanttError, GanttResult};
use crate::interaction::BrushEvent;
use crate::render::Renderer;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Shows `[start, end]` on the time axis; both selectors follow silently.
    pub fn set_time_window(&mut self, start: NaiveDate, end: NaiveDate) -> GanttResult<()> {
        if end <= start {
            return Err(GanttError::InvalidData(
                "time window end must be after start".to_owned(),
            ));
        }
        self.core
            .session
            .set_time_domain(date_to_unix_seconds(start), date_to_unix_seconds(end))?;
        self.after_view_change()
    }

    /// Shows `[low, high]` on the value axis.
    pub fn set_value_window(&mut self, low: f64, high: f64) -> GanttResult<()> {
        if !low.is_finite() || !high.is_finite() || high <= low {
            return Err(GanttError::InvalidData(
                "value window must be finite with low < high".to_owned(),
            ));
        }
        self.core.session.set_value_domain(low, high)?;
        self.after_view_change()
    }

    /// Returns to the configured initial view.
    pub fn reset_view(&mut self) -> GanttResult<()> {
        self.core.session.apply_initial_view()?;
        self.after_view_change()
    }

    /// Shows the whole data domain on both axes.
    pub fn fit_content(&mut self) -> GanttResult<()> {
        self.core
            .session
            .apply_programmatic(AxisTransform::IDENTITY, AxisTransform::IDENTITY)?;
        self.after_view_change()
    }

    /// Feeds an already-built transform as if a gesture produced it.
    ///
    /// Returns `false` when the update was dropped as an echo.
    pub fn apply_gesture_transform(&mut self, state: TransformState) -> GanttResult<bool> {
        let applied = self.core.session.apply_gesture(state)?;
        if applied {
            self.after_view_change()?;
        }
        Ok(applied)
    }

    /// Feeds a selector event as if the user dragged that selector.
    pub fn apply_brush_event(&mut self, event: BrushEvent) -> GanttResult<bool> {
        let applied = self.core.session.apply_brush_event(event)?;
        if applied {
            self.after_view_change()?;
        }
        Ok(applied)
    }

    /// Caption of the time selector, e.g. `"01.02.2024 — 15.03.2024"`.
    #[must_use]
    pub fn time_selection_caption(&self) -> Option<String> {
        let session = &self.core.session;
        session.time_brush().caption(session.base_time())
    }
}
