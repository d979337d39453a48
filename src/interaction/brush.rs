use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::TimeScale;
use crate::error::{GanttError, GanttResult};

pub const DEFAULT_HANDLE_TOLERANCE_PX: f64 = 6.0;
pub const DEFAULT_MIN_SELECTION_PX: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrushAxis {
    Time,
    Value,
}

/// User-driven selection change, in overview pixels along the brush axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushEvent {
    pub axis: BrushAxis,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragTarget {
    StartHandle,
    EndHandle,
    Body,
    /// Pointer went down outside the selection; a new range is being drawn.
    Fresh,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BrushDrag {
    target: DragTarget,
    pointer_origin: f64,
    selection_origin: (f64, f64),
}

/// Draggable range control over one condensed full-domain axis.
///
/// Positions are pixels along the brush axis in `[0, length_px]`. Moving the
/// selection programmatically never yields a `BrushEvent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewSelector {
    axis: BrushAxis,
    length_px: f64,
    selection: Option<(f64, f64)>,
    drag: Option<BrushDrag>,
    handle_tolerance_px: f64,
    min_selection_px: f64,
}

impl OverviewSelector {
    pub fn new(axis: BrushAxis, length_px: f64) -> GanttResult<Self> {
        validate_length(length_px)?;
        Ok(Self {
            axis,
            length_px,
            selection: None,
            drag: None,
            handle_tolerance_px: DEFAULT_HANDLE_TOLERANCE_PX,
            min_selection_px: DEFAULT_MIN_SELECTION_PX,
        })
    }

    #[must_use]
    pub fn axis(&self) -> BrushAxis {
        self.axis
    }

    #[must_use]
    pub fn length_px(&self) -> f64 {
        self.length_px
    }

    #[must_use]
    pub fn selection(&self) -> Option<(f64, f64)> {
        self.selection
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Resizes the control, scaling the current selection proportionally.
    pub fn set_length(&mut self, length_px: f64) -> GanttResult<()> {
        validate_length(length_px)?;
        let ratio = length_px / self.length_px;
        self.length_px = length_px;
        self.selection = self
            .selection
            .map(|(start, end)| (start * ratio, end * ratio));
        self.drag = None;
        Ok(())
    }

    /// Moves the selection without emitting; the range is clamped to the
    /// control.
    pub fn move_to(&mut self, start: f64, end: f64) -> GanttResult<()> {
        if !start.is_finite() || !end.is_finite() {
            return Err(GanttError::InvalidData(
                "brush selection must be finite".to_owned(),
            ));
        }
        let low = start.min(end).clamp(0.0, self.length_px);
        let high = start.max(end).clamp(0.0, self.length_px);
        self.selection = if high - low > 0.0 {
            Some((low, high))
        } else {
            None
        };
        trace!(axis = ?self.axis, low, high, "brush moved programmatically");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selection = None;
        self.drag = None;
    }

    pub fn pointer_down(&mut self, position: f64) -> GanttResult<()> {
        validate_position(position)?;
        let position = position.clamp(0.0, self.length_px);
        let target = match self.selection {
            Some((start, _)) if (position - start).abs() <= self.handle_tolerance_px => {
                DragTarget::StartHandle
            }
            Some((_, end)) if (position - end).abs() <= self.handle_tolerance_px => {
                DragTarget::EndHandle
            }
            Some((start, end)) if position > start && position < end => DragTarget::Body,
            _ => DragTarget::Fresh,
        };
        self.drag = Some(BrushDrag {
            target,
            pointer_origin: position,
            selection_origin: self.selection.unwrap_or((position, position)),
        });
        Ok(())
    }

    /// Applies a drag step; returns the event when the selection changed.
    pub fn pointer_move(&mut self, position: f64) -> GanttResult<Option<BrushEvent>> {
        validate_position(position)?;
        let Some(drag) = self.drag else {
            return Ok(None);
        };
        let position = position.clamp(0.0, self.length_px);
        let delta = position - drag.pointer_origin;
        let (origin_start, origin_end) = drag.selection_origin;
        let min = self.min_selection_px.min(self.length_px);

        let next = match drag.target {
            DragTarget::StartHandle => {
                let start = (origin_start + delta).clamp(0.0, (origin_end - min).max(0.0));
                (start, origin_end)
            }
            DragTarget::EndHandle => {
                let end = (origin_end + delta).clamp((origin_start + min).min(self.length_px), self.length_px);
                (origin_start, end)
            }
            DragTarget::Body => {
                let shift = delta.clamp(-origin_start, self.length_px - origin_end);
                (origin_start + shift, origin_end + shift)
            }
            DragTarget::Fresh => (
                drag.pointer_origin.min(position),
                drag.pointer_origin.max(position),
            ),
        };

        if next.1 - next.0 < min {
            return Ok(None);
        }
        if self.selection == Some(next) {
            return Ok(None);
        }
        self.selection = Some(next);
        Ok(Some(BrushEvent {
            axis: self.axis,
            start: next.0,
            end: next.1,
        }))
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// `dd.mm.yyyy — dd.mm.yyyy` caption of a time selection over `overview`.
    #[must_use]
    pub fn caption(&self, overview: TimeScale) -> Option<String> {
        if self.axis != BrushAxis::Time {
            return None;
        }
        let (start, end) = self.selection?;
        let start = overview.invert(start)?;
        let end = overview.invert(end)?;
        Some(format!(
            "{} — {}",
            start.format("%d.%m.%Y"),
            end.format("%d.%m.%Y")
        ))
    }
}

fn validate_length(length_px: f64) -> GanttResult<()> {
    if !length_px.is_finite() || length_px <= 0.0 {
        return Err(GanttError::InvalidData(
            "brush length must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

fn validate_position(position: f64) -> GanttResult<()> {
    if !position.is_finite() {
        return Err(GanttError::InvalidData(
            "brush pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}
