use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AxisTransform, TransformOrigin};
use crate::error::{GanttError, GanttResult};

/// Synchronization pass currently being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SyncPhase {
    #[default]
    Idle,
    ApplyingGesture,
    ApplyingBrushTime,
    ApplyingBrushValue,
}

impl SyncPhase {
    #[must_use]
    pub fn for_origin(origin: TransformOrigin) -> Option<Self> {
        match origin {
            TransformOrigin::Gesture => Some(Self::ApplyingGesture),
            TransformOrigin::BrushTime => Some(Self::ApplyingBrushTime),
            TransformOrigin::BrushValue => Some(Self::ApplyingBrushValue),
            TransformOrigin::Programmatic => None,
        }
    }
}

/// Guard state machine: exactly one origin drives a pass.
///
/// `Idle -> Applying* -> Idle`. Input that arrives while a pass is active is
/// an echo of that pass and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncGuard {
    phase: SyncPhase,
    completed_passes: u64,
    dropped_echoes: u64,
}

impl SyncGuard {
    #[must_use]
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == SyncPhase::Idle
    }

    #[must_use]
    pub fn completed_passes(&self) -> u64 {
        self.completed_passes
    }

    #[must_use]
    pub fn dropped_echoes(&self) -> u64 {
        self.dropped_echoes
    }

    /// Admits input for `requested` only when idle; otherwise counts an echo.
    pub fn admit(&mut self, requested: SyncPhase) -> bool {
        if self.is_idle() {
            return true;
        }
        self.dropped_echoes += 1;
        trace!(
            active = ?self.phase,
            requested = ?requested,
            dropped = self.dropped_echoes,
            "dropping echo input during sync pass"
        );
        false
    }

    pub fn begin(&mut self, requested: SyncPhase) -> GanttResult<()> {
        if requested == SyncPhase::Idle {
            return Err(GanttError::InvalidData(
                "sync pass must name an applying phase".to_owned(),
            ));
        }
        if !self.is_idle() {
            return Err(GanttError::SyncConflict {
                active: self.phase,
                requested,
            });
        }
        self.phase = requested;
        Ok(())
    }

    pub fn finish(&mut self, phase: SyncPhase) -> GanttResult<()> {
        if self.phase != phase {
            return Err(GanttError::SyncConflict {
                active: self.phase,
                requested: SyncPhase::Idle,
            });
        }
        self.phase = SyncPhase::Idle;
        self.completed_passes += 1;
        Ok(())
    }

    /// Returns to `Idle` after a pass failed midway.
    pub fn abort(&mut self) {
        self.phase = SyncPhase::Idle;
    }
}

/// Overview pixel range covered by the transformed view along one axis.
///
/// The overview spans the base range `[0, length_px]`; the result is clamped
/// to it and `None` when nothing of the view remains inside.
#[must_use]
pub fn selection_for_axis(transform: AxisTransform, length_px: f64) -> Option<(f64, f64)> {
    let a = transform.invert(0.0);
    let b = transform.invert(length_px);
    let low = a.min(b).clamp(0.0, length_px);
    let high = a.max(b).clamp(0.0, length_px);
    if high - low > 0.0 && low.is_finite() && high.is_finite() {
        Some((low, high))
    } else {
        None
    }
}

/// Axis transform that fits overview range `[start, end]` onto `[0, length_px]`.
pub fn axis_for_selection(start: f64, end: f64, length_px: f64) -> GanttResult<AxisTransform> {
    let low = start.min(end);
    let high = start.max(end);
    if !(high - low).is_finite() || high - low <= 0.0 {
        return Err(GanttError::InvalidData(
            "brush selection must have positive size".to_owned(),
        ));
    }
    let k = length_px / (high - low);
    AxisTransform::new(k, -low * k)
}

#[cfg(test)]
mod tests {
    use super::{SyncGuard, SyncPhase, axis_for_selection, selection_for_axis};
    use crate::error::GanttError;

    #[test]
    fn guard_refuses_nested_pass() {
        let mut guard = SyncGuard::default();
        guard.begin(SyncPhase::ApplyingGesture).expect("begin");
        let err = guard
            .begin(SyncPhase::ApplyingBrushTime)
            .expect_err("nested pass must fail");
        assert!(matches!(
            err,
            GanttError::SyncConflict {
                active: SyncPhase::ApplyingGesture,
                requested: SyncPhase::ApplyingBrushTime
            }
        ));
        guard.finish(SyncPhase::ApplyingGesture).expect("finish");
        assert!(guard.is_idle());
        assert_eq!(guard.completed_passes(), 1);
    }

    #[test]
    fn selection_and_axis_are_inverse() {
        let axis = axis_for_selection(120.0, 300.0, 900.0).expect("axis");
        let (start, end) = selection_for_axis(axis, 900.0).expect("selection");
        assert!((start - 120.0).abs() <= 1e-9);
        assert!((end - 300.0).abs() <= 1e-9);
    }
}
