mod brush;
mod gesture;
mod sync;

use serde::{Deserialize, Serialize};

pub use brush::{
    BrushAxis, BrushEvent, DEFAULT_HANDLE_TOLERANCE_PX, DEFAULT_MIN_SELECTION_PX,
    OverviewSelector,
};
pub use gesture::{GestureController, WheelDeltaMode};
pub use sync::{SyncGuard, SyncPhase, axis_for_selection, selection_for_axis};

/// Pointer state of the plot gesture controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}
