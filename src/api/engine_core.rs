use crate::core::ItemId;
use crate::extensions::{DateMarker, TimelineObserver};
use crate::render::{HybridSurface, ItemLabelFormatter};

use super::{TimelineEngineConfig, TimelineSession};

/// Surface region that captured the current pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PointerTarget {
    Plot,
    TimeTrack,
    ValueTrack,
}

#[derive(Debug, Clone, Default)]
pub(super) struct PointerState {
    pub(super) target: Option<PointerTarget>,
    pub(super) hovered: Option<usize>,
    pub(super) selected: Option<ItemId>,
}

/// Internal engine core state used by the public facade (`TimelineEngine`).
pub(super) struct EngineCore {
    pub(super) config: TimelineEngineConfig,
    pub(super) session: TimelineSession,
    pub(super) surface: HybridSurface,
    pub(super) formatter: Box<dyn ItemLabelFormatter>,
    pub(super) observers: Vec<Box<dyn TimelineObserver>>,
    pub(super) markers: Vec<DateMarker>,
    pub(super) pointer: PointerState,
    /// Set when the view moved after the last frame; retained shapes are
    /// then at pre-change positions and must not be hit-tested.
    pub(super) scene_stale: bool,
}
