use serde::{Deserialize, Serialize};

use crate::core::{ItemId, PixelPoint, TimelineItem, ViewportExtent};

/// Pointer hover transitions over item shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HoverEvent {
    Enter {
        item: ItemId,
        index: usize,
        position: PixelPoint,
    },
    Move {
        item: ItemId,
        index: usize,
        position: PixelPoint,
    },
    Leave {
        item: ItemId,
        index: usize,
    },
}

impl HoverEvent {
    #[must_use]
    pub fn item(&self) -> &ItemId {
        match self {
            Self::Enter { item, .. } | Self::Move { item, .. } | Self::Leave { item, .. } => item,
        }
    }
}

/// Host callbacks for hover, selection and viewport changes.
///
/// Every hook has an empty default so observers implement only what they use.
pub trait TimelineObserver {
    fn id(&self) -> &str;

    fn on_item_hover(&mut self, _event: &HoverEvent) {}

    fn on_item_select(&mut self, _item: &TimelineItem) {}

    fn on_viewport_change(&mut self, _extent: ViewportExtent) {}
}
