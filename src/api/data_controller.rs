use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    CompanyLanes, ItemSet, LicenseRecord, RecordIngestOptions, TimelineItem, pack_item_lanes,
};
use crate::error::GanttResult;
use crate::render::Renderer;

use super::TimelineEngine;

/// How item positions are rewritten before a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaneMode {
    /// Positions are used as given.
    #[default]
    Keep,
    /// One lane per company in first-seen order.
    ByCompany,
    /// Overlapping items are packed greedily into lanes.
    Packed,
}

impl<R: Renderer> TimelineEngine<R> {
    /// Replaces the item set and resets the view.
    pub fn set_items(&mut self, items: Vec<TimelineItem>) -> GanttResult<()> {
        self.set_items_with_lanes(items, LaneMode::Keep)
    }

    pub fn set_items_with_lanes(
        &mut self,
        items: Vec<TimelineItem>,
        lane_mode: LaneMode,
    ) -> GanttResult<()> {
        let original_count = items.len();
        let items = match lane_mode {
            LaneMode::Keep => items,
            LaneMode::ByCompany => CompanyLanes::from_items(&items).apply(items),
            LaneMode::Packed => pack_item_lanes(items),
        };
        let items = ItemSet::new(items);
        debug!(
            original_count,
            kept_count = items.len(),
            lane_mode = ?lane_mode,
            "set timeline items"
        );
        self.load(items)
    }

    /// Converts raw records (string dates) and loads them.
    ///
    /// Status is derived against the session's "today"; records with
    /// unparsable dates are skipped.
    pub fn set_records(&mut self, records: Vec<LicenseRecord>) -> GanttResult<()> {
        let original_count = records.len();
        let items = ItemSet::from_records(
            records,
            RecordIngestOptions {
                today: self.core.session.today(),
                warning_threshold_days: self.core.config.warning_threshold_days,
                value_domain: self.core.config.value_domain,
            },
        );
        debug!(
            original_count,
            kept_count = items.len(),
            "set license records"
        );
        self.load(items)
    }

    pub fn clear_items(&mut self) -> GanttResult<()> {
        self.load(ItemSet::default())
    }

    fn load(&mut self, items: ItemSet) -> GanttResult<()> {
        self.clear_hover();
        self.core.pointer.target = None;
        self.core.pointer.selected = None;
        self.core.session.replace_items(items)?;
        self.core.surface.clear();
        self.after_view_change()
    }
}
