use chrono::{Months, NaiveDate};
use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::core::item::{TimelineItem, VerticalPosition};
use crate::core::primitives::date_to_unix_seconds;

/// Span assumed for items without an explicit start.
pub const DEFAULT_ITEM_SPAN_MONTHS: u32 = 12;

/// Company → lane assignment in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyLanes {
    lanes: IndexMap<String, u32>,
}

impl CompanyLanes {
    #[must_use]
    pub fn from_items(items: &[TimelineItem]) -> Self {
        let mut lanes = IndexMap::new();
        for item in items {
            let next = lanes.len() as u32;
            lanes.entry(item.company.clone()).or_insert(next);
        }
        Self { lanes }
    }

    #[must_use]
    pub fn lane_of(&self, company: &str) -> Option<u32> {
        self.lanes.get(company).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn companies(&self) -> impl Iterator<Item = &str> {
        self.lanes.keys().map(String::as_str)
    }

    /// Rewrites every item position to its company lane.
    #[must_use]
    pub fn apply(&self, items: Vec<TimelineItem>) -> Vec<TimelineItem> {
        items
            .into_iter()
            .map(|item| {
                let lane = self.lane_of(&item.company).unwrap_or(0);
                item.with_position(VerticalPosition::Lane(lane))
            })
            .collect()
    }
}

/// Greedy interval packing: each interval goes to the first lane it does not
/// overlap, in start order. Returns one lane index per input interval.
#[must_use]
pub fn pack_intervals(intervals: &[(f64, f64)]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by_key(|&index| OrderedFloat(intervals[index].0));

    let mut lane_ends: Vec<f64> = Vec::new();
    let mut assigned = vec![0_u32; intervals.len()];
    for index in order {
        let (start, end) = intervals[index];
        let end = end.max(start);
        let lane = match lane_ends.iter().position(|&lane_end| start >= lane_end) {
            Some(lane) => {
                lane_ends[lane] = end;
                lane
            }
            None => {
                lane_ends.push(end);
                lane_ends.len() - 1
            }
        };
        assigned[index] = lane as u32;
    }
    assigned
}

/// Packs overlapping items into lanes and rewrites their positions.
#[must_use]
pub fn pack_item_lanes(items: Vec<TimelineItem>) -> Vec<TimelineItem> {
    let intervals: Vec<(f64, f64)> = items
        .iter()
        .map(|item| {
            let start = item.start.unwrap_or_else(|| default_start(item.end));
            (date_to_unix_seconds(start), item.end_seconds())
        })
        .collect();
    let lanes = pack_intervals(&intervals);

    items
        .into_iter()
        .zip(lanes)
        .map(|(item, lane)| item.with_position(VerticalPosition::Lane(lane)))
        .collect()
}

fn default_start(end: NaiveDate) -> NaiveDate {
    end.checked_sub_months(Months::new(DEFAULT_ITEM_SPAN_MONTHS))
        .unwrap_or(end)
}
