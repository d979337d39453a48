use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::primitives::{date_to_unix_seconds, parse_calendar_date};
use crate::error::{GanttError, GanttResult};

pub const DEFAULT_WARNING_THRESHOLD_DAYS: i64 = 30;

/// Stable item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Active,
    Renewal,
    Expired,
}

impl ItemStatus {
    /// `Expired` before `today`, `Renewal` within the warning window, else `Active`.
    #[must_use]
    pub fn derive(end: NaiveDate, today: NaiveDate, warning_threshold_days: i64) -> Self {
        if end < today {
            return Self::Expired;
        }
        if (end - today).num_days() < warning_threshold_days {
            return Self::Renewal;
        }
        Self::Active
    }
}

/// Vertical placement of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalPosition {
    /// Position on the value axis.
    Continuous(f64),
    /// Discrete lane, 0 at the top.
    Lane(u32),
}

impl VerticalPosition {
    /// Resolves the position to a value-axis coordinate.
    ///
    /// Lanes split `[low, high]` into `lane_count` equal bands, top first.
    #[must_use]
    pub fn to_value(self, value_domain: (f64, f64), lane_count: u32) -> f64 {
        match self {
            Self::Continuous(value) => value,
            Self::Lane(lane) => {
                let (low, high) = value_domain;
                let band = (high - low) / f64::from(lane_count.max(1));
                high - (f64::from(lane) + 0.5) * band
            }
        }
    }
}

/// One time-bounded record plotted on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: ItemId,
    pub title: String,
    pub company: String,
    pub end: NaiveDate,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    pub position: VerticalPosition,
    pub status: ItemStatus,
    #[serde(default)]
    pub amount: u32,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub total_price: Option<Decimal>,
}

impl TimelineItem {
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        company: impl Into<String>,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: company.into(),
            end,
            start: None,
            position: VerticalPosition::Continuous(0.0),
            status: ItemStatus::Active,
            amount: 0,
            unit_price: None,
            total_price: None,
        }
    }

    #[must_use]
    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: VerticalPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn with_prices(mut self, unit_price: Option<Decimal>, total_price: Option<Decimal>) -> Self {
        self.unit_price = unit_price;
        self.total_price = total_price;
        self
    }

    /// Label used for ordering and display.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.company
    }

    #[must_use]
    pub fn end_seconds(&self) -> f64 {
        date_to_unix_seconds(self.end)
    }

    pub fn validate(&self) -> GanttResult<()> {
        if self.id.as_str().is_empty() {
            return Err(GanttError::InvalidData("item id must not be empty".to_owned()));
        }
        if let VerticalPosition::Continuous(value) = self.position {
            if !value.is_finite() {
                return Err(GanttError::InvalidData(format!(
                    "item `{}` position must be finite",
                    self.id
                )));
            }
        }
        if let Some(start) = self.start {
            if start > self.end {
                return Err(GanttError::InvalidData(format!(
                    "item `{}` starts after it ends",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// Raw license record as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub title: String,
    pub company: String,
    /// Expiration date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub amount: u32,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub position: Option<f64>,
}

impl LicenseRecord {
    #[must_use]
    pub fn new(title: impl Into<String>, company: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            date: date.into(),
            amount: 0,
            unit_price: None,
            total_price: None,
            position: None,
        }
    }

    #[must_use]
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: f64) -> Self {
        self.position = Some(position);
        self
    }
}

/// Options applied while converting raw records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordIngestOptions {
    pub today: NaiveDate,
    pub warning_threshold_days: i64,
    /// Value domain used to spread records without an explicit position.
    pub value_domain: (f64, f64),
}

/// Immutable, ordered item collection for one data load.
///
/// Items are sorted by end date, then label. Invalid items are dropped on
/// construction and never reach the viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSet {
    items: Vec<TimelineItem>,
    lane_count: u32,
}

impl ItemSet {
    #[must_use]
    pub fn new(items: Vec<TimelineItem>) -> Self {
        let original_count = items.len();
        let mut items: Vec<TimelineItem> = items
            .into_iter()
            .filter(|item| match item.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!(item_id = %item.id, error = %err, "excluding invalid timeline item");
                    false
                }
            })
            .collect();
        items.sort_by(|left, right| {
            left.end
                .cmp(&right.end)
                .then_with(|| left.label().cmp(right.label()))
        });

        let lane_count = items
            .iter()
            .filter_map(|item| match item.position {
                VerticalPosition::Lane(lane) => Some(lane + 1),
                VerticalPosition::Continuous(_) => None,
            })
            .max()
            .unwrap_or(0);

        debug!(
            original_count,
            kept_count = items.len(),
            lane_count,
            "built timeline item set"
        );
        Self { items, lane_count }
    }

    /// Converts raw records, skipping unparsable dates.
    ///
    /// Ids are `license-{index}` over the input order. Records without an
    /// explicit position are spread evenly over the inner 80% of the value
    /// domain in end-date order.
    #[must_use]
    pub fn from_records(records: Vec<LicenseRecord>, options: RecordIngestOptions) -> Self {
        let mut parsed: Vec<(usize, NaiveDate, LicenseRecord)> = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match parse_calendar_date(&record.date) {
                Some(end) => parsed.push((index, end, record)),
                None => {
                    warn!(
                        index,
                        date = %record.date,
                        company = %record.company,
                        "skipping record with invalid date"
                    );
                }
            }
        }
        parsed.sort_by(|left, right| {
            left.1
                .cmp(&right.1)
                .then_with(|| left.2.company.cmp(&right.2.company))
        });

        let (low, high) = options.value_domain;
        let span = high - low;
        let last = parsed.len().saturating_sub(1).max(1) as f64;
        let items = parsed
            .into_iter()
            .enumerate()
            .map(|(rank, (index, end, record))| {
                let position = record
                    .position
                    .unwrap_or_else(|| low + span * (0.1 + 0.8 * rank as f64 / last));
                TimelineItem::new(format!("license-{index}"), record.title, record.company, end)
                    .with_position(VerticalPosition::Continuous(position))
                    .with_status(ItemStatus::derive(
                        end,
                        options.today,
                        options.warning_threshold_days,
                    ))
                    .with_amount(record.amount)
                    .with_prices(record.unit_price, record.total_price)
            })
            .collect();

        Self::new(items)
    }

    #[must_use]
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TimelineItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn lane_count(&self) -> u32 {
        self.lane_count
    }

    #[must_use]
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// `(min, max)` of end dates in unix seconds, `None` when empty.
    #[must_use]
    pub fn end_extent_seconds(&self) -> Option<(f64, f64)> {
        let first = self.items.first()?;
        let last = self.items.last()?;
        Some((first.end_seconds(), last.end_seconds()))
    }

    /// Value-axis coordinate of the item at `index`.
    #[must_use]
    pub fn value_of(&self, index: usize, value_domain: (f64, f64)) -> Option<f64> {
        self.items
            .get(index)
            .map(|item| item.position.to_value(value_domain, self.lane_count))
    }
}
