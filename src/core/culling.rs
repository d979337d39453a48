use serde::{Deserialize, Serialize};
use tracing::trace;

#[cfg(feature = "parallel-culling")]
use rayon::prelude::*;

use crate::core::item::{ItemSet, TimelineItem};
use crate::core::projection::ViewProjection;
use crate::error::{GanttError, GanttResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CullingConfig {
    /// Buffer beyond the visible area, in item heights.
    pub buffer_items: u32,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self { buffer_items: 10 }
    }
}

impl CullingConfig {
    pub fn validate(self) -> GanttResult<Self> {
        if self.buffer_items == 0 {
            return Err(GanttError::InvalidData(
                "culling buffer must be at least one item".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Ordered indices of items intersecting the buffered viewport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleSet {
    indices: Vec<usize>,
}

impl VisibleSet {
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    pub fn iter<'a>(&'a self, items: &'a ItemSet) -> impl Iterator<Item = (usize, &'a TimelineItem)> {
        self.indices
            .iter()
            .filter_map(move |&index| items.get(index).map(|item| (index, item)))
    }
}

/// Single linear scan over the item set against the buffered plot extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityCuller {
    config: CullingConfig,
    item_height_px: f64,
}

impl VisibilityCuller {
    pub fn new(config: CullingConfig, item_height_px: f64) -> GanttResult<Self> {
        let config = config.validate()?;
        if !item_height_px.is_finite() || item_height_px <= 0.0 {
            return Err(GanttError::InvalidData(
                "culling item height must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            config,
            item_height_px,
        })
    }

    #[must_use]
    pub fn buffer_px(self) -> f64 {
        f64::from(self.config.buffer_items) * self.item_height_px
    }

    /// Items whose bar `[x - bar_width, x]` and y anchor fall inside the
    /// viewport grown by the buffer on every side.
    #[must_use]
    pub fn cull(self, items: &ItemSet, projection: &ViewProjection, bar_width_px: f64) -> VisibleSet {
        let buffer = self.buffer_px();
        let bar_width = if bar_width_px.is_finite() { bar_width_px.max(0.0) } else { 0.0 };
        let left = -buffer;
        let right = projection.width_px + buffer;
        let top = -buffer;
        let bottom = projection.height_px + buffer;

        let is_visible = |item: &TimelineItem| {
            let anchor = projection.project(item);
            if !anchor.is_finite() {
                return false;
            }
            let intersects_x = anchor.x >= left && anchor.x - bar_width <= right;
            let intersects_y = anchor.y >= top && anchor.y <= bottom;
            intersects_x && intersects_y
        };

        #[cfg(feature = "parallel-culling")]
        let indices: Vec<usize> = items
            .items()
            .par_iter()
            .enumerate()
            .filter(|(_, item)| is_visible(item))
            .map(|(index, _)| index)
            .collect();

        #[cfg(not(feature = "parallel-culling"))]
        let indices: Vec<usize> = items
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| is_visible(item))
            .map(|(index, _)| index)
            .collect();

        trace!(
            total = items.len(),
            visible = indices.len(),
            buffer_px = buffer,
            "culled timeline items"
        );
        VisibleSet { indices }
    }
}
