use crate::core::item::{ItemSet, TimelineItem};
use crate::core::time_scale::TimeScale;
use crate::core::types::PixelPoint;
use crate::core::value_scale::ValueScale;

/// Rescaled scales for one view plus the plot size they map onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    pub time: TimeScale,
    pub value: ValueScale,
    /// Base value domain; lane positions resolve against it.
    pub value_domain: (f64, f64),
    pub lane_count: u32,
    pub width_px: f64,
    pub height_px: f64,
}

impl ViewProjection {
    /// Pixel anchor of an item: x at its end boundary, y at its position.
    #[must_use]
    pub fn project(&self, item: &TimelineItem) -> PixelPoint {
        let value = item.position.to_value(self.value_domain, self.lane_count);
        PixelPoint::new(
            self.time.apply_seconds(item.end_seconds()),
            self.value.apply(value),
        )
    }

    #[must_use]
    pub fn project_index(&self, items: &ItemSet, index: usize) -> Option<PixelPoint> {
        items.get(index).map(|item| self.project(item))
    }

    /// Whether a pixel point lies inside the unbuffered plot area.
    #[must_use]
    pub fn contains(&self, point: PixelPoint) -> bool {
        point.is_finite()
            && point.x >= 0.0
            && point.x <= self.width_px
            && point.y >= 0.0
            && point.y <= self.height_px
    }
}
