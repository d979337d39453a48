use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::PixelPoint;
use crate::render::hybrid::{ItemLayer, LayerScene};
use crate::render::lod::RenderStrategy;
use crate::render::{CirclePrimitive, RenderFrame, TextHAlign, TextPrimitive};

/// Dot labels are drawn only above this zoom factor.
pub const DOT_LABEL_MIN_ZOOM: f64 = 0.7;
const DOT_LABEL_OFFSET_PX: f64 = 10.0;
const DOT_LABEL_FONT_PX: f64 = 9.0;
const DOT_STROKE_WIDTH_PX: f64 = 1.0;
const HIT_SLOP_PX: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PaintedDot {
    index: usize,
    cx: f64,
    cy: f64,
    radius: f64,
}

/// Simplified layer: the whole surface is cleared and every dot repainted on
/// each draw.
#[derive(Debug, Clone, Default)]
pub struct RasterLayer {
    visible: bool,
    dots: Vec<PaintedDot>,
    repaint_count: u64,
}

impl RasterLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full repaints since creation.
    #[must_use]
    pub fn repaint_count(&self) -> u64 {
        self.repaint_count
    }

    #[must_use]
    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }
}

impl ItemLayer for RasterLayer {
    fn strategy(&self) -> RenderStrategy {
        RenderStrategy::Raster
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    fn draw(&mut self, scene: &LayerScene<'_>, frame: &mut RenderFrame) {
        self.dots.clear();
        self.repaint_count += 1;
        let k = scene.k;
        let radius = scene.geometry.scaled_dot_radius(k);
        let with_labels = k > DOT_LABEL_MIN_ZOOM;

        for (index, item) in scene.visible.iter(scene.items) {
            let local = scene.projection.project(item);
            let anchor = PixelPoint::new(scene.plot.left + local.x, scene.plot.top + local.y);
            frame.circles.push(
                CirclePrimitive::new(
                    anchor.x,
                    anchor.y,
                    radius,
                    scene.style.status.color_for(item.status),
                )
                .with_stroke(DOT_STROKE_WIDTH_PX, scene.style.dot_stroke_color),
            );
            if with_labels {
                frame.texts.push(TextPrimitive::new(
                    scene.formatter.dot_date(item.end, k),
                    anchor.x,
                    anchor.y - DOT_LABEL_OFFSET_PX - DOT_LABEL_FONT_PX,
                    DOT_LABEL_FONT_PX,
                    scene.style.text_color,
                    TextHAlign::Center,
                ));
            }
            self.dots.push(PaintedDot {
                index,
                cx: anchor.x,
                cy: anchor.y,
                radius,
            });
        }

        trace!(
            dots = self.dots.len(),
            repaint = self.repaint_count,
            with_labels,
            "raster layer repainted"
        );
    }

    fn clear(&mut self) {
        self.dots.clear();
    }

    /// Nearest dot whose radius (plus a small slop) covers the pointer.
    fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        if !self.visible {
            return None;
        }
        self.dots
            .iter()
            .filter_map(|dot| {
                let distance = (dot.cx - x).hypot(dot.cy - y);
                (distance <= dot.radius + HIT_SLOP_PX).then_some((dot.index, distance))
            })
            .min_by_key(|(_, distance)| OrderedFloat(*distance))
            .map(|(index, _)| index)
    }
}
