use tracing::trace;

use crate::core::PixelPoint;
use crate::render::hybrid::{ItemLayer, LayerScene};
use crate::render::labels::scaled_font_size;
use crate::render::lod::RenderStrategy;
use crate::render::{RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

const LABEL_INSET_PX: f64 = 10.0;
const COMPANY_BASELINE_OFFSET_PX: f64 = 15.0;
const COMPANY_FONT_PX: f64 = 14.0;
const PRICE_FONT_PX: f64 = 20.0;
const AMOUNT_FONT_PX: f64 = 12.0;

/// Retained bar of one visible item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemShape {
    pub index: usize,
    pub bounds: RectPrimitive,
}

/// Full-detail layer: one rounded bar per item, anchored at its end boundary.
#[derive(Debug, Clone, Default)]
pub struct VectorLayer {
    visible: bool,
    shapes: Vec<ItemShape>,
}

impl VectorLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes produced by the last draw, in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[ItemShape] {
        &self.shapes
    }
}

impl ItemLayer for VectorLayer {
    fn strategy(&self) -> RenderStrategy {
        RenderStrategy::Vector
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
        self.shapes.clear();
        let k = scene.k;
        let bar_width = scene.geometry.scaled_bar_width(k);
        let bar_height = scene.geometry.bar_height;
        let company_font = scaled_font_size(COMPANY_FONT_PX, k);
        let price_font = scaled_font_size(PRICE_FONT_PX, k);
        let amount_font = scaled_font_size(AMOUNT_FONT_PX, k);

        for (index, item) in scene.visible.iter(scene.items) {
            let local = scene.projection.project(item);
            let anchor = PixelPoint::new(scene.plot.left + local.x, scene.plot.top + local.y);
            let left = anchor.x - bar_width;
            let top = anchor.y - bar_height / 2.0;
            let bottom = anchor.y + bar_height / 2.0;

            let bounds = RectPrimitive::new(left, top, bar_width, bar_height, scene.style.bar_fill)
                .with_border(
                    scene.style.bar_border_width,
                    scene.style.status.color_for(item.status),
                )
                .with_corner_radius(scene.geometry.corner_radius);
            frame.rects.push(bounds);

            let company = scene.formatter.company(item);
            if !company.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    company,
                    left + LABEL_INSET_PX,
                    top + COMPANY_BASELINE_OFFSET_PX - company_font,
                    company_font,
                    scene.style.text_color,
                    TextHAlign::Left,
                ));
            }

            if let Some(price) = scene.formatter.price(item) {
                frame.texts.push(
                    TextPrimitive::new(
                        price,
                        left + LABEL_INSET_PX,
                        bottom - LABEL_INSET_PX - price_font,
                        price_font,
                        scene.style.accent_text_color,
                        TextHAlign::Left,
                    )
                    .bold(),
                );
            }

            let amount = scene.formatter.amount(item);
            if !amount.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    amount,
                    anchor.x - LABEL_INSET_PX,
                    bottom - LABEL_INSET_PX - amount_font,
                    amount_font,
                    scene.style.axis_text_color,
                    TextHAlign::Right,
                ));
            }

            self.shapes.push(ItemShape { index, bounds });
        }

        trace!(shapes = self.shapes.len(), k, "vector layer drawn");
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Topmost shape under the pointer; later shapes overlay earlier ones.
    fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        if !self.visible {
            return None;
        }
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.bounds.contains(x, y))
            .map(|shape| shape.index)
    }
}
