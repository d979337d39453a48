mod frame;
mod hybrid;
mod labels;
mod lod;
mod null_renderer;
mod primitives;
mod raster_layer;
mod style;
mod vector_layer;

pub use frame::RenderFrame;
pub use hybrid::{HybridSurface, ItemLayer, LayerScene};
pub use labels::{
    DEFAULT_LABEL_MAX_CHARS, DefaultLabelFormatter, ItemLabelFormatter, LabelLocale,
    MIN_FONT_SIZE_PX, format_grouped_amount, scaled_font_size, truncate_label,
};
pub use lod::{
    DEFAULT_LOD_THRESHOLD, LodConfig, LodDecision, LodSelector, MAX_LOD_THRESHOLD,
    MIN_LOD_THRESHOLD, RenderStrategy, select_strategy,
};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, RectPrimitive, TextHAlign,
    TextPrimitive,
};
pub use raster_layer::{DOT_LABEL_MIN_ZOOM, RasterLayer};
pub use style::{ItemGeometry, StatusPalette, TimelineStyle};
pub use vector_layer::{ItemShape, VectorLayer};

use crate::error::GanttResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from timeline domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GanttResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
