use tracing::debug;

use crate::core::{ItemSet, PlotArea, ViewProjection, VisibleSet};
use crate::render::labels::ItemLabelFormatter;
use crate::render::lod::RenderStrategy;
use crate::render::raster_layer::RasterLayer;
use crate::render::style::{ItemGeometry, TimelineStyle};
use crate::render::vector_layer::VectorLayer;
use crate::render::RenderFrame;

/// Everything a layer needs for one draw pass.
pub struct LayerScene<'a> {
    pub items: &'a ItemSet,
    pub visible: &'a VisibleSet,
    pub projection: &'a ViewProjection,
    /// Surface placement of the plot; shapes are emitted in surface pixels.
    pub plot: PlotArea,
    /// Time-axis zoom factor.
    pub k: f64,
    pub geometry: ItemGeometry,
    pub style: &'a TimelineStyle,
    pub formatter: &'a dyn ItemLabelFormatter,
}

/// Drawing strategy for the visible items.
pub trait ItemLayer {
    fn strategy(&self) -> RenderStrategy;

    fn is_visible(&self) -> bool;

    /// Returns `true` when the visibility actually changed.
    fn set_visible(&mut self, visible: bool) -> bool;

    fn draw(&mut self, scene: &LayerScene<'_>, frame: &mut RenderFrame);

    /// Drops retained shapes; the next hit test finds nothing until a draw.
    fn clear(&mut self);

    /// Index of the item under surface point `(x, y)`, if any.
    fn hit_test(&self, x: f64, y: f64) -> Option<usize>;
}

/// Owns both layers and routes draw calls to the active one.
///
/// The inactive layer is hidden and keeps its state.
#[derive(Debug, Clone)]
pub struct HybridSurface {
    vector: VectorLayer,
    raster: RasterLayer,
    active: RenderStrategy,
    surface_mutations: u64,
}

impl HybridSurface {
    #[must_use]
    pub fn new(initial: RenderStrategy) -> Self {
        let mut surface = Self {
            vector: VectorLayer::new(),
            raster: RasterLayer::new(),
            active: initial,
            surface_mutations: 0,
        };
        surface.vector.set_visible(initial == RenderStrategy::Vector);
        surface.raster.set_visible(initial == RenderStrategy::Raster);
        surface
    }

    #[must_use]
    pub fn active(&self) -> RenderStrategy {
        self.active
    }

    /// Visibility toggles applied since creation.
    #[must_use]
    pub fn surface_mutations(&self) -> u64 {
        self.surface_mutations
    }

    #[must_use]
    pub fn vector(&self) -> &VectorLayer {
        &self.vector
    }

    #[must_use]
    pub fn raster(&self) -> &RasterLayer {
        &self.raster
    }

    /// Shows the layer for `strategy` and hides the other one.
    ///
    /// Returns the number of visibility changes made; zero when `strategy`
    /// is already active.
    pub fn activate(&mut self, strategy: RenderStrategy) -> u64 {
        if strategy == self.active {
            return 0;
        }
        let mut mutations = 0;
        if self.vector.set_visible(strategy == RenderStrategy::Vector) {
            mutations += 1;
        }
        if self.raster.set_visible(strategy == RenderStrategy::Raster) {
            mutations += 1;
        }
        debug!(from = ?self.active, to = ?strategy, mutations, "active item layer changed");
        self.active = strategy;
        self.surface_mutations += mutations;
        mutations
    }

    pub fn draw(&mut self, scene: &LayerScene<'_>, frame: &mut RenderFrame) {
        self.active_layer_mut().draw(scene, frame);
    }

    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.active_layer().hit_test(x, y)
    }

    /// Clears both layers, e.g. after the item set was replaced.
    pub fn clear(&mut self) {
        self.vector.clear();
        self.raster.clear();
    }

    #[must_use]
    pub fn active_layer(&self) -> &dyn ItemLayer {
        match self.active {
            RenderStrategy::Vector => &self.vector,
            RenderStrategy::Raster => &self.raster,
        }
    }

    fn active_layer_mut(&mut self) -> &mut dyn ItemLayer {
        match self.active {
            RenderStrategy::Vector => &mut self.vector,
            RenderStrategy::Raster => &mut self.raster,
        }
    }
}
