use crate::core::{
    GranularityLevel, ItemSet, TimelineItem, TransformState, Viewport, ViewportExtent,
};
use crate::error::GanttResult;
use crate::interaction::SyncPhase;
use crate::render::{HybridSurface, ItemLabelFormatter, RenderStrategy, Renderer};

use super::{TimelineEngine, TimelineEngineConfig, TimelineLayout, TimelineSession};

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn config(&self) -> &TimelineEngineConfig {
        &self.core.config
    }

    #[must_use]
    pub fn session(&self) -> &TimelineSession {
        &self.core.session
    }

    #[must_use]
    pub fn surface(&self) -> &HybridSurface {
        &self.core.surface
    }

    #[must_use]
    pub fn items(&self) -> &ItemSet {
        self.core.session.items()
    }

    /// Visible items in end-date order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&TimelineItem> {
        let session = &self.core.session;
        session
            .visible()
            .iter(session.items())
            .map(|(_, item)| item)
            .collect()
    }

    #[must_use]
    pub fn granularity(&self) -> GranularityLevel {
        self.core.session.granularity()
    }

    /// Strategy chosen by the LOD selector for the current zoom.
    #[must_use]
    pub fn lod(&self) -> RenderStrategy {
        self.core.session.lod_strategy()
    }

    /// Layer currently receiving draw calls.
    #[must_use]
    pub fn active_layer(&self) -> RenderStrategy {
        self.core.surface.active()
    }

    #[must_use]
    pub fn transform_state(&self) -> TransformState {
        self.core.session.transform()
    }

    pub fn viewport_extent(&self) -> GanttResult<ViewportExtent> {
        self.core.session.extent()
    }

    #[must_use]
    pub fn sync_phase(&self) -> SyncPhase {
        self.core.session.sync_phase()
    }

    #[must_use]
    pub fn dropped_echoes(&self) -> u64 {
        self.core.session.dropped_echoes()
    }

    #[must_use]
    pub fn layout(&self) -> TimelineLayout {
        self.core.session.layout()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.session.layout().viewport
    }

    /// Resizes the drawing surface, keeping the visible domain, and re-renders.
    pub fn resize(&mut self, width: u32, height: u32) -> GanttResult<()> {
        self.set_viewport(Viewport::new(width, height))?;
        self.render()
    }

    /// Re-derives layout and scales for a new surface size without drawing.
    pub fn set_viewport(&mut self, viewport: Viewport) -> GanttResult<()> {
        let layout = TimelineLayout::compute(
            viewport,
            self.core.config.margins,
            self.core.config.overview,
        )?;
        self.core.session.resize(viewport, layout)?;
        self.core.config.viewport = viewport;
        self.after_view_change()
    }

    /// Replaces the item label formatter used by the vector layer.
    pub fn set_label_formatter(&mut self, formatter: Box<dyn ItemLabelFormatter>) {
        self.core.formatter = formatter;
    }
}
