use crate::error::GanttResult;
use crate::render::Renderer;

use super::{engine_core::EngineCore, render_coordinator::RenderCoordinator};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the item set, the single view transform with its
/// synchronized overview selectors, the hybrid item surface and renderer
/// calls.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> TimelineEngine<R> {
    pub fn render(&mut self) -> GanttResult<()> {
        RenderCoordinator::render(self)
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> GanttResult<()>
    where
        R: CairoContextRenderer,
    {
        RenderCoordinator::render_on_cairo_context(self, context)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
