use tracing::trace;

use crate::error::GanttResult;
use crate::extensions::{marker_primitives, today_marker};
use crate::render::{LayerScene, RenderFrame, Renderer, TextHAlign, TextPrimitive};

use super::TimelineEngine;
use super::axis_frame_builder::{AxisFrameInput, build_axis_frame, build_overview_frame};
use super::engine_core::EngineCore;
use super::time_axis_labels::TimeAxisLabeler;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

const NO_DATA_FONT_PX: f64 = 16.0;

pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    pub(super) fn render<R: Renderer>(engine: &mut TimelineEngine<R>) -> GanttResult<()> {
        let frame = build_render_frame(&mut engine.core)?;
        engine.renderer.render(&frame)?;
        trace!(
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            circles = frame.circles.len(),
            texts = frame.texts.len(),
            "timeline frame rendered"
        );
        Ok(())
    }

    #[cfg(feature = "cairo-backend")]
    pub(super) fn render_on_cairo_context<R: Renderer + CairoContextRenderer>(
        engine: &mut TimelineEngine<R>,
        context: &cairo::Context,
    ) -> GanttResult<()> {
        let frame = build_render_frame(&mut engine.core)?;
        engine.renderer.render_on_cairo_context(context, &frame)
    }
}

/// Materializes the complete frame for the current session state.
///
/// An empty item set yields a frame holding only the "no data" message.
pub(super) fn build_render_frame(core: &mut EngineCore) -> GanttResult<RenderFrame> {
    let session = &core.session;
    let layout = session.layout();
    let style = &core.config.style;

    if session.items().is_empty() {
        let plot = layout.plot;
        let frame = RenderFrame::new(layout.viewport).with_text(TextPrimitive::new(
            core.config.locale.no_data_label(),
            plot.left + plot.width / 2.0,
            plot.top + (plot.height - NO_DATA_FONT_PX) / 2.0,
            NO_DATA_FONT_PX,
            style.axis_text_color,
            TextHAlign::Center,
        ));
        core.scene_stale = false;
        return Ok(frame);
    }

    let projection = session.projection()?;
    let k = session.transform().k;
    let mut frame = build_axis_frame(&AxisFrameInput {
        layout,
        time: projection.time,
        value: projection.value,
        granularity: session.granularity(),
        k,
        labeler: TimeAxisLabeler::new(core.config.locale),
        style,
    })?;

    let mut markers = Vec::with_capacity(core.markers.len() + 1);
    if core.config.show_today_marker {
        markers.push(today_marker(session.today(), core.config.locale, style));
    }
    markers.extend(core.markers.iter().cloned());
    let (marker_lines, marker_texts) =
        marker_primitives(&markers, projection.time, layout.plot, style);
    frame.lines.extend(marker_lines);
    frame.texts.extend(marker_texts);

    core.surface.activate(session.lod_strategy());
    let scene = LayerScene {
        items: session.items(),
        visible: session.visible(),
        projection: &projection,
        plot: layout.plot,
        k,
        geometry: session.geometry(),
        style,
        formatter: core.formatter.as_ref(),
    };
    core.surface.draw(&scene, &mut frame);

    frame.extend(build_overview_frame(
        layout,
        session.base_time(),
        session.time_brush(),
        session.value_brush(),
        style,
    ));
    core.scene_stale = false;
    Ok(frame)
}
