use tracing::debug;

use crate::error::{GanttError, GanttResult};
use crate::render::{DefaultLabelFormatter, HybridSurface, Renderer};

use super::{
    TimelineEngine, TimelineEngineConfig, TimelineSession,
    engine_core::{EngineCore, PointerState},
};

impl<R: Renderer> TimelineEngine<R> {
    /// Creates an engine with an empty item set.
    pub fn new(renderer: R, config: TimelineEngineConfig) -> GanttResult<Self> {
        if !config.viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: config.viewport.width,
                height: config.viewport.height,
            });
        }
        let config = config.validate()?;
        let session = TimelineSession::new(&config)?;
        let surface = HybridSurface::new(session.lod_strategy());

        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            locale = config.locale.tag(),
            today = %session.today(),
            "timeline engine created"
        );

        Ok(Self {
            renderer,
            core: EngineCore {
                formatter: Box::new(DefaultLabelFormatter::new(config.locale)),
                config,
                session,
                surface,
                observers: Vec::new(),
                markers: Vec::new(),
                pointer: PointerState::default(),
                scene_stale: false,
            },
        })
    }
}
