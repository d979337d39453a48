use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::core::primitives::date_to_unix_seconds;
use crate::core::{
    AxisTransform, GranularityLevel, ItemSet, TimeScale, TimeScaleTuning, TransformOrigin,
    TransformState, ValueScale, ViewProjection, Viewport, ViewportExtent, VisibilityCuller,
    VisibleSet, ZoomBounds, resolve_granularity,
};
use crate::error::GanttResult;
use crate::interaction::{
    BrushAxis, GestureController, OverviewSelector, SyncGuard, SyncPhase, axis_for_selection,
};
use crate::render::{ItemGeometry, LodDecision, LodSelector, RenderStrategy};

use super::{InitialView, TimelineEngineConfig, TimelineLayout};

/// Owner of the single mutable `TransformState` and everything derived from it.
///
/// Every viewport change goes through one guarded synchronization pass
/// (see `sync_coordinator`), after which the visible set, granularity and
/// level of detail are recomputed.
#[derive(Debug, Clone)]
pub struct TimelineSession {
    pub(super) layout: TimelineLayout,
    pub(super) bounds: ZoomBounds,
    pub(super) tuning: TimeScaleTuning,
    pub(super) value_domain: (f64, f64),
    pub(super) today: NaiveDate,
    pub(super) initial_view: InitialView,
    pub(super) geometry: ItemGeometry,
    pub(super) items: ItemSet,
    pub(super) base_time: TimeScale,
    pub(super) base_value: ValueScale,
    pub(super) transform: TransformState,
    pub(super) gesture: GestureController,
    pub(super) time_brush: OverviewSelector,
    pub(super) value_brush: OverviewSelector,
    pub(super) guard: SyncGuard,
    pub(super) culler: VisibilityCuller,
    pub(super) lod: LodSelector,
    pub(super) last_lod: LodDecision,
    pub(super) visible: VisibleSet,
    pub(super) granularity: GranularityLevel,
}

impl TimelineSession {
    /// Builds an empty session for a validated config.
    pub fn new(config: &TimelineEngineConfig) -> GanttResult<Self> {
        let config = config.validate()?;
        let layout = TimelineLayout::compute(config.viewport, config.margins, config.overview)?;
        let today = config.today.unwrap_or_else(|| Utc::now().date_naive());
        let items = ItemSet::default();
        let base_time = fit_time_scale(&items, today, layout.plot.width, config.time_tuning)?;
        let base_value = ValueScale::new(
            config.value_domain.0,
            config.value_domain.1,
            layout.plot.height,
        )?;
        let transform = TransformState::identity(config.zoom_bounds);
        let lod = LodSelector::new(config.lod, transform.k)?;

        let mut session = Self {
            layout,
            bounds: config.zoom_bounds,
            tuning: config.time_tuning,
            value_domain: base_value.domain(),
            today,
            initial_view: config.initial_view,
            geometry: config.geometry,
            items,
            base_time,
            base_value,
            transform,
            gesture: GestureController::new(config.zoom_bounds)?,
            time_brush: OverviewSelector::new(BrushAxis::Time, layout.plot.width)?,
            value_brush: OverviewSelector::new(BrushAxis::Value, layout.plot.height)?,
            guard: SyncGuard::default(),
            culler: VisibilityCuller::new(config.culling, config.geometry.bar_height)?,
            lod,
            last_lod: LodDecision {
                strategy: lod.current(),
                changed: false,
            },
            visible: VisibleSet::default(),
            granularity: GranularityLevel::Year,
        };
        session.apply_initial_view()?;
        Ok(session)
    }

    /// Replaces the item set wholesale and resets the view.
    pub fn replace_items(&mut self, items: ItemSet) -> GanttResult<()> {
        let base_time = fit_time_scale(&items, self.today, self.layout.plot.width, self.tuning)?;
        debug!(
            item_count = items.len(),
            lane_count = items.lane_count(),
            "replace timeline items"
        );
        self.items = items;
        self.base_time = base_time;
        self.gesture.reset();
        self.time_brush.clear();
        self.value_brush.clear();
        self.apply_initial_view()
    }

    /// Applies the configured initial view as a programmatic change.
    pub fn apply_initial_view(&mut self) -> GanttResult<()> {
        let time = match self.initial_view {
            InitialView::Full => AxisTransform::IDENTITY,
            InitialView::Window {
                start_ratio,
                end_ratio,
            } => {
                let width = self.layout.plot.width;
                axis_for_selection(start_ratio * width, end_ratio * width, width)?
            }
        };
        self.apply_programmatic(time, AxisTransform::IDENTITY)
    }

    /// Re-derives scales for a new surface size, keeping the visible domain.
    pub fn resize(&mut self, viewport: Viewport, layout: TimelineLayout) -> GanttResult<()> {
        let projection = self.projection()?;
        let (time_start, time_end) = projection.time.domain_seconds();
        let (value_low, value_high) = projection.value.domain();

        let base_time = self.base_time.with_width(layout.plot.width)?;
        let base_value = self.base_value.with_height(layout.plot.height)?;
        let time = base_time.transform_for_domain(time_start, time_end)?;
        let value = base_value.transform_for_domain(value_low, value_high)?;

        self.time_brush.set_length(layout.plot.width)?;
        self.value_brush.set_length(layout.plot.height)?;
        self.layout = layout;
        self.base_time = base_time;
        self.base_value = base_value;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "timeline surface resized"
        );
        self.apply_programmatic(time, value)
    }

    pub(super) fn refresh_derived(&mut self) -> GanttResult<()> {
        let projection = self.projection()?;
        let (start, end) = projection.time.domain()?;
        self.granularity = resolve_granularity(start, end);
        let bar_width = self.geometry.scaled_bar_width(self.transform.k);
        self.visible = self.culler.cull(&self.items, &projection, bar_width);
        self.last_lod = self.lod.update(self.transform.k);
        Ok(())
    }

    /// Scales rescaled by the current transform, in plot-local pixels.
    pub fn projection(&self) -> GanttResult<ViewProjection> {
        Ok(ViewProjection {
            time: self.base_time.rescale(self.transform.time)?,
            value: self.base_value.rescale(self.transform.value)?,
            value_domain: self.value_domain,
            lane_count: self.items.lane_count(),
            width_px: self.layout.plot.width,
            height_px: self.layout.plot.height,
        })
    }

    /// Currently visible time/value window.
    pub fn extent(&self) -> GanttResult<ViewportExtent> {
        let projection = self.projection()?;
        let (time_start, time_end) = projection.time.domain()?;
        let (value_start, value_end) = projection.value.domain();
        Ok(ViewportExtent {
            time_start,
            time_end,
            value_start,
            value_end,
            width: self.layout.plot.width.round() as u32,
            height: self.layout.plot.height.round() as u32,
        })
    }

    #[must_use]
    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    #[must_use]
    pub fn layout(&self) -> TimelineLayout {
        self.layout
    }

    #[must_use]
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    #[must_use]
    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    #[must_use]
    pub fn granularity(&self) -> GranularityLevel {
        self.granularity
    }

    #[must_use]
    pub fn lod_strategy(&self) -> RenderStrategy {
        self.lod.current()
    }

    /// Decision made by the most recent pass.
    #[must_use]
    pub fn last_lod_decision(&self) -> LodDecision {
        self.last_lod
    }

    #[must_use]
    pub fn sync_phase(&self) -> SyncPhase {
        self.guard.phase()
    }

    #[must_use]
    pub fn dropped_echoes(&self) -> u64 {
        self.guard.dropped_echoes()
    }

    #[must_use]
    pub fn completed_passes(&self) -> u64 {
        self.guard.completed_passes()
    }

    #[must_use]
    pub fn time_brush(&self) -> &OverviewSelector {
        &self.time_brush
    }

    #[must_use]
    pub fn value_brush(&self) -> &OverviewSelector {
        &self.value_brush
    }

    #[must_use]
    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    /// Unzoomed time scale; the time selector draws over it.
    #[must_use]
    pub fn base_time(&self) -> TimeScale {
        self.base_time
    }

    #[must_use]
    pub fn base_value(&self) -> ValueScale {
        self.base_value
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn geometry(&self) -> ItemGeometry {
        self.geometry
    }

    #[must_use]
    pub fn zoom_bounds(&self) -> ZoomBounds {
        self.bounds
    }

    pub(super) fn programmatic_state(
        &self,
        time: AxisTransform,
        value: AxisTransform,
    ) -> TransformState {
        TransformState::from_axes(time, value, TransformOrigin::Programmatic, self.bounds)
    }
}

/// Base time scale over item end dates; an empty set centres on `today`.
fn fit_time_scale(
    items: &ItemSet,
    today: NaiveDate,
    width_px: f64,
    tuning: TimeScaleTuning,
) -> GanttResult<TimeScale> {
    match items.end_extent_seconds() {
        Some((start, end)) => TimeScale::from_seconds(start, end, width_px, tuning),
        None => {
            let today = date_to_unix_seconds(today);
            TimeScale::from_seconds(today, today, width_px, tuning)
        }
    }
}
