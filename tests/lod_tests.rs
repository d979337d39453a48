use chrono::{NaiveDate, TimeDelta};
use gantt_rs::api::{TimelineEngine, TimelineEngineConfig};
use gantt_rs::core::{TimelineItem, VerticalPosition, Viewport};
use gantt_rs::interaction::WheelDeltaMode;
use gantt_rs::render::{
    DEFAULT_LOD_THRESHOLD, ItemLayer, LodConfig, LodSelector, NullRenderer, RenderStrategy,
    select_strategy,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn engine_with_items(config: TimelineEngineConfig) -> TimelineEngine<NullRenderer> {
    let first = date(2023, 1, 1);
    let items = (0..50)
        .map(|index| {
            TimelineItem::new(
                format!("item-{index}"),
                format!("License {index}"),
                "Acme",
                first + TimeDelta::days(index * 29),
            )
            .with_position(VerticalPosition::Continuous(20.0 + (index % 8) as f64 * 15.0))
        })
        .collect();
    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_items(items).expect("set items");
    engine
}

fn default_config() -> TimelineEngineConfig {
    TimelineEngineConfig::new(Viewport::new(1200, 800)).with_today(date(2024, 6, 1))
}

#[test]
fn threshold_boundary_selects_vector_at_equality() {
    assert_eq!(select_strategy(DEFAULT_LOD_THRESHOLD, DEFAULT_LOD_THRESHOLD), RenderStrategy::Vector);
    assert_eq!(select_strategy(0.899_999, DEFAULT_LOD_THRESHOLD), RenderStrategy::Raster);
    assert_eq!(select_strategy(4.0, 0.8), RenderStrategy::Vector);
}

#[test]
fn zoom_without_strategy_change_does_not_touch_the_surface() {
    let mut engine = engine_with_items(default_config());
    engine.render().expect("render");
    let mutations = engine.surface().surface_mutations();

    assert!(
        engine
            .wheel(600.0, 300.0, -2.0, WheelDeltaMode::Line)
            .expect("zoom in")
    );
    engine.render().expect("render");
    assert_eq!(engine.lod(), RenderStrategy::Vector);
    assert_eq!(engine.surface().surface_mutations(), mutations);
}

#[test]
fn crossing_the_threshold_switches_layers_once() {
    let mut engine = engine_with_items(default_config());
    engine.render().expect("render");
    let mutations = engine.surface().surface_mutations();
    let vector_shapes = engine.surface().vector().shapes().len();
    assert!(vector_shapes > 0);

    assert!(
        engine
            .wheel(600.0, 300.0, 10.0, WheelDeltaMode::Line)
            .expect("zoom out")
    );
    assert_eq!(engine.lod(), RenderStrategy::Raster);
    assert_eq!(engine.active_layer(), RenderStrategy::Raster);
    assert_eq!(engine.surface().surface_mutations(), mutations + 2);
    assert!(!engine.surface().vector().is_visible());
    assert!(engine.surface().raster().is_visible());

    engine.render().expect("render");
    engine.render().expect("render again");
    assert_eq!(engine.surface().raster().repaint_count(), 2);
    assert_eq!(engine.surface().surface_mutations(), mutations + 2);
    // The hidden vector layer keeps its last shapes.
    assert_eq!(engine.surface().vector().shapes().len(), vector_shapes);
}

#[test]
fn raster_hit_test_finds_dots() {
    let mut engine = engine_with_items(default_config());
    engine
        .set_time_window(date(2021, 1, 1), date(2028, 1, 1))
        .expect("time window");
    engine.render().expect("render");
    assert_eq!(engine.active_layer(), RenderStrategy::Raster);

    let frame = engine.renderer().last_frame.clone().expect("frame");
    let dot = frame.circles.first().expect("dot drawn");
    assert!(engine.item_at(dot.cx, dot.cy).is_some());
}

#[test]
fn dead_band_delays_the_switch() {
    let mut selector = LodSelector::new(
        LodConfig {
            threshold: 0.9,
            hysteresis: 0.1,
        },
        1.0,
    )
    .expect("selector");

    let decision = selector.update(0.85);
    assert_eq!(decision.strategy, RenderStrategy::Vector);
    assert!(!decision.changed);

    let decision = selector.update(0.75);
    assert_eq!(decision.strategy, RenderStrategy::Raster);
    assert!(decision.changed);

    assert_eq!(selector.update(0.95).strategy, RenderStrategy::Raster);
    assert_eq!(selector.update(1.0).strategy, RenderStrategy::Vector);
}
