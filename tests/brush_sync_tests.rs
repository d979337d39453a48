use approx::assert_abs_diff_eq;
use chrono::{NaiveDate, TimeDelta};
use gantt_rs::GanttError;
use gantt_rs::api::{InitialView, TimelineEngine, TimelineEngineConfig, TimelineSession};
use gantt_rs::core::{
    AxisTransform, TimelineItem, TransformOrigin, TransformState, VerticalPosition, Viewport,
    ZoomBounds,
};
use gantt_rs::interaction::{
    BrushAxis, BrushEvent, SyncPhase, WheelDeltaMode, selection_for_axis,
};
use gantt_rs::render::NullRenderer;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn spread_items(count: usize) -> Vec<TimelineItem> {
    let first = date(2023, 1, 1);
    let span_days = (date(2026, 12, 31) - first).num_days();
    (0..count)
        .map(|index| {
            let offset = span_days * index as i64 / (count as i64 - 1);
            TimelineItem::new(
                format!("item-{index}"),
                format!("License {index}"),
                "Acme",
                first + TimeDelta::days(offset),
            )
            .with_position(VerticalPosition::Continuous(15.0 + (index % 10) as f64 * 12.0))
        })
        .collect()
}

fn config() -> TimelineEngineConfig {
    TimelineEngineConfig::new(Viewport::new(1200, 800))
        .with_today(date(2024, 6, 1))
        .with_initial_view(InitialView::dashboard_window())
}

fn dashboard_engine() -> TimelineEngine<NullRenderer> {
    let mut engine = TimelineEngine::new(NullRenderer::default(), config()).expect("engine init");
    engine.set_items(spread_items(100)).expect("set items");
    engine
}

#[test]
fn initial_window_places_time_selection() {
    let engine = dashboard_engine();
    let (start, end) = engine
        .session()
        .time_brush()
        .selection()
        .expect("time selection");
    assert_abs_diff_eq!(start, 107.0, epsilon = 1e-6);
    assert_abs_diff_eq!(end, 642.0, epsilon = 1e-6);
    assert_abs_diff_eq!(engine.transform_state().k, 2.0, epsilon = 1e-9);

    let (low, high) = engine
        .session()
        .value_brush()
        .selection()
        .expect("value selection");
    assert_abs_diff_eq!(low, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(high, 540.0, epsilon = 1e-9);
}

#[test]
fn drawing_a_fresh_time_selection_rescales_only_time() {
    let mut engine = dashboard_engine();
    let value_before = engine.session().value_brush().selection();
    let value_axis_before = engine.transform_state().value;
    let passes_before = engine.session().completed_passes();

    engine.pointer_down(900.0, 680.0).expect("press on time track");
    assert!(engine.pointer_move(1000.0, 680.0).expect("drag"));
    engine.pointer_up();

    let (start, end) = engine
        .session()
        .time_brush()
        .selection()
        .expect("time selection");
    assert_abs_diff_eq!(start, 800.0, epsilon = 1e-9);
    assert_abs_diff_eq!(end, 900.0, epsilon = 1e-9);
    assert_eq!(engine.session().completed_passes(), passes_before + 1);
    assert_eq!(engine.sync_phase(), SyncPhase::Idle);

    let base = engine.session().base_time();
    let seconds_per_px = {
        let (d0, d1) = base.domain_seconds();
        (d1 - d0) / base.width_px()
    };
    let (visible_start, visible_end) = engine
        .session()
        .projection()
        .expect("projection")
        .time
        .domain_seconds();
    assert!((visible_start - base.invert_seconds(800.0)).abs() <= seconds_per_px);
    assert!((visible_end - base.invert_seconds(900.0)).abs() <= seconds_per_px);

    assert_eq!(engine.session().value_brush().selection(), value_before);
    assert_eq!(engine.transform_state().value, value_axis_before);
    assert_eq!(engine.transform_state().k, 10.0);
}

#[test]
fn dragging_the_selection_body_keeps_its_size() {
    let mut engine = dashboard_engine();
    // Track starts at x = 100; the selection body covers [107, 642].
    engine.pointer_down(400.0, 680.0).expect("press inside selection");
    assert!(engine.pointer_move(450.0, 680.0).expect("drag"));
    engine.pointer_up();

    let (start, end) = engine
        .session()
        .time_brush()
        .selection()
        .expect("time selection");
    assert_abs_diff_eq!(start, 157.0, epsilon = 1e-6);
    assert_abs_diff_eq!(end, 692.0, epsilon = 1e-6);
}

#[test]
fn value_selector_rescales_only_value() {
    let mut engine = dashboard_engine();
    let time_before = engine.transform_state().time;

    // Value track covers y in [80, 620]; pressing at the top handle.
    engine.pointer_down(40.0, 80.0).expect("press on value track");
    assert!(engine.pointer_move(40.0, 215.0).expect("drag"));
    engine.pointer_up();

    let (low, high) = engine
        .session()
        .value_brush()
        .selection()
        .expect("value selection");
    assert_abs_diff_eq!(low, 135.0, epsilon = 1e-9);
    assert_abs_diff_eq!(high, 540.0, epsilon = 1e-9);
    assert_eq!(engine.transform_state().time, time_before);
    assert!(engine.transform_state().value.k > 1.0);
}

#[test]
fn gesture_press_alone_changes_nothing() {
    let mut engine = dashboard_engine();
    let before = engine.transform_state();
    let passes = engine.session().completed_passes();

    engine.pointer_down(500.0, 300.0).expect("press in plot");
    assert!(!engine.pointer_move(500.0, 300.0).expect("no-op move"));
    engine.pointer_up();

    assert_eq!(engine.transform_state(), before);
    assert_eq!(engine.session().completed_passes(), passes);
}

#[test]
fn plot_pan_moves_both_selectors_to_match_the_view() {
    let mut engine = dashboard_engine();
    engine.pointer_down(500.0, 300.0).expect("press in plot");
    assert!(engine.pointer_move(560.0, 330.0).expect("pan"));
    engine.pointer_up();

    let state = engine.transform_state();
    let plot = engine.layout().plot;
    let expected_time = selection_for_axis(state.time, plot.width).expect("time selection");
    let expected_value = selection_for_axis(state.value, plot.height).expect("value selection");
    assert_eq!(engine.session().time_brush().selection(), Some(expected_time));
    assert_eq!(engine.session().value_brush().selection(), Some(expected_value));
}

#[test]
fn wheel_zoom_stays_within_bounds() {
    let mut engine = dashboard_engine();

    assert!(
        engine
            .wheel(600.0, 300.0, -10.0, WheelDeltaMode::Page)
            .expect("zoom in")
    );
    assert_eq!(engine.transform_state().k, 10.0);
    assert!(
        !engine
            .wheel(600.0, 300.0, -10.0, WheelDeltaMode::Page)
            .expect("zoom in at max")
    );

    assert!(
        engine
            .wheel(600.0, 300.0, 30.0, WheelDeltaMode::Page)
            .expect("zoom out")
    );
    assert_eq!(engine.transform_state().k, 0.5);

    let state = engine.transform_state();
    let plot = engine.layout().plot;
    assert_eq!(
        engine.session().time_brush().selection(),
        selection_for_axis(state.time, plot.width)
    );
}

#[test]
fn wheel_outside_the_plot_is_ignored() {
    let mut engine = dashboard_engine();
    let before = engine.transform_state();
    assert!(
        !engine
            .wheel(10.0, 10.0, -3.0, WheelDeltaMode::Line)
            .expect("wheel outside plot")
    );
    assert_eq!(engine.transform_state(), before);
}

#[test]
fn double_click_does_not_zoom() {
    let mut engine = dashboard_engine();
    let before = engine.transform_state();
    assert!(!engine.double_click(600.0, 300.0).expect("double click"));
    assert_eq!(engine.transform_state(), before);
}

#[test]
fn echo_inside_a_pass_is_dropped() {
    let mut session = TimelineSession::new(&config()).expect("session");
    let event = BrushEvent {
        axis: BrushAxis::Time,
        start: 10.0,
        end: 200.0,
    };

    session
        .with_pass(SyncPhase::ApplyingGesture, |inner| {
            assert!(!inner.apply_brush_event(event)?);
            Ok(())
        })
        .expect("pass");

    assert_eq!(session.dropped_echoes(), 1);
    assert_eq!(session.sync_phase(), SyncPhase::Idle);
    assert!(session.apply_brush_event(event).expect("fresh event"));
}

#[test]
fn programmatic_change_inside_a_pass_is_refused() {
    let mut session = TimelineSession::new(&config()).expect("session");
    let (start, end) = session.base_time().domain_seconds();

    let err = session
        .with_pass(SyncPhase::ApplyingBrushTime, |inner| {
            inner.set_time_domain(start, (start + end) / 2.0)
        })
        .expect_err("programmatic change must conflict");

    assert!(matches!(
        err,
        GanttError::SyncConflict {
            active: SyncPhase::ApplyingBrushTime,
            ..
        }
    ));
    assert_eq!(session.sync_phase(), SyncPhase::Idle);
}

#[test]
fn programmatic_window_moves_selector_silently() {
    let mut engine = dashboard_engine();
    let echoes = engine.dropped_echoes();
    engine
        .set_time_window(date(2024, 1, 1), date(2025, 1, 1))
        .expect("time window");

    let state = engine.transform_state();
    let plot = engine.layout().plot;
    assert_eq!(
        engine.session().time_brush().selection(),
        selection_for_axis(state.time, plot.width)
    );
    assert_eq!(engine.dropped_echoes(), echoes);
    assert!(engine.time_selection_caption().is_some());
}

fn gesture_state(time: AxisTransform, value: AxisTransform) -> TransformState {
    TransformState::from_axes(time, value, TransformOrigin::Gesture, ZoomBounds::default())
}

#[test]
fn applied_gesture_state_is_where_the_next_wheel_starts() {
    let mut engine = dashboard_engine();
    let time = AxisTransform::new(4.0, -1000.0).expect("time axis");
    let value = engine.transform_state().value;
    assert!(
        engine
            .apply_gesture_transform(gesture_state(time, value))
            .expect("apply gesture")
    );
    assert_eq!(engine.session().gesture().axes(), (time, value));

    assert!(
        engine
            .wheel(600.0, 300.0, 1.0, WheelDeltaMode::Pixel)
            .expect("small wheel step")
    );
    let state = engine.transform_state();
    assert_abs_diff_eq!(state.time.k, 4.0, epsilon = 0.01);
    // Anchored at plot x = 500: t' = 500 - (500 - t) * k' / k.
    let expected_t = 500.0 - 1500.0 * state.time.k / 4.0;
    assert_abs_diff_eq!(state.time.t, expected_t, epsilon = 1e-6);

    let plot = engine.layout().plot;
    assert_eq!(
        engine.session().time_brush().selection(),
        selection_for_axis(state.time, plot.width)
    );
}

#[test]
fn applied_gesture_zoom_is_constrained_to_bounds() {
    let mut engine = dashboard_engine();
    let value = engine.transform_state().value;
    let time = AxisTransform::new(50.0, 0.0).expect("time axis");
    engine
        .apply_gesture_transform(gesture_state(time, value))
        .expect("apply gesture");

    let state = engine.transform_state();
    assert_eq!(state.k, 10.0);
    assert_eq!(state.time.k, 10.0);
    assert_eq!(state.origin, TransformOrigin::Gesture);
}

#[test]
fn degenerate_gesture_state_is_rejected_without_touching_the_view() {
    let mut engine = dashboard_engine();
    let before = engine.transform_state();
    let time_selection = engine.session().time_brush().selection();
    let state = TransformState {
        time: AxisTransform { k: 0.0, t: 0.0 },
        ..before
    };

    let err = engine
        .apply_gesture_transform(state)
        .expect_err("zero scale must be rejected");
    assert!(matches!(err, GanttError::InvalidData(_)));

    assert_eq!(engine.transform_state(), before);
    assert_eq!(engine.session().time_brush().selection(), time_selection);
    assert_eq!(engine.sync_phase(), SyncPhase::Idle);
    engine.render().expect("render after rejected state");
    assert!(engine.viewport_extent().is_ok());
}

#[test]
fn failed_selector_pass_restores_the_previous_view() {
    let mut engine = dashboard_engine();
    let before = engine.transform_state();
    let time_selection = engine.session().time_brush().selection();
    let visible = engine.session().visible().len();

    let err = engine
        .apply_brush_event(BrushEvent {
            axis: BrushAxis::Time,
            start: 300.0,
            end: 300.0,
        })
        .expect_err("empty selection must fail");
    assert!(matches!(err, GanttError::InvalidData(_)));

    assert_eq!(engine.transform_state(), before);
    assert_eq!(engine.session().time_brush().selection(), time_selection);
    assert_eq!(engine.session().gesture().axes(), (before.time, before.value));
    assert_eq!(engine.session().visible().len(), visible);
    assert_eq!(engine.sync_phase(), SyncPhase::Idle);
    engine.render().expect("render after failed pass");
}

#[test]
fn applied_selector_event_moves_that_selector() {
    let mut engine = dashboard_engine();
    assert!(
        engine
            .apply_brush_event(BrushEvent {
                axis: BrushAxis::Time,
                start: 100.0,
                end: 300.0,
            })
            .expect("selector event")
    );

    assert_eq!(
        engine.session().time_brush().selection(),
        Some((100.0, 300.0))
    );
    let plot = engine.layout().plot;
    let (start, end) =
        selection_for_axis(engine.transform_state().time, plot.width).expect("view selection");
    assert_abs_diff_eq!(start, 100.0, epsilon = 1e-6);
    assert_abs_diff_eq!(end, 300.0, epsilon = 1e-6);
}

#[test]
fn applied_selector_event_is_clamped_to_the_track() {
    let mut engine = dashboard_engine();
    let plot = engine.layout().plot;
    engine
        .apply_brush_event(BrushEvent {
            axis: BrushAxis::Value,
            start: -40.0,
            end: plot.height + 500.0,
        })
        .expect("selector event");

    assert_eq!(
        engine.session().value_brush().selection(),
        Some((0.0, plot.height))
    );
    assert_eq!(engine.transform_state().value, AxisTransform::IDENTITY);
}
