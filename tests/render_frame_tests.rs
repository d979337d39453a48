use chrono::{NaiveDate, TimeDelta};
use gantt_rs::api::{InitialView, TimelineEngine, TimelineEngineConfig};
use gantt_rs::core::{GranularityLevel, TimelineItem, VerticalPosition, Viewport};
use gantt_rs::extensions::DateMarker;
use gantt_rs::render::{LabelLocale, NullRenderer, RenderFrame};

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
                format!("Company {}", index % 5),
                first + TimeDelta::days(offset),
            )
            .with_position(VerticalPosition::Continuous(15.0 + (index % 10) as f64 * 12.0))
        })
        .collect()
}

fn base_config() -> TimelineEngineConfig {
    TimelineEngineConfig::new(Viewport::new(1200, 800)).with_today(date(2024, 6, 1))
}

fn render_with(config: TimelineEngineConfig, items: Vec<TimelineItem>) -> RenderFrame {
    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_items(items).expect("set items");
    engine.render().expect("render");
    engine.into_renderer().last_frame.expect("frame")
}

fn has_text(frame: &RenderFrame, text: &str) -> bool {
    frame.texts.iter().any(|primitive| primitive.text == text)
}

#[test]
fn full_frame_is_valid_and_labels_years() {
    let frame = render_with(base_config(), spread_items(60));
    frame.validate().expect("valid frame");

    assert!(has_text(&frame, "2024"));
    assert!(has_text(&frame, "2025"));
    assert!(!frame.lines.is_empty());
}

#[test]
fn value_axis_uses_percent_labels() {
    let frame = render_with(base_config(), spread_items(20));
    for label in ["0%", "20%", "60%", "100%", "140%"] {
        assert!(has_text(&frame, label), "missing value label {label}");
    }
}

#[test]
fn today_marker_follows_config() {
    let with_marker = render_with(base_config(), spread_items(20));
    assert!(has_text(&with_marker, "Today"));

    let without_marker = render_with(base_config().with_today_marker(false), spread_items(20));
    assert!(!has_text(&without_marker, "Today"));
}

#[test]
fn russian_locale_changes_generated_labels() {
    let config = base_config().with_locale(LabelLocale::RuRu);
    let frame = render_with(config, spread_items(20));
    assert!(has_text(&frame, "Сегодня"));

    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.render().expect("render");
    let empty = engine.into_renderer().last_frame.expect("frame");
    assert!(has_text(&empty, "Нет данных"));
}

#[test]
fn host_markers_are_drawn_and_removable() {
    let mut engine =
        TimelineEngine::new(NullRenderer::default(), base_config()).expect("engine init");
    engine.set_items(spread_items(20)).expect("set items");
    engine
        .add_marker(DateMarker::new("audit", date(2025, 3, 1)).with_label("Audit"))
        .expect("add marker");
    assert!(
        engine
            .add_marker(DateMarker::new("audit", date(2025, 4, 1)))
            .is_err()
    );
    assert!(engine.add_marker(DateMarker::new("", date(2025, 4, 1))).is_err());

    engine.render().expect("render");
    let frame = engine.renderer().last_frame.clone().expect("frame");
    assert!(has_text(&frame, "Audit"));

    assert!(engine.remove_marker("audit"));
    engine.render().expect("render");
    let frame = engine.renderer().last_frame.clone().expect("frame");
    assert!(!has_text(&frame, "Audit"));
    assert!(engine.markers().is_empty());
}

#[test]
fn time_selection_caption_is_drawn_on_the_track() {
    let config = base_config().with_initial_view(InitialView::dashboard_window());
    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_items(spread_items(40)).expect("set items");
    engine.render().expect("render");

    let caption = engine.time_selection_caption().expect("caption");
    assert!(caption.contains(" — "));
    let frame = engine.renderer().last_frame.clone().expect("frame");
    assert!(has_text(&frame, &caption));
}

#[test]
fn day_window_draws_fine_grid() {
    let mut engine =
        TimelineEngine::new(NullRenderer::default(), base_config()).expect("engine init");
    engine.set_items(spread_items(40)).expect("set items");
    engine
        .set_time_window(date(2024, 5, 1), date(2024, 5, 11))
        .expect("time window");
    assert_eq!(engine.granularity(), GranularityLevel::Day);
    engine.render().expect("render");

    let frame = engine.renderer().last_frame.clone().expect("frame");
    let fine_lines = frame
        .lines
        .iter()
        .filter(|line| (line.stroke_width - 0.5).abs() < f64::EPSILON && line.x1 == line.x2)
        .count();
    // May 1st is a month line and May 5th a week line.
    assert!(fine_lines >= 7);
}
