use chrono::{NaiveDate, TimeDelta};
use criterion::{Criterion, criterion_group, criterion_main};
use gantt_rs::api::{TimelineEngine, TimelineEngineConfig};
use gantt_rs::core::primitives::date_to_datetime;
use gantt_rs::core::{
    AxisTransform, CullingConfig, GranularityLevel, ItemSet, TimeScale, TimeScaleTuning,
    TimelineItem, ValueScale, VerticalPosition, ViewProjection, Viewport, VisibilityCuller,
    period_starts,
};
use gantt_rs::interaction::WheelDeltaMode;
use gantt_rs::render::NullRenderer;
use std::hint::black_box;

fn generated_items(count: usize) -> Vec<TimelineItem> {
    let first = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
    (0..count)
        .map(|i| {
            TimelineItem::new(
                format!("item-{i}"),
                format!("License {i}"),
                format!("Company {}", i % 37),
                first + TimeDelta::days((i as i64 * 7) % 3_650),
            )
            .with_position(VerticalPosition::Continuous(10.0 + (i % 13) as f64 * 10.0))
        })
        .collect()
}

fn bench_time_scale_round_trip(c: &mut Criterion) {
    let scale = TimeScale::from_seconds(
        1_577_836_800.0,
        1_893_456_000.0,
        1_070.0,
        TimeScaleTuning::default(),
    )
    .expect("valid scale")
    .rescale(AxisTransform::new(3.5, -1_200.0).expect("transform"))
    .expect("rescale");

    c.bench_function("time_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.apply_seconds(black_box(1_700_000_000.0));
            let _ = scale.invert_seconds(black_box(px));
        })
    });
}

fn bench_culling_5k(c: &mut Criterion) {
    let items = ItemSet::new(generated_items(5_000));
    let (start, end) = items.end_extent_seconds().expect("non-empty set");
    let base_time = TimeScale::from_seconds(start, end, 1_070.0, TimeScaleTuning::default())
        .expect("time scale");
    let projection = ViewProjection {
        time: base_time
            .rescale(AxisTransform::new(4.0, -1_500.0).expect("transform"))
            .expect("rescale"),
        value: ValueScale::new(0.0, 150.0, 540.0).expect("value scale"),
        value_domain: (0.0, 150.0),
        lane_count: items.lane_count(),
        width_px: 1_070.0,
        height_px: 540.0,
    };
    let culler = VisibilityCuller::new(CullingConfig::default(), 60.0).expect("culler");

    c.bench_function("culling_5k", |b| {
        b.iter(|| {
            let _ = culler.cull(black_box(&items), black_box(&projection), black_box(400.0));
        })
    });
}

fn bench_period_starts_week_10y(c: &mut Criterion) {
    let start = date_to_datetime(NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"));
    let end = date_to_datetime(NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid date"));

    c.bench_function("period_starts_week_10y", |b| {
        b.iter(|| {
            let _ = period_starts(
                black_box(GranularityLevel::Week),
                black_box(start),
                black_box(end),
            );
        })
    });
}

fn bench_engine_wheel_and_render_2k(c: &mut Criterion) {
    let config = TimelineEngineConfig::new(Viewport::new(1600, 900))
        .with_today(NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"));
    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .set_items(generated_items(2_000))
        .expect("set items");

    let mut direction = 1.0;
    c.bench_function("engine_wheel_and_render_2k", |b| {
        b.iter(|| {
            direction = -direction;
            let _ = engine
                .wheel(800.0, 400.0, black_box(direction * 3.0), WheelDeltaMode::Line)
                .expect("wheel");
            engine.render().expect("render");
        })
    });
}

criterion_group!(
    benches,
    bench_time_scale_round_trip,
    bench_culling_5k,
    bench_period_starts_week_10y,
    bench_engine_wheel_and_render_2k
);
criterion_main!(benches);
