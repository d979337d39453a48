use chrono::{NaiveDate, TimeDelta};
use gantt_rs::core::{
    AxisTransform, CullingConfig, ItemSet, TimeScale, TimeScaleTuning, TimelineItem, ValueScale,
    VerticalPosition, ViewProjection, VisibilityCuller,
};
use proptest::prelude::*;

const WIDTH: f64 = 1_070.0;
const HEIGHT: f64 = 540.0;
const BAR_HEIGHT: f64 = 60.0;

fn item_set(specs: &[(i64, f64)]) -> ItemSet {
    let first = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
    ItemSet::new(
        specs
            .iter()
            .enumerate()
            .map(|(index, (offset, value))| {
                TimelineItem::new(
                    format!("item-{index}"),
                    format!("License {index}"),
                    "Acme",
                    first + TimeDelta::days(*offset),
                )
                .with_position(VerticalPosition::Continuous(*value))
            })
            .collect(),
    )
}

fn projection(items: &ItemSet, time: AxisTransform, value: AxisTransform) -> ViewProjection {
    let (start, end) = items.end_extent_seconds().expect("non-empty set");
    let base_time = TimeScale::from_seconds(start, end, WIDTH, TimeScaleTuning::default())
        .expect("time scale");
    let base_value = ValueScale::new(0.0, 150.0, HEIGHT).expect("value scale");
    ViewProjection {
        time: base_time.rescale(time).expect("rescale time"),
        value: base_value.rescale(value).expect("rescale value"),
        value_domain: (0.0, 150.0),
        lane_count: items.lane_count(),
        width_px: WIDTH,
        height_px: HEIGHT,
    }
}

#[test]
fn buffer_is_ten_item_heights() {
    let culler = VisibilityCuller::new(CullingConfig::default(), BAR_HEIGHT).expect("culler");
    assert_eq!(culler.buffer_px(), 600.0);
    assert!(CullingConfig { buffer_items: 0 }.validate().is_err());
}

#[test]
fn far_off_items_are_dropped_and_buffered_ones_kept() {
    let items = item_set(&[(0, 75.0), (500, 75.0), (1_000, 75.0), (1_460, 75.0)]);
    let base = projection(&items, AxisTransform::IDENTITY, AxisTransform::IDENTITY);
    let first = base.project_index(&items, 0).expect("anchor");
    // Zoom 20x with the first item at x = 500.
    let time = AxisTransform::new(20.0, 500.0 - first.x * 20.0).expect("transform");
    let projection = projection(&items, time, AxisTransform::IDENTITY);
    let culler = VisibilityCuller::new(CullingConfig::default(), BAR_HEIGHT).expect("culler");

    let visible = culler.cull(&items, &projection, 200.0);
    assert!(visible.contains(0));
    assert!(!visible.contains(3));
    for (index, _) in visible.iter(&items) {
        let anchor = projection.project_index(&items, index).expect("anchor");
        assert!(anchor.x >= -600.0 && anchor.x - 200.0 <= WIDTH + 600.0);
    }
}

#[test]
fn buffer_edges_use_anchor_on_the_left_and_bar_start_on_the_right() {
    let items = item_set(&[(0, 75.0), (1_000, 75.0)]);
    let base = projection(&items, AxisTransform::IDENTITY, AxisTransform::IDENTITY);
    let first = base.project_index(&items, 0).expect("anchor");
    let culler = VisibilityCuller::new(CullingConfig::default(), BAR_HEIGHT).expect("culler");

    let past_left = projection(
        &items,
        AxisTransform::new(1.0, -first.x - 650.0).expect("transform"),
        AxisTransform::IDENTITY,
    );
    assert!(!culler.cull(&items, &past_left, 200.0).contains(0));

    // Anchor beyond the right buffer, but the bar still reaches into it.
    let past_right = projection(
        &items,
        AxisTransform::new(1.0, WIDTH + 700.0 - first.x).expect("transform"),
        AxisTransform::IDENTITY,
    );
    assert!(culler.cull(&items, &past_right, 200.0).contains(0));
    assert!(!culler.cull(&items, &past_right, 50.0).contains(0));
}

proptest! {
    #[test]
    fn culled_set_is_an_ordered_subset_containing_every_on_screen_item(
        specs in proptest::collection::vec((0i64..2_000, -50.0f64..200.0), 1..120),
        k in 0.5f64..10.0,
        tx in -8_000.0f64..1_000.0,
        ty in -400.0f64..400.0
    ) {
        let items = item_set(&specs);
        let time = AxisTransform::new(k, tx).expect("transform");
        let value = AxisTransform::new(1.0, ty).expect("transform");
        let projection = projection(&items, time, value);
        let culler = VisibilityCuller::new(CullingConfig::default(), BAR_HEIGHT).expect("culler");
        let bar_width = 200.0 * k.clamp(0.5, 2.0);

        let visible = culler.cull(&items, &projection, bar_width);
        let indices = visible.indices();
        prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(indices.iter().all(|&index| index < items.len()));

        for index in 0..items.len() {
            let anchor = projection.project_index(&items, index).expect("anchor");
            if projection.contains(anchor) {
                prop_assert!(visible.contains(index));
            }
        }
    }
}
