use gantt_rs::core::{AxisTransform, TimeScale, TimeScaleTuning, ValueScale, ZoomBounds};
use gantt_rs::interaction::{
    GestureController, WheelDeltaMode, axis_for_selection, selection_for_axis,
};
use proptest::prelude::*;

const EPOCH_2020: f64 = 1_577_836_800.0;

proptest! {
    #[test]
    fn time_scale_round_trip_property(
        start_offset in 0.0f64..400_000_000.0,
        span in 3_600.0f64..400_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let start = EPOCH_2020 + start_offset;
        let end = start + span;
        let tuning = TimeScaleTuning { padding_ratio: 0.0, ..TimeScaleTuning::default() };
        let scale = TimeScale::from_seconds(start, end, 1_070.0, tuning).expect("valid scale");

        let value = start + value_factor * span;
        let px = scale.apply_seconds(value);
        let recovered = scale.invert_seconds(px);

        prop_assert!((-1e-6..=1_070.0 + 1e-6).contains(&px));
        prop_assert!((recovered - value).abs() <= 1e-3);
    }

    #[test]
    fn value_scale_round_trip_property(
        low in -1_000.0f64..1_000.0,
        span in 0.01f64..10_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let high = low + span;
        let scale = ValueScale::new(low, high, 540.0).expect("valid scale");
        let value = low + value_factor * span;

        let px = scale.apply(value);
        prop_assert!((scale.invert(px) - value).abs() <= 1e-7 * span.max(1.0));
        // Larger values sit higher on screen.
        prop_assert!(scale.apply(high) <= scale.apply(low));
    }

    #[test]
    fn rescale_composes_with_the_transform(
        k in 0.1f64..20.0,
        t in -5_000.0f64..5_000.0,
        pixel in 0.0f64..1_070.0
    ) {
        let tuning = TimeScaleTuning::default();
        let base = TimeScale::from_seconds(EPOCH_2020, EPOCH_2020 + 86_400.0 * 1_000.0, 1_070.0, tuning)
            .expect("valid scale");
        let transform = AxisTransform::new(k, t).expect("transform");
        let rescaled = base.rescale(transform).expect("rescale");

        let direct = rescaled.invert_seconds(pixel);
        let composed = base.invert_seconds(transform.invert(pixel));
        prop_assert!((direct - composed).abs() <= 1e-3);
    }

    #[test]
    fn selection_and_axis_are_inverse_property(
        start in 0.0f64..1_000.0,
        width in 2.0f64..1_070.0
    ) {
        let length = 1_070.0;
        let end = (start + width).min(length);
        prop_assume!(end - start >= 2.0);

        let axis = axis_for_selection(start, end, length).expect("axis");
        let (recovered_start, recovered_end) =
            selection_for_axis(axis, length).expect("selection");
        prop_assert!((recovered_start - start).abs() <= 1e-6);
        prop_assert!((recovered_end - end).abs() <= 1e-6);
    }

    #[test]
    fn wheel_zoom_never_leaves_bounds(
        deltas in proptest::collection::vec(-40.0f64..40.0, 1..30),
        x in 0.0f64..1_070.0,
        y in 0.0f64..540.0
    ) {
        let bounds = ZoomBounds::default();
        let mut gesture = GestureController::new(bounds).expect("gesture");
        for delta in deltas {
            let _ = gesture.wheel(x, y, delta, WheelDeltaMode::Page).expect("wheel");
            let (time, _) = gesture.axes();
            prop_assert!(bounds.contains(time.k));
        }
    }
}
