use proptest::prelude::*;
use stackbar_rs::core::{nice_step_at_least, resolve_ticks};

proptest! {
    #[test]
    fn tick_spacing_lower_bound_property(
        max in 0.001f64..1_000_000.0,
        length in 1.0f64..10_000.0,
        spacing in 1.0f64..500.0
    ) {
        let set = resolve_ticks((0.0, max), length, spacing);
        for pair in set.ticks.windows(2) {
            let distance = pair[1].offset_px - pair[0].offset_px;
            prop_assert!(
                distance >= spacing - 1e-6,
                "distance {distance} below spacing {spacing}"
            );
        }
    }

    #[test]
    fn ticks_stay_within_range(
        min in -1_000.0f64..1_000.0,
        span in 0.001f64..100_000.0,
        length in 1.0f64..10_000.0,
        spacing in 1.0f64..500.0
    ) {
        let max = min + span;
        let set = resolve_ticks((min, max), length, spacing);
        for tick in &set.ticks {
            prop_assert!(tick.value >= min - span * 1e-7);
            prop_assert!(tick.value <= max + span * 1e-7);
            prop_assert!(tick.offset_px >= -1e-4);
            prop_assert!(tick.offset_px <= length + length * 1e-7 + 1e-4);
        }
    }

    #[test]
    fn nice_step_has_nice_mantissa(raw in 1e-6f64..1e9) {
        let step = nice_step_at_least(raw);
        prop_assert!(step >= raw * (1.0 - 1e-9));

        let exponent = step.log10().floor();
        let mantissa = step / 10f64.powf(exponent);
        let close_to = |target: f64| (mantissa - target).abs() <= 1e-6;
        prop_assert!(
            close_to(1.0) || close_to(2.0) || close_to(5.0) || close_to(10.0),
            "mantissa was {mantissa}"
        );
    }
}
