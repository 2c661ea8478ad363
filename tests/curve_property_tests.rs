use adaptive_lightd::curve::CurveEngine;
use proptest::prelude::*;

const SUNRISE: i64 = 6 * 3600;
const SUNSET: i64 = 18 * 3600;
const NOON: i64 = 12 * 3600;

proptest! {
    // The one-decimal rounding can nudge a result by up to 0.05 past the
    // mathematical bounds, hence the tolerance.
    #[test]
    fn stays_within_bounds_inside_the_window(
        frac in 0.0f64..=1.0,
        min in 100.0f32..300.0,
        span in 0.0f32..400.0,
        speed in 0.1f32..5.0,
    ) {
        let now = SUNRISE + ((SUNSET - SUNRISE) as f64 * frac) as i64;
        let max = min + span;
        let t = CurveEngine::new().target_temperature(now, SUNRISE, SUNSET, min, max, speed);
        prop_assert!(t >= min - 0.05, "{t} below {min}");
        prop_assert!(t <= max + 0.05, "{t} above {max}");
    }

    #[test]
    fn outside_the_window_is_exactly_max(
        offset in 1i64..6 * 3600,
        min in 100.0f32..300.0,
        span in 1.0f32..400.0,
        speed in 0.1f32..5.0,
    ) {
        let engine = CurveEngine::new();
        let max = min + span;
        prop_assert_eq!(
            engine.target_temperature(SUNRISE - offset, SUNRISE, SUNSET, min, max, speed),
            max
        );
        prop_assert_eq!(
            engine.target_temperature(SUNSET + offset, SUNRISE, SUNSET, min, max, speed),
            max
        );
    }

    #[test]
    fn symmetric_around_solar_noon(offset in 0i64..=6 * 3600, speed in 0.1f32..5.0) {
        let engine = CurveEngine::new();
        let before = engine.target_temperature(NOON - offset, SUNRISE, SUNSET, 153.0, 500.0, speed);
        let after = engine.target_temperature(NOON + offset, SUNRISE, SUNSET, 153.0, 500.0, speed);
        // Identical up to the rounding quantum; the two positions fold onto
        // the same point modulo floating error.
        prop_assert!((before - after).abs() <= 0.1, "{before} vs {after}");
    }

    #[test]
    fn non_decreasing_away_from_noon(
        offsets in (0i64..=6 * 3600).prop_flat_map(|hi| (Just(hi), 0..=hi)),
        speed in 0.1f32..5.0,
    ) {
        let (far, near) = offsets;
        let engine = CurveEngine::new();
        let nearer = engine.target_temperature(NOON + near, SUNRISE, SUNSET, 153.0, 500.0, speed);
        let farther = engine.target_temperature(NOON + far, SUNRISE, SUNSET, 153.0, 500.0, speed);
        prop_assert!(farther >= nearer, "{farther} < {nearer} at offsets {near}..{far}");
    }
}
