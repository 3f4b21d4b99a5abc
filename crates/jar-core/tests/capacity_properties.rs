//! Property tests for the capacity engine invariants.

use chrono::{Duration, NaiveDate};
use jar_core::capacity::{
    aggregate_by_bucket, compute_fill_level, compute_weekly_load, is_overloaded,
};
use jar_core::{BucketType, CapacityEngine, CapacityProfile, Commitment};
use proptest::prelude::*;

fn bucket_strategy() -> impl Strategy<Value = BucketType> {
    prop_oneof![
        Just(BucketType::Rock),
        Just(BucketType::Pebble),
        Just(BucketType::Sand),
    ]
}

fn commitments_strategy() -> impl Strategy<Value = Vec<Commitment>> {
    prop::collection::vec((bucket_strategy(), 0i64..7, any::<bool>()), 0..60).prop_map(|items| {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        items
            .into_iter()
            .map(|(bucket, offset, completed)| {
                let mut c = Commitment::new(monday + Duration::days(offset), bucket);
                c.completed = completed;
                c
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn weekly_load_equals_bucket_sum(commitments in commitments_strategy()) {
        let totals = aggregate_by_bucket(&commitments);
        let load = compute_weekly_load(&commitments);
        prop_assert!((load - (totals.rock_hours + totals.pebble_hours + totals.sand_hours)).abs() < 1e-9);
    }

    #[test]
    fn aggregation_is_order_independent(mut commitments in commitments_strategy()) {
        let before = aggregate_by_bucket(&commitments);
        commitments.reverse();
        prop_assert_eq!(before, aggregate_by_bucket(&commitments));
    }

    #[test]
    fn fill_level_stays_in_range(load in 0.0f64..1000.0, real in 0.01f64..500.0) {
        let fill = compute_fill_level(load, real);
        prop_assert!(fill <= 100);
    }

    #[test]
    fn empty_load_has_empty_jar(real in 0.01f64..500.0) {
        prop_assert_eq!(compute_fill_level(0.0, real), 0);
    }

    #[test]
    fn saturated_load_fills_jar(real in 0.01f64..500.0, extra in 0.0f64..500.0) {
        prop_assert_eq!(compute_fill_level(real + extra, real), 100);
    }

    #[test]
    fn overload_is_monotonic_in_load(
        load in 0.0f64..200.0,
        delta in 0.0f64..200.0,
        real in 0.01f64..100.0,
    ) {
        if is_overloaded(load, real) {
            prop_assert!(is_overloaded(load + delta, real));
        }
    }

    #[test]
    fn bar_segments_fill_total_width(
        commitments in commitments_strategy(),
        nominal in 1.0f64..80.0,
        overhead in 0.01f64..0.99,
        width in 1.0f64..400.0,
    ) {
        let profile = CapacityProfile::new(nominal, overhead).unwrap();
        let result = CapacityEngine::new().compute(&profile, &commitments).unwrap();
        let bar = result.bar_segments(width);
        prop_assert!((bar.total() - width).abs() < 1e-6);
        prop_assert!(bar.empty >= 0.0);
    }

    #[test]
    fn completed_hours_never_exceed_load(commitments in commitments_strategy()) {
        let result = CapacityEngine::new()
            .compute(&CapacityProfile::default(), &commitments)
            .unwrap();
        prop_assert!(result.completed_hours <= result.weekly_load);
        prop_assert!(result.fill_level <= 100);
    }
}
