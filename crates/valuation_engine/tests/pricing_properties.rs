//! Integration and property tests for the pricing engine.

use approx::assert_relative_eq;
use proptest::prelude::*;
use valuation_core::math::rounding::Rounding;
use valuation_core::types::{CalibrationExample, CalibrationSet, ConstraintOutcome};
use valuation_engine::pricing::{
    compute_price, compute_scaling_factor, EngineConfig, EnginePreset, PriceConstraints,
    PricingEngine, ProtectedFloor,
};
use valuation_engine::weights::{select_weights, ScheduleVariant, WeightSchedule};

#[test]
fn test_standard_scaling_factor_value() {
    let factor = compute_scaling_factor(CalibrationSet::standard().examples()).unwrap();
    let expected =
        (900.0 / (0.3 * 230.0 + 0.7 * 2300.0)
            + 1350.0 / (0.3 * 350.0 + 0.7 * 3500.0)
            + 2025.0 / (0.3 * 525.0 + 0.7 * 5250.0))
            / 3.0;
    assert_relative_eq!(factor.value, expected, epsilon = 1e-12);
    assert_relative_eq!(factor.value, 0.530928273632264, epsilon = 1e-12);
}

#[test]
fn test_ten_percent_bucket_per_variant() {
    let inclusive = ScheduleVariant::Inclusive.schedule().select(10.0);
    assert_eq!((inclusive.ebit_weight, inclusive.revenue_weight), (0.5, 0.5));

    for variant in [ScheduleVariant::Standard, ScheduleVariant::Banded] {
        let strict = variant.schedule().select(10.0);
        assert_eq!((strict.ebit_weight, strict.revenue_weight), (0.3, 0.7));
    }

    // Standard calibration deals sit exactly on 10%
    let pct = CalibrationSet::standard().examples()[0]
        .ebit_percentage()
        .unwrap();
    assert_eq!(select_weights(pct).ebit_weight, 0.3);
}

#[test]
fn test_page_and_earnout_diverge_only_through_constraints_and_schedule() {
    let page = PricingEngine::from_preset(EnginePreset::Page).unwrap();
    let earnout = PricingEngine::from_preset(EnginePreset::Earnout).unwrap();
    assert_eq!(
        page.scaling_factor().value,
        earnout.scaling_factor().value
    );

    // 20% margin: same bucket in both schedules, unconstrained
    let a = page.price(600.0, 3000.0).unwrap();
    let b = earnout.price(600.0, 3000.0).unwrap();
    assert_eq!(a.weights, b.weights);
    assert_eq!(b.price, Rounding::Integer.apply(a.unconstrained_price));
    assert_eq!(b.constraint, ConstraintOutcome::Unconstrained);
}

#[test]
fn test_custom_calibration_and_protected_floor() {
    let calibration = CalibrationSet::new(vec![
        CalibrationExample::new(100.0, 1000.0, 500.0),
        CalibrationExample::new(200.0, 2000.0, 1000.0),
    ])
    .unwrap();
    let constraints = PriceConstraints::none()
        .with_floor(100.0)
        .with_ceiling(1500.0)
        .with_protected_floor(ProtectedFloor::from_calibration(500.0, 0.1, &calibration));
    let engine = PricingEngine::new(EngineConfig {
        calibration,
        schedule: WeightSchedule::banded(),
        constraints,
        rounding: Rounding::Cents,
    })
    .unwrap();

    // 10% margin in the banded schedule uses the naive weights, so the
    // calibration deals reprice exactly
    assert_eq!(engine.price(200.0, 2000.0).unwrap().price, 1000.0);

    // 5% below the reference minimums: protected
    let protected = engine.price(95.0, 950.0).unwrap();
    assert_eq!(protected.price, 500.0);
    assert_eq!(protected.constraint, ConstraintOutcome::ProtectedFloor);

    // 20% below: regular floor does not bind, price falls under 500
    let unprotected = engine.price(80.0, 800.0).unwrap();
    assert!(unprotected.price < 500.0);
    assert_eq!(unprotected.constraint, ConstraintOutcome::Unconstrained);
}

fn configured_schedules() -> impl Strategy<Value = WeightSchedule> {
    prop_oneof![
        Just(WeightSchedule::standard()),
        Just(WeightSchedule::banded()),
        Just(WeightSchedule::inclusive()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_price_within_bounds(
        ebit in 0.0f64..100_000.0,
        revenue in 1.0f64..100_000.0,
        schedule in configured_schedules(),
    ) {
        let set = CalibrationSet::standard();
        let constraints = PriceConstraints::earnout(&set);
        let factor = compute_scaling_factor(set.examples()).unwrap();
        for rounding in [Rounding::Cents, Rounding::Integer, Rounding::None] {
            let result = compute_price(ebit, revenue, factor.value, &schedule, &constraints, rounding)
                .unwrap();
            prop_assert!(result.price >= 300.0, "price {} below floor", result.price);
            prop_assert!(result.price <= 2025.0, "price {} above ceiling", result.price);
        }
    }

    #[test]
    fn test_price_within_fractional_bounds(
        ebit in 0.0f64..10_000.0,
        revenue in 1.0f64..10_000.0,
        floor in 0.0f64..1_000.0,
        width in 0.0f64..2_000.0,
        schedule in configured_schedules(),
    ) {
        let ceiling = floor + width;
        let constraints = PriceConstraints::none()
            .with_floor(floor)
            .with_ceiling(ceiling);
        let factor = compute_scaling_factor(CalibrationSet::standard().examples()).unwrap();
        for rounding in [Rounding::Cents, Rounding::Integer, Rounding::None] {
            let result = compute_price(ebit, revenue, factor.value, &schedule, &constraints, rounding)
                .unwrap();
            prop_assert!(result.price >= floor, "price {} below floor {}", result.price, floor);
            prop_assert!(
                result.price <= ceiling,
                "price {} above ceiling {}",
                result.price,
                ceiling
            );
        }
    }

    #[test]
    fn test_price_is_idempotent(
        ebit in 0.0f64..10_000.0,
        revenue in 1.0f64..10_000.0,
    ) {
        let engine = PricingEngine::from_preset(EnginePreset::Earnout).unwrap();
        let first = engine.price(ebit, revenue).unwrap();
        let second = engine.price(ebit, revenue).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_selected_weights_sum_to_one(
        pct in -10.0f64..200.0,
        schedule in configured_schedules(),
    ) {
        let w = schedule.select(pct);
        prop_assert!((w.ebit_weight + w.revenue_weight - 1.0).abs() < 1e-9);
    }
}
