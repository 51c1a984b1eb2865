//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

use valuation_core::math::regression::{fit_line, mean};
use valuation_core::math::rounding::Rounding;
use valuation_core::types::{
    ebit_percentage, CalibrationExample, CalibrationSet, ConstraintOutcome, PriceResult,
    ScalingFactor, ValuationError, WeightPair,
};

#[test]
fn test_types_module_exports() {
    let set = CalibrationSet::new(vec![
        CalibrationExample::new(100.0, 1000.0, 400.0),
        CalibrationExample::new(200.0, 1500.0, 700.0),
    ])
    .unwrap();
    assert_eq!(set.examples()[1].known_price, 700.0);
    assert_eq!(set.max_revenue(), 1500.0);

    let factor = ScalingFactor {
        value: 1.0,
        ratios: vec![1.0],
    };
    assert_eq!(factor.max_deviation(), 0.0);

    let weights = WeightPair::new(0.2, 0.8).unwrap();
    let result = PriceResult {
        price: 42.0,
        unconstrained_price: 42.0,
        ebit_percentage: ebit_percentage(1.0, 4.0).unwrap(),
        weights,
        scaling_factor: factor.value,
        constraint: ConstraintOutcome::Unconstrained,
    };
    assert_eq!(result.ebit_percentage, 25.0);
}

#[test]
fn test_math_module_exports() {
    let line = fit_line(&[0.0, 1.0], &[1.0, 3.0]).unwrap();
    assert_eq!(line.eval(2.0), 5.0);
    assert_eq!(mean(&[2.0, 4.0]).unwrap(), 3.0);
    assert_eq!(Rounding::Integer.apply(1356.52), 1357.0);
}

#[test]
fn test_errors_are_comparable() {
    let err = ebit_percentage(5.0, 0.0).unwrap_err();
    assert_eq!(err, ValuationError::DivisionByZero("revenue".to_string()));
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::*;

    #[test]
    fn test_weight_pair_round_trip_rejects_bad_sum() {
        let json = r#"{"ebit_weight":0.7,"revenue_weight":0.7}"#;
        assert!(serde_json::from_str::<WeightPair>(json).is_err());
    }

    #[test]
    fn test_calibration_set_from_json() {
        let json = r#"[{"ebit":230.0,"revenue":2300.0,"known_price":900.0}]"#;
        let set: CalibrationSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 1);
        assert!(serde_json::from_str::<CalibrationSet>("[]").is_err());
    }
}
