//! Scaling factor calibration.
//!
//! Each calibration example is priced with the naive linear estimate
//! `0.3 * ebit + 0.7 * revenue`; the scaling factor is the mean ratio of
//! known price to that estimate.

use tracing::debug;
use valuation_core::math::regression::mean;
use valuation_core::types::{
    CalibrationExample, CalibrationSet, Result, ScalingFactor, ValuationError, WeightPair,
};

/// Calibrate the scaling factor against `examples` using the naive weights.
///
/// # Errors
/// - `EmptyCalibrationSet` if `examples` is empty
/// - `DivisionByZero` if any example's naive estimate is zero
///
/// # Examples
/// ```
/// use valuation_core::types::CalibrationSet;
/// use valuation_engine::pricing::compute_scaling_factor;
///
/// let factor = compute_scaling_factor(CalibrationSet::standard().examples()).unwrap();
/// assert!((factor.value - 0.5309282736).abs() < 1e-9);
/// ```
pub fn compute_scaling_factor(examples: &[CalibrationExample]) -> Result<ScalingFactor> {
    compute_scaling_factor_with(examples, WeightPair::NAIVE)
}

/// Calibrate the scaling factor against `examples` using `weights` for the
/// naive estimate.
pub fn compute_scaling_factor_with(
    examples: &[CalibrationExample],
    weights: WeightPair,
) -> Result<ScalingFactor> {
    if examples.is_empty() {
        return Err(ValuationError::EmptyCalibrationSet);
    }

    let ratios = examples
        .iter()
        .enumerate()
        .map(|(i, ex)| {
            let estimate = weights.blend(ex.ebit, ex.revenue);
            if estimate == 0.0 {
                return Err(ValuationError::division_by_zero(format!(
                    "naive estimate of calibration example {}",
                    i
                )));
            }
            Ok(ex.known_price / estimate)
        })
        .collect::<Result<Vec<f64>>>()?;

    let value = mean(&ratios)?;
    debug!(
        examples = examples.len(),
        scaling_factor = value,
        "Calibrated scaling factor"
    );
    Ok(ScalingFactor { value, ratios })
}

/// Convenience wrapper over a [`CalibrationSet`].
pub fn calibrate(set: &CalibrationSet) -> Result<ScalingFactor> {
    compute_scaling_factor(set.examples())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_scaling_factor() {
        let factor = calibrate(&CalibrationSet::standard()).unwrap();
        let expected = (900.0 / 1679.0 + 1350.0 / 2555.0 + 2025.0 / 3832.5) / 3.0;
        assert_relative_eq!(factor.value, expected, epsilon = 1e-12);
        assert_relative_eq!(factor.value, 0.5309282736322641, epsilon = 1e-12);
        assert_eq!(factor.ratios.len(), 3);
        assert_relative_eq!(factor.ratios[0], 900.0 / 1679.0, epsilon = 1e-12);
    }

    #[test]
    fn test_proportional_examples_share_ratio() {
        let factor = calibrate(&CalibrationSet::standard()).unwrap();
        assert_relative_eq!(factor.ratios[1], factor.ratios[2], epsilon = 1e-12);
    }

    #[test]
    fn test_single_example_reprices_exactly() {
        let ex = CalibrationExample::new(100.0, 1000.0, 500.0);
        let factor = compute_scaling_factor(&[ex]).unwrap();
        assert_relative_eq!(
            WeightPair::NAIVE.blend(ex.ebit, ex.revenue) * factor.value,
            500.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_estimate_is_domain_error() {
        let examples = [
            CalibrationExample::new(230.0, 2300.0, 900.0),
            CalibrationExample::new(0.0, 0.0, 100.0),
        ];
        assert_eq!(
            compute_scaling_factor(&examples),
            Err(ValuationError::DivisionByZero(
                "naive estimate of calibration example 1".to_string()
            ))
        );
    }

    #[test]
    fn test_empty_examples() {
        assert_eq!(
            compute_scaling_factor(&[]),
            Err(ValuationError::EmptyCalibrationSet)
        );
    }

    #[test]
    fn test_custom_naive_weights() {
        let ex = CalibrationExample::new(100.0, 300.0, 400.0);
        let weights = WeightPair::new(0.5, 0.5).unwrap();
        let factor = compute_scaling_factor_with(&[ex], weights).unwrap();
        assert_relative_eq!(factor.value, 2.0, epsilon = 1e-12);
    }
}
