//! Ordinary least squares fitting and small summary statistics.

use crate::types::{Result, ValuationError};

/// Straight line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Slope
    pub slope: f64,
    /// Intercept at `x = 0`
    pub intercept: f64,
}

impl Line {
    /// Evaluate the line at `x`.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a least-squares line through `(x[i], y[i])`.
///
/// Uses the closed form
/// `m = (n Σxy − Σx Σy) / (n Σx² − (Σx)²)`, `c = (Σy − m Σx) / n`.
///
/// # Errors
/// - `InvalidInput` if the slices differ in length or hold fewer than two points
/// - `DivisionByZero` if every `x` is equal
///
/// # Examples
/// ```
/// use valuation_core::math::regression::fit_line;
///
/// let line = fit_line(&[1.0, 2.0, 3.0], &[3.0, 5.0, 7.0]).unwrap();
/// assert!((line.slope - 2.0).abs() < 1e-12);
/// assert!((line.intercept - 1.0).abs() < 1e-12);
/// ```
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<Line> {
    if x.len() != y.len() {
        return Err(ValuationError::invalid_input(format!(
            "regression inputs differ in length: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(ValuationError::invalid_input(format!(
            "regression needs at least 2 points, got {}",
            x.len()
        )));
    }

    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_xx: f64 = x.iter().map(|a| a * a).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(ValuationError::division_by_zero(
            "regression denominator (all x values equal)",
        ));
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Ok(Line { slope, intercept })
}

/// Arithmetic mean of `values`.
///
/// # Errors
/// `InvalidInput` on an empty slice.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(ValuationError::invalid_input("mean of empty slice"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}
