//! Calibration examples and the scaling factor derived from them.
//!
//! A calibration example is a historical observation of a company's EBIT,
//! Revenue and the price actually agreed for it. A set of examples anchors
//! the naive linear estimate to market reality via a single scaling factor.

use super::error::{Result, ValuationError};

/// A single historical observation used for calibration.
///
/// # Examples
/// ```
/// use valuation_core::types::CalibrationExample;
///
/// let ex = CalibrationExample::new(230.0, 2300.0, 900.0);
/// assert_eq!(ex.ebit, 230.0);
/// assert!((ex.ebit_percentage().unwrap() - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationExample {
    /// Earnings before interest and taxes
    pub ebit: f64,
    /// Revenue
    pub revenue: f64,
    /// Price agreed for this company
    pub known_price: f64,
}

impl CalibrationExample {
    /// Create a new calibration example.
    pub fn new(ebit: f64, revenue: f64, known_price: f64) -> Self {
        Self {
            ebit,
            revenue,
            known_price,
        }
    }

    /// EBIT as a percentage of Revenue.
    pub fn ebit_percentage(&self) -> Result<f64> {
        ebit_percentage(self.ebit, self.revenue)
    }
}

/// EBIT expressed as a percentage of Revenue, `(ebit / revenue) * 100`.
///
/// # Errors
/// `DivisionByZero` when `revenue` is zero.
pub fn ebit_percentage(ebit: f64, revenue: f64) -> Result<f64> {
    if revenue == 0.0 {
        return Err(ValuationError::division_by_zero("revenue"));
    }
    Ok((ebit / revenue) * 100.0)
}

/// Non-empty, ordered collection of calibration examples.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CalibrationSet {
    examples: Vec<CalibrationExample>,
}

impl CalibrationSet {
    /// Build a set from examples.
    ///
    /// # Errors
    /// `EmptyCalibrationSet` when `examples` is empty, `InvalidInput` when any
    /// field is not finite.
    pub fn new(examples: Vec<CalibrationExample>) -> Result<Self> {
        if examples.is_empty() {
            return Err(ValuationError::EmptyCalibrationSet);
        }
        if let Some((i, _)) = examples.iter().enumerate().find(|(_, ex)| {
            !(ex.ebit.is_finite() && ex.revenue.is_finite() && ex.known_price.is_finite())
        }) {
            return Err(ValuationError::invalid_input(format!(
                "calibration example {} has a non-finite field",
                i
            )));
        }
        Ok(Self { examples })
    }

    /// The three historical deals every valuation page is calibrated on.
    pub fn standard() -> Self {
        Self {
            examples: vec![
                CalibrationExample::new(230.0, 2300.0, 900.0),
                CalibrationExample::new(350.0, 3500.0, 1350.0),
                CalibrationExample::new(525.0, 5250.0, 2025.0),
            ],
        }
    }

    /// Examples in insertion order.
    pub fn examples(&self) -> &[CalibrationExample] {
        &self.examples
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Always false: a set holds at least one example.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Smallest EBIT in the set.
    pub fn min_ebit(&self) -> f64 {
        self.fold(|ex| ex.ebit, f64::min, f64::INFINITY)
    }

    /// Smallest Revenue in the set.
    pub fn min_revenue(&self) -> f64 {
        self.fold(|ex| ex.revenue, f64::min, f64::INFINITY)
    }

    /// Largest EBIT in the set.
    pub fn max_ebit(&self) -> f64 {
        self.fold(|ex| ex.ebit, f64::max, f64::NEG_INFINITY)
    }

    /// Largest Revenue in the set.
    pub fn max_revenue(&self) -> f64 {
        self.fold(|ex| ex.revenue, f64::max, f64::NEG_INFINITY)
    }

    fn fold(
        &self,
        field: impl Fn(&CalibrationExample) -> f64,
        op: fn(f64, f64) -> f64,
        init: f64,
    ) -> f64 {
        self.examples.iter().map(field).fold(init, op)
    }
}

impl Default for CalibrationSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CalibrationSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let examples = Vec::<CalibrationExample>::deserialize(deserializer)?;
        CalibrationSet::new(examples).map_err(serde::de::Error::custom)
    }
}

/// Calibrated scaling factor with per-example diagnostics.
///
/// `value` is the mean of `ratios`, where each ratio is an example's known
/// price divided by its naive estimate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalingFactor {
    /// Mean ratio of known price to naive estimate
    pub value: f64,
    /// Ratio per calibration example, in set order
    pub ratios: Vec<f64>,
}

impl ScalingFactor {
    /// Largest absolute deviation of any example ratio from the mean.
    pub fn max_deviation(&self) -> f64 {
        self.ratios
            .iter()
            .map(|r| (r - self.value).abs())
            .fold(0.0_f64, f64::max)
    }
}
