//! EBIT/Revenue weight pair.

use super::error::{Result, ValuationError};

/// Tolerance used when checking that weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative weights applied to EBIT and Revenue when blending a price.
///
/// Both weights are non-negative and sum to 1.0.
///
/// # Examples
/// ```
/// use valuation_core::types::WeightPair;
///
/// let w = WeightPair::new(0.3, 0.7).unwrap();
/// assert_eq!(w.blend(230.0, 2300.0), 0.3 * 230.0 + 0.7 * 2300.0);
/// assert!(WeightPair::new(0.5, 0.6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WeightPair {
    /// Weight applied to EBIT
    pub ebit_weight: f64,
    /// Weight applied to Revenue
    pub revenue_weight: f64,
}

impl WeightPair {
    /// The weights of the naive linear estimate used for calibration.
    pub const NAIVE: WeightPair = WeightPair {
        ebit_weight: 0.3,
        revenue_weight: 0.7,
    };

    /// Create a validated weight pair.
    ///
    /// # Errors
    /// `InvalidWeights` if either weight is negative or non-finite, or the sum
    /// differs from 1.0 by more than [`WEIGHT_SUM_TOLERANCE`].
    pub fn new(ebit_weight: f64, revenue_weight: f64) -> Result<Self> {
        let valid = ebit_weight.is_finite()
            && revenue_weight.is_finite()
            && ebit_weight >= 0.0
            && revenue_weight >= 0.0
            && (ebit_weight + revenue_weight - 1.0).abs() <= WEIGHT_SUM_TOLERANCE;
        if !valid {
            return Err(ValuationError::InvalidWeights {
                ebit_weight,
                revenue_weight,
            });
        }
        Ok(Self {
            ebit_weight,
            revenue_weight,
        })
    }

    /// Weighted combination `ebit_weight * ebit + revenue_weight * revenue`.
    #[inline]
    pub fn blend(&self, ebit: f64, revenue: f64) -> f64 {
        self.ebit_weight * ebit + self.revenue_weight * revenue
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for WeightPair {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            ebit_weight: f64,
            revenue_weight: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        WeightPair::new(raw.ebit_weight, raw.revenue_weight).map_err(serde::de::Error::custom)
    }
}
