//! Linear valuation model configuration.

use valuation_core::types::{Result, ValuationError};

/// A known `(ebit, revenue) -> valuation` deal returned verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    /// EBIT of the deal
    pub ebit: f64,
    /// Revenue of the deal
    pub revenue: f64,
    /// Agreed valuation
    pub valuation: f64,
}

impl Anchor {
    /// Create an anchor.
    pub fn new(ebit: f64, revenue: f64, valuation: f64) -> Self {
        Self {
            ebit,
            revenue,
            valuation,
        }
    }
}

/// Parameters of the linear valuation model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinearModelConfig {
    /// EBIT of the reference deals
    pub ebit_values: Vec<f64>,
    /// Revenue of the reference deals
    pub revenue_values: Vec<f64>,
    /// Valuation of the reference deals
    pub valuation_values: Vec<f64>,
    /// Seller's discretionary income added back for the SDI multiple
    pub seller_income: f64,
    /// Guaranteed base price
    pub base_price: f64,
    /// Maximum valuation
    pub valuation_ceiling: f64,
    /// Minimum valuation
    pub valuation_floor: f64,
    /// EBIT is clamped to this before valuation
    pub ebit_ceiling: f64,
    /// Revenue is clamped to this before valuation
    pub revenue_ceiling: f64,
    /// Deals returned verbatim on an exact input match
    pub anchors: Vec<Anchor>,
    /// Below this EBIT/Revenue ratio the valuation is capped by the multiplier
    pub ebit_ratio_threshold: f64,
    /// EBIT multiple applied below the ratio threshold
    pub valuation_multiplier: f64,
}

impl Default for LinearModelConfig {
    fn default() -> Self {
        Self {
            ebit_values: vec![220.0, 350.0, 550.0],
            revenue_values: vec![2200.0, 3500.0, 5500.0],
            valuation_values: vec![800.0, 1350.0, 2020.0],
            seller_income: 220.0,
            base_price: 800.0,
            valuation_ceiling: 2020.0,
            valuation_floor: 750.0,
            ebit_ceiling: 750.0,
            revenue_ceiling: 5500.0,
            anchors: vec![
                Anchor::new(0.0, 0.0, 750.0),
                Anchor::new(220.0, 2200.0, 800.0),
                Anchor::new(350.0, 3500.0, 1350.0),
                Anchor::new(550.0, 5500.0, 2020.0),
            ],
            ebit_ratio_threshold: 0.09,
            valuation_multiplier: 3.7,
        }
    }
}

impl LinearModelConfig {
    /// Validate lengths and bounds.
    pub fn validate(&self) -> Result<()> {
        let n = self.valuation_values.len();
        if self.ebit_values.len() != n || self.revenue_values.len() != n {
            return Err(ValuationError::invalid_input(format!(
                "reference deals need matching lengths: {} EBIT, {} Revenue, {} valuations",
                self.ebit_values.len(),
                self.revenue_values.len(),
                n
            )));
        }
        if self.valuation_floor > self.valuation_ceiling {
            return Err(ValuationError::invalid_constraint(format!(
                "valuation floor {} exceeds ceiling {}",
                self.valuation_floor, self.valuation_ceiling
            )));
        }
        Ok(())
    }

    /// Anchored valuation for an exact input match.
    pub fn anchor_for(&self, ebit: f64, revenue: f64) -> Option<&Anchor> {
        self.anchors
            .iter()
            .find(|a| a.ebit == ebit && a.revenue == revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LinearModelConfig::default().validate().is_ok());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let config = LinearModelConfig {
            revenue_values: vec![1.0],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValuationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_floor_above_ceiling_rejected() {
        let config = LinearModelConfig {
            valuation_floor: 3000.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_anchor_lookup() {
        let config = LinearModelConfig::default();
        assert_eq!(config.anchor_for(350.0, 3500.0).unwrap().valuation, 1350.0);
        assert!(config.anchor_for(350.0, 3501.0).is_none());
    }
}
