//! Price result with diagnostics.

use super::weights::WeightPair;

/// Which price constraint, if any, determined the final price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintOutcome {
    /// The weighted price was used as-is.
    #[default]
    Unconstrained,
    /// The price was capped at the ceiling.
    Capped,
    /// The price was raised to the protected floor.
    ProtectedFloor,
    /// The price was raised to the hard floor.
    Floored,
}

impl std::fmt::Display for ConstraintOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintOutcome::Unconstrained => write!(f, "unconstrained"),
            ConstraintOutcome::Capped => write!(f, "capped"),
            ConstraintOutcome::ProtectedFloor => write!(f, "protected floor"),
            ConstraintOutcome::Floored => write!(f, "floored"),
        }
    }
}

/// Computed price plus the intermediate values that produced it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceResult {
    /// Final price after constraints and rounding
    pub price: f64,
    /// Weighted, scaled price before constraints and rounding
    pub unconstrained_price: f64,
    /// EBIT as a percentage of Revenue
    pub ebit_percentage: f64,
    /// Weights selected for `ebit_percentage`
    pub weights: WeightPair,
    /// Scaling factor applied to the weighted price
    pub scaling_factor: f64,
    /// Constraint that determined `price`
    pub constraint: ConstraintOutcome,
}

impl PriceResult {
    /// True when a floor or ceiling changed the price.
    pub fn is_constrained(&self) -> bool {
        self.constraint != ConstraintOutcome::Unconstrained
    }
}
