//! Error types for structured error handling.
//!
//! This module provides:
//! - `ValuationError`: Errors from calibration, weighting and pricing operations
//! - `Result`: Convenience alias used across the valuation crates

use thiserror::Error;

/// Result type for valuation operations.
pub type Result<T> = std::result::Result<T, ValuationError>;

/// Categorised valuation errors.
///
/// Every arithmetic step that would otherwise divide by zero reports a
/// `DivisionByZero` with the name of the quantity involved, so callers can
/// surface a precise message instead of propagating `inf`/`NaN`.
///
/// # Examples
/// ```
/// use valuation_core::types::ValuationError;
///
/// let err = ValuationError::DivisionByZero("revenue".to_string());
/// assert_eq!(format!("{}", err), "Division by zero: revenue");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValuationError {
    /// A denominator evaluated to zero.
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// Calibration requires at least one example.
    #[error("Calibration set is empty")]
    EmptyCalibrationSet,

    /// Weight pair does not sum to one or holds a negative weight.
    #[error("Invalid weights ({ebit_weight}, {revenue_weight}): must be non-negative and sum to 1")]
    InvalidWeights {
        /// Weight applied to EBIT
        ebit_weight: f64,
        /// Weight applied to Revenue
        revenue_weight: f64,
    },

    /// Price constraints are inconsistent (e.g. floor above ceiling).
    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ValuationError {
    /// Create a division-by-zero error naming the zero quantity.
    pub fn division_by_zero(what: impl Into<String>) -> Self {
        Self::DivisionByZero(what.into())
    }

    /// Create an invalid-input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid-constraint error.
    pub fn invalid_constraint(msg: impl Into<String>) -> Self {
        Self::InvalidConstraint(msg.into())
    }
}
