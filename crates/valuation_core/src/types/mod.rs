//! Valuation data model.
//!
//! This module provides:
//! - `calibration`: Calibration examples, calibration sets and the scaling factor
//! - `weights`: EBIT/Revenue weight pair
//! - `result`: Price result with diagnostics
//! - `error`: Structured error type shared by every valuation crate
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod calibration;
pub mod error;
pub mod result;
pub mod weights;

pub use calibration::{ebit_percentage, CalibrationExample, CalibrationSet, ScalingFactor};
pub use error::{Result, ValuationError};
pub use result::{ConstraintOutcome, PriceResult};
pub use weights::WeightPair;
