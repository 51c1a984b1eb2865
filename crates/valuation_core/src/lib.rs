//! # valuation_core: Foundation for the Company Valuation Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! valuation_core is the bottom layer of the workspace, providing:
//! - Calibration examples and sets (`types::calibration`)
//! - EBIT/Revenue weight pairs (`types::weights`)
//! - Price results with diagnostics (`types::result`)
//! - Error type: `ValuationError` (`types::error`)
//! - Rounding and least-squares helpers (`math`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other valuation_* crates:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional, default on)
//!
//! ## Usage Examples
//!
//! ```rust
//! use valuation_core::math::rounding::Rounding;
//! use valuation_core::types::{CalibrationSet, WeightPair};
//!
//! let set = CalibrationSet::standard();
//! assert_eq!(set.min_ebit(), 230.0);
//!
//! let naive = WeightPair::NAIVE.blend(230.0, 2300.0);
//! assert_eq!(Rounding::Cents.apply(naive), 1679.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for the data model

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
