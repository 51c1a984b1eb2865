//! Pricing: scaling factor calibration, price constraints and the engine.
//!
//! - `scaling`: Mean known-price / naive-estimate ratio over calibration examples
//! - `constraints`: Ceiling, floor and protected floor
//! - `engine`: [`compute_price`] and the calibrated [`PricingEngine`]

pub mod constraints;
pub mod engine;
pub mod scaling;

pub use constraints::{variation, PriceConstraints, ProtectedFloor};
pub use engine::{compute_price, EngineConfig, EnginePreset, PricingEngine};
pub use scaling::{calibrate, compute_scaling_factor, compute_scaling_factor_with};
