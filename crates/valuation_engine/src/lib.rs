//! # Valuation Engine (L2: Business Logic)
//!
//! Company valuation from EBIT and Revenue.
//!
//! This crate provides:
//! - Piecewise EBIT/Revenue weight schedules (`weights`)
//! - Scaling factor calibration, price constraints and the pricing engine (`pricing`)
//! - Two-year earnout payment tables (`earnout`)
//! - The linear-regression valuation model with payment and buy-back tables (`linear`)
//! - A plain-text model explanation (`description`)
//!
//! ## Usage
//!
//! ```rust
//! use valuation_engine::pricing::{EnginePreset, PricingEngine};
//!
//! let engine = PricingEngine::from_preset(EnginePreset::Page).unwrap();
//! let result = engine.price(230.0, 2300.0).unwrap();
//! assert_eq!(result.price, 891.43);
//! assert_eq!(result.weights.revenue_weight, 0.7);
//! ```
//!
//! ## Design Principles
//!
//! - **Pure functions** underneath a calibrated engine value; no shared state
//! - **Data-driven schedules** so every published boundary variant is a preset
//! - **Domain errors** instead of `inf`/`NaN` on zero denominators

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod description;
pub mod earnout;
pub mod linear;
pub mod pricing;
pub mod weights;

pub use description::model_description;
