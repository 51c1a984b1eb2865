//! Numeric helpers.
//!
//! - `rounding`: Half-to-even price rounding
//! - `regression`: Least-squares line fitting and means

pub mod regression;
pub mod rounding;

pub use regression::{fit_line, mean, Line};
pub use rounding::{round_to, Rounding};
