//! Linear-regression valuation with payment and buy-back schedules.

pub mod config;
pub mod model;
pub mod schedule;

pub use config::{Anchor, LinearModelConfig};
pub use model::{LinearValuation, LinearValuationModel, RelationsTable};
pub use schedule::{BuyBackTable, PaymentBreakdown};
