//! Earnout payment schedule.
//!
//! The deal pays a fixed initial price in three equal instalments (years
//! 0, 1 and 2). On top of that:
//! - the Year-1 earnout is the Year-1 price above the full initial price,
//!   paid in two halves in years 1 and 2;
//! - the Year-2 earnout is the Year-2 price above the Year-1 price, paid in
//!   year 2.

use tracing::debug;
use valuation_core::math::rounding::Rounding;
use valuation_core::types::{Result, ValuationError};

use crate::pricing::PricingEngine;

/// Number of initial-price instalments (years 0, 1 and 2).
pub const INSTALMENTS: u32 = 3;

/// Commercial terms of the earnout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EarnoutTerms {
    /// Amount of each initial-price instalment
    pub initial_payment: f64,
}

impl Default for EarnoutTerms {
    fn default() -> Self {
        Self {
            initial_payment: 300.0,
        }
    }
}

impl EarnoutTerms {
    /// Full initial price, all instalments together.
    pub fn initial_price(&self) -> f64 {
        self.initial_payment * f64::from(INSTALMENTS)
    }

    /// Check the instalment is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_payment.is_finite() || self.initial_payment < 0.0 {
            return Err(ValuationError::invalid_input(format!(
                "initial payment must be finite and non-negative, got {}",
                self.initial_payment
            )));
        }
        Ok(())
    }
}

/// One row of the earnout table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EarnoutRow {
    /// Row label (`Year 0`, ..., `Total`)
    pub label: String,
    /// Initial-price payment
    pub initial_price: f64,
    /// Year-1 earnout payment
    pub earnout_year1: f64,
    /// Year-2 earnout payment
    pub earnout_year2: f64,
    /// Row total
    pub total: f64,
}

impl EarnoutRow {
    fn new(
        label: &str,
        initial_price: f64,
        earnout_year1: f64,
        earnout_year2: f64,
        total: f64,
    ) -> Self {
        Self {
            label: label.to_string(),
            initial_price,
            earnout_year1,
            earnout_year2,
            total,
        }
    }
}

/// Payment table for a two-year earnout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EarnoutTable {
    /// Year-1 price the table was built from
    pub price_year1: f64,
    /// Year-2 price the table was built from
    pub price_year2: f64,
    /// `Year 0`, `Year 1`, `Year 2` and `Total`
    pub rows: Vec<EarnoutRow>,
}

impl EarnoutTable {
    /// Column headers, in row field order.
    pub const HEADERS: [&'static str; 4] =
        ["Initial Price", "Earnout Year 1", "Earnout Year 2", "TOTAL"];

    /// Build the table from the two yearly prices.
    ///
    /// # Examples
    /// ```
    /// use valuation_engine::earnout::{EarnoutTable, EarnoutTerms};
    ///
    /// let table = EarnoutTable::from_prices(900.0, 1357.0, &EarnoutTerms::default());
    /// let total = table.total();
    /// assert_eq!(total.initial_price, 900.0);
    /// assert_eq!(total.earnout_year2, 457.0);
    /// assert_eq!(total.total, 1357.0);
    /// ```
    pub fn from_prices(price_year1: f64, price_year2: f64, terms: &EarnoutTerms) -> Self {
        let initial = terms.initial_payment;
        let year1_earnout = price_year1 - terms.initial_price();
        let year2_earnout = Rounding::Integer.apply(price_year2 - price_year1);
        let year1_split = Rounding::Integer.apply(year1_earnout / 2.0);
        let year1_earnout = Rounding::Integer.apply(year1_earnout);

        let rows = vec![
            EarnoutRow::new("Year 0", initial, 0.0, 0.0, initial),
            EarnoutRow::new("Year 1", initial, year1_split, 0.0, initial + year1_split),
            EarnoutRow::new(
                "Year 2",
                initial,
                year1_split,
                year2_earnout,
                initial + year1_split + year2_earnout,
            ),
            EarnoutRow::new(
                "Total",
                terms.initial_price(),
                year1_split * 2.0,
                year2_earnout,
                terms.initial_price() + year1_earnout + year2_earnout,
            ),
        ];

        debug!(price_year1, price_year2, "Built earnout table");
        Self {
            price_year1,
            price_year2,
            rows,
        }
    }

    /// Price both years with `engine` and build the table.
    pub fn compute(
        engine: &PricingEngine,
        year1: (f64, f64),
        year2: (f64, f64),
        terms: &EarnoutTerms,
    ) -> Result<Self> {
        terms.validate()?;
        let price1 = engine.price(year1.0, year1.1)?.price;
        let price2 = engine.price(year2.0, year2.1)?.price;
        Ok(Self::from_prices(price1, price2, terms))
    }

    /// The `Total` row.
    pub fn total(&self) -> &EarnoutRow {
        &self.rows[self.rows.len() - 1]
    }
}
