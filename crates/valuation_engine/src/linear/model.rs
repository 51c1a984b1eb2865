//! Linear valuation model.
//!
//! Two least-squares lines are fitted through the reference deals, one on
//! EBIT and one on Revenue; a valuation is the average of both lines,
//! bounded by the configured ceilings and floor. Thin-margin companies
//! (EBIT/Revenue below the threshold) are additionally capped at a fixed
//! EBIT multiple.

use tracing::{debug, info};
use valuation_core::math::regression::{fit_line, Line};
use valuation_core::math::rounding::round_to;
use valuation_core::types::Result;

use super::config::LinearModelConfig;
use super::schedule::{BuyBackTable, PaymentBreakdown};

/// Valuation with its headline ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LinearValuation {
    /// Whole-number valuation
    pub valuation: i64,
    /// EBIT / Revenue (0 when Revenue is 0)
    pub ebit_ratio: f64,
    /// Valuation / EBIT, two decimals (0 when EBIT is 0)
    pub ebit_multiple: f64,
    /// Valuation / (EBIT + seller income), two decimals
    pub sdi_multiple: f64,
    /// True when an anchor matched the inputs
    pub anchored: bool,
}

/// The anchor grid over `0 ∪ ebit_values` × `0 ∪ revenue_values`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RelationsTable {
    /// Column keys
    pub revenues: Vec<f64>,
    /// Row keys
    pub ebits: Vec<f64>,
    /// `values[row][column]`, 0 where no anchor exists
    pub values: Vec<Vec<f64>>,
}

/// Fitted linear valuation model.
#[derive(Debug, Clone)]
pub struct LinearValuationModel {
    config: LinearModelConfig,
    ebit_line: Line,
    revenue_line: Line,
}

impl LinearValuationModel {
    /// Fit both lines.
    ///
    /// # Errors
    /// Config validation errors, or `DivisionByZero` when the reference EBIT
    /// or Revenue values are all equal.
    pub fn new(config: LinearModelConfig) -> Result<Self> {
        config.validate()?;
        let ebit_line = fit_line(&config.ebit_values, &config.valuation_values)?;
        let revenue_line = fit_line(&config.revenue_values, &config.valuation_values)?;
        info!(
            ebit_slope = ebit_line.slope,
            revenue_slope = revenue_line.slope,
            "Fitted linear valuation model"
        );
        Ok(Self {
            config,
            ebit_line,
            revenue_line,
        })
    }

    /// Model configuration.
    pub fn config(&self) -> &LinearModelConfig {
        &self.config
    }

    /// Fitted valuation-on-EBIT line.
    pub fn ebit_line(&self) -> Line {
        self.ebit_line
    }

    /// Fitted valuation-on-Revenue line.
    pub fn revenue_line(&self) -> Line {
        self.revenue_line
    }

    /// Whole-number valuation of a company.
    ///
    /// # Examples
    /// ```
    /// use valuation_engine::linear::{LinearModelConfig, LinearValuationModel};
    ///
    /// let model = LinearValuationModel::new(LinearModelConfig::default()).unwrap();
    /// assert_eq!(model.valuation(300.0, 3000.0), 1121);
    /// assert_eq!(model.valuation(220.0, 2200.0), 800);
    /// ```
    pub fn valuation(&self, ebit: f64, revenue: f64) -> i64 {
        if let Some(anchor) = self.config.anchor_for(ebit, revenue) {
            return anchor.valuation as i64;
        }

        let ebit = ebit.min(self.config.ebit_ceiling);
        let revenue = revenue.min(self.config.revenue_ceiling);
        let mut valuation = (self.ebit_line.eval(ebit) + self.revenue_line.eval(revenue)) / 2.0;

        if ratio(ebit, revenue) < self.config.ebit_ratio_threshold {
            valuation = valuation.min(self.config.valuation_multiplier * ebit);
        }

        let bounded = valuation.min(self.config.valuation_ceiling).trunc();
        bounded.max(self.config.valuation_floor) as i64
    }

    /// Valuation plus EBIT ratio and multiples.
    pub fn evaluate(&self, ebit: f64, revenue: f64) -> LinearValuation {
        let valuation = self.valuation(ebit, revenue);
        let value = valuation as f64;
        let sdi_base = ebit + self.config.seller_income;

        let result = LinearValuation {
            valuation,
            ebit_ratio: ratio(ebit, revenue),
            ebit_multiple: if ebit != 0.0 {
                round_to(value / ebit, 2)
            } else {
                0.0
            },
            sdi_multiple: if sdi_base != 0.0 {
                round_to(value / sdi_base, 2)
            } else {
                0.0
            },
            anchored: self.config.anchor_for(ebit, revenue).is_some(),
        };
        debug!(ebit, revenue, valuation, "Linear valuation");
        result
    }

    /// Payment breakdown of `valuation` against the base price.
    pub fn breakdown(&self, valuation: i64) -> PaymentBreakdown {
        PaymentBreakdown::new(valuation, self.config.base_price)
    }

    /// Buy-back table for `ebit` and a payment breakdown.
    pub fn buy_back(&self, ebit: f64, breakdown: &PaymentBreakdown) -> BuyBackTable {
        BuyBackTable::new(ebit, self.config.seller_income, breakdown)
    }

    /// Anchor grid over the reference EBIT and Revenue values.
    pub fn relations_table(&self) -> RelationsTable {
        let with_zero = |values: &[f64]| {
            std::iter::once(0.0)
                .chain(values.iter().copied())
                .collect::<Vec<f64>>()
        };
        let ebits = with_zero(&self.config.ebit_values);
        let revenues = with_zero(&self.config.revenue_values);

        let values = ebits
            .iter()
            .map(|&e| {
                revenues
                    .iter()
                    .map(|&r| {
                        self.config
                            .anchor_for(e, r)
                            .map(|a| a.valuation)
                            .unwrap_or(0.0)
                    })
                    .collect()
            })
            .collect();

        RelationsTable {
            revenues,
            ebits,
            values,
        }
    }
}

fn ratio(ebit: f64, revenue: f64) -> f64 {
    if revenue != 0.0 {
        ebit / revenue
    } else {
        0.0
    }
}
