//! Earnout command implementation
//!
//! Prices two consecutive years and lays out the resulting earnout payments.

use tracing::info;
use valuation_engine::earnout::EarnoutTable;
use valuation_engine::pricing::PricingEngine;

use crate::config::CliConfig;
use crate::output::{self, OutputFormat, Table};
use crate::Result;

/// Run the earnout command
pub fn run(
    config: &CliConfig,
    year1: (f64, f64),
    year2: (f64, f64),
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    info!("Building earnout table with the {} preset", config.earnout.preset);

    let engine = PricingEngine::new(config.engine_config(config.earnout.preset)?)?;
    let table = EarnoutTable::compute(&engine, year1, year2, &config.earnout.terms)?;
    info!(
        "Year 1 price {}, year 2 price {}",
        table.price_year1, table.price_year2
    );

    print!("{}", render(&table, format)?);
    Ok(())
}

/// Render an earnout table.
pub fn render(earnout: &EarnoutTable, format: OutputFormat) -> Result<String> {
    let mut table = Table::new(std::iter::once("").chain(EarnoutTable::HEADERS));
    for row in &earnout.rows {
        table.push_row([
            row.label.clone(),
            format!("{:.0}", row.initial_price),
            format!("{:.0}", row.earnout_year1),
            format!("{:.0}", row.earnout_year2),
            format!("{:.0}", row.total),
        ]);
    }
    output::render(format, &table, earnout)
}
