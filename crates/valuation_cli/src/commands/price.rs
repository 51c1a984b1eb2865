//! Price command implementation
//!
//! Prices a single company from EBIT and Revenue.

use tracing::info;
use valuation_core::math::rounding::Rounding;
use valuation_core::types::PriceResult;
use valuation_engine::pricing::{EnginePreset, PricingEngine};

use crate::config::CliConfig;
use crate::output::{self, money, percent, OutputFormat, Table};
use crate::Result;

/// Run the price command
pub fn run(
    config: &CliConfig,
    ebit: f64,
    revenue: f64,
    preset: Option<EnginePreset>,
    rounding: Option<Rounding>,
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let result = quote(config, ebit, revenue, preset, rounding)?;
    if result.is_constrained() {
        info!(
            "Price {} set by the {} (weighted price {:.4})",
            result.price, result.constraint, result.unconstrained_price
        );
    } else {
        info!("Price: {}", result.price);
    }

    print!("{}", render(&result, format)?);
    Ok(())
}

/// Price one company with the configured engine, optionally overriding the
/// preset and the rounding.
pub fn quote(
    config: &CliConfig,
    ebit: f64,
    revenue: f64,
    preset: Option<EnginePreset>,
    rounding: Option<Rounding>,
) -> Result<PriceResult> {
    let preset = preset.unwrap_or(config.pricing.preset);
    info!(
        "Pricing EBIT {} / Revenue {} with the {} preset",
        ebit, revenue, preset
    );

    let mut engine_config = config.engine_config(preset)?;
    if let Some(rounding) = rounding {
        engine_config = engine_config.with_rounding(rounding);
    }
    let engine = PricingEngine::new(engine_config)?;
    Ok(engine.price(ebit, revenue)?)
}

/// Render a price result.
pub fn render(result: &PriceResult, format: OutputFormat) -> Result<String> {
    let mut table = Table::new(["Item", "Value"]);
    table.push_row(["Price".to_string(), money(result.price)]);
    table.push_row([
        "Unconstrained price".to_string(),
        format!("{:.4}", result.unconstrained_price),
    ]);
    table.push_row([
        "EBIT %".to_string(),
        format!("{:.2}%", result.ebit_percentage),
    ]);
    table.push_row(["EBIT weight".to_string(), percent(result.weights.ebit_weight)]);
    table.push_row([
        "Revenue weight".to_string(),
        percent(result.weights.revenue_weight),
    ]);
    table.push_row([
        "Scaling factor".to_string(),
        format!("{:.6}", result.scaling_factor),
    ]);
    table.push_row(["Constraint".to_string(), result.constraint.to_string()]);
    table.push_row(["Constrained".to_string(), result.is_constrained().to_string()]);
    output::render(format, &table, result)
}
