//! Check command implementation
//!
//! Confirms the configuration builds working engines and prints the
//! effective settings.

use std::fmt::Write;
use std::path::Path;

use tracing::info;
use valuation_engine::linear::LinearValuationModel;
use valuation_engine::pricing::PricingEngine;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig, path: &Path) -> Result<()> {
    info!("Checking configuration...");
    print!("{}", render(config, path)?);
    info!("Configuration OK");
    Ok(())
}

/// Build every engine the configuration describes and report on them.
pub fn render(config: &CliConfig, path: &Path) -> Result<String> {
    let mut out = String::new();
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    // Writing to a String cannot fail
    let _ = writeln!(out, "Configuration: {}", source);

    for (label, preset) in [
        ("pricing", config.pricing.preset),
        ("earnout", config.earnout.preset),
    ] {
        let engine = PricingEngine::new(config.engine_config(preset)?)?;
        let _ = writeln!(
            out,
            "  {} engine ({}): scaling factor {:.6} over {} examples",
            label,
            preset,
            engine.scaling_factor().value,
            engine.config().calibration.len()
        );
    }

    let model = LinearValuationModel::new(config.linear.clone())?;
    let _ = writeln!(
        out,
        "  linear model: EBIT slope {:.6}, Revenue slope {:.6}",
        model.ebit_line().slope,
        model.revenue_line().slope
    );

    let _ = writeln!(out, "\n{}", toml::to_string(config)?);
    Ok(out)
}
