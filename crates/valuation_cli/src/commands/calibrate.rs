//! Calibrate command implementation
//!
//! Derives the scaling factor from the configured calibration examples and
//! reports the ratio each example contributes.

use serde::Serialize;
use tracing::{info, warn};
use valuation_core::types::{CalibrationExample, CalibrationSet, ScalingFactor, WeightPair};
use valuation_engine::pricing::calibrate;

use crate::config::CliConfig;
use crate::output::{self, money, OutputFormat, Table};
use crate::Result;

/// Relative spread of example ratios above which calibration is reported as
/// inconsistent.
const RATIO_SPREAD_WARNING: f64 = 0.05;

/// Calibration examples with the factor derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationReport {
    /// Examples, in configuration order
    pub examples: Vec<CalibrationExample>,
    /// Resulting factor
    pub scaling_factor: ScalingFactor,
}

impl CalibrationReport {
    /// Calibrate `set`.
    pub fn build(set: &CalibrationSet) -> Result<Self> {
        let scaling_factor = calibrate(set)?;
        Ok(Self {
            examples: set.examples().to_vec(),
            scaling_factor,
        })
    }
}

/// Run the calibrate command
pub fn run(config: &CliConfig, format: &str, output: Option<&str>) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let engine_config = config.engine_config(config.pricing.preset)?;
    info!("Calibrating on {} examples", engine_config.calibration.len());

    let report = CalibrationReport::build(&engine_config.calibration)?;
    let factor = &report.scaling_factor;
    if factor.max_deviation() > RATIO_SPREAD_WARNING * factor.value {
        warn!(
            "Calibration ratios deviate by up to {:.4} from the mean {:.6}",
            factor.max_deviation(),
            factor.value
        );
    }

    if let Some(path) = output {
        info!("Writing scaling factor to: {}", path);
        std::fs::write(path, serde_json::to_string_pretty(factor)?)?;
    }

    print!("{}", render(&report, format)?);
    info!("Calibration complete");
    Ok(())
}

/// Render a calibration report.
pub fn render(report: &CalibrationReport, format: OutputFormat) -> Result<String> {
    let mut table = Table::new(["Example", "EBIT", "Revenue", "Known Price", "Naive", "Ratio"]);
    for (i, (example, ratio)) in report
        .examples
        .iter()
        .zip(&report.scaling_factor.ratios)
        .enumerate()
    {
        table.push_row([
            format!("#{}", i + 1),
            money(example.ebit),
            money(example.revenue),
            money(example.known_price),
            money(WeightPair::NAIVE.blend(example.ebit, example.revenue)),
            format!("{:.6}", ratio),
        ]);
    }
    table.push_row([
        "Scaling factor".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.6}", report.scaling_factor.value),
    ]);
    output::render(format, &table, report)
}
