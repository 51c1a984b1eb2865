//! Linear command implementation
//!
//! Values a company with the linear model and shows how the valuation is
//! paid out and bought back.

use serde::Serialize;
use tracing::info;
use valuation_engine::linear::{
    BuyBackTable, LinearValuation, LinearValuationModel, PaymentBreakdown, RelationsTable,
};

use crate::config::CliConfig;
use crate::output::{render_all, OutputFormat, Table};
use crate::Result;

/// Everything the linear command reports.
#[derive(Debug, Clone, Serialize)]
pub struct LinearReport {
    /// Valuation and multiples
    pub valuation: LinearValuation,
    /// Payment split against the base price
    pub breakdown: PaymentBreakdown,
    /// Seller earnings against payments
    pub buy_back: BuyBackTable,
    /// Anchor grid, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<RelationsTable>,
}

impl LinearReport {
    /// Evaluate `model` for one company.
    pub fn build(model: &LinearValuationModel, ebit: f64, revenue: f64, relations: bool) -> Self {
        let valuation = model.evaluate(ebit, revenue);
        let breakdown = model.breakdown(valuation.valuation);
        let buy_back = model.buy_back(ebit, &breakdown);
        Self {
            valuation,
            breakdown,
            buy_back,
            relations: relations.then(|| model.relations_table()),
        }
    }
}

/// Run the linear command
pub fn run(
    config: &CliConfig,
    ebit: f64,
    revenue: f64,
    relations: bool,
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let model = LinearValuationModel::new(config.linear.clone())?;
    let report = LinearReport::build(&model, ebit, revenue, relations);
    let v = &report.valuation;
    info!(
        "Linear valuation {} (EBIT multiple {}, SDI multiple {})",
        v.valuation, v.ebit_multiple, v.sdi_multiple
    );
    print!("{}", render(&report, format)?);
    Ok(())
}

/// Render a linear report.
pub fn render(report: &LinearReport, format: OutputFormat) -> Result<String> {
    let v = &report.valuation;
    let mut summary = Table::new(["Item", "Value"]);
    summary.push_row(["Valuation".to_string(), v.valuation.to_string()]);
    summary.push_row(["EBIT / Revenue".to_string(), format!("{:.4}", v.ebit_ratio)]);
    summary.push_row(["EBIT multiple".to_string(), format!("{:.2}", v.ebit_multiple)]);
    summary.push_row(["SDI multiple".to_string(), format!("{:.2}", v.sdi_multiple)]);
    summary.push_row(["Anchored".to_string(), v.anchored.to_string()]);

    let mut breakdown = Table::new(std::iter::once("Payments").chain(PaymentBreakdown::HEADERS));
    for (label, cells) in report.breakdown.rows() {
        breakdown.push_row(
            std::iter::once(label.to_string()).chain(cells.map(|c| c.to_string())),
        );
    }

    let mut buy_back = Table::new(std::iter::once("Buy-back").chain(BuyBackTable::HEADERS));
    for (label, cells) in report.buy_back.rows() {
        buy_back.push_row(
            std::iter::once(label.to_string()).chain(cells.map(|c| format!("{:.0}", c))),
        );
    }

    let mut tables = vec![summary, breakdown, buy_back];
    if let Some(relations) = &report.relations {
        let mut grid = Table::new(
            std::iter::once("EBIT \\ Revenue".to_string())
                .chain(relations.revenues.iter().map(|r| format!("{:.0}", r))),
        );
        for (ebit, row) in relations.ebits.iter().zip(&relations.values) {
            grid.push_row(
                std::iter::once(format!("{:.0}", ebit))
                    .chain(row.iter().map(|value| format!("{:.0}", value))),
            );
        }
        tables.push(grid);
    }
    render_all(format, &tables, report)
}
