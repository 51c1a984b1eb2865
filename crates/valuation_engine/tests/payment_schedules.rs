//! End-to-end tests for the earnout table and the linear model schedules.

use valuation_engine::earnout::{EarnoutTable, EarnoutTerms};
use valuation_engine::linear::{LinearModelConfig, LinearValuationModel};
use valuation_engine::pricing::{EnginePreset, PricingEngine};

#[test]
fn test_earnout_table_for_default_inputs() {
    let engine = PricingEngine::from_preset(EnginePreset::Earnout).unwrap();
    let table = EarnoutTable::compute(
        &engine,
        (230.0, 2300.0),
        (350.0, 3500.0),
        &EarnoutTerms::default(),
    )
    .unwrap();

    let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Year 0", "Year 1", "Year 2", "Total"]);

    let year2 = &table.rows[2];
    assert_eq!(year2.initial_price, 300.0);
    assert_eq!(year2.earnout_year1, 0.0);
    assert_eq!(year2.earnout_year2, 457.0);
    assert_eq!(year2.total, 757.0);

    // Every row but the last sums across its payment columns
    for row in &table.rows[..3] {
        assert_eq!(
            row.total,
            row.initial_price + row.earnout_year1 + row.earnout_year2
        );
    }
}

#[test]
fn test_earnout_zero_revenue_propagates_error() {
    let engine = PricingEngine::from_preset(EnginePreset::Earnout).unwrap();
    let result = EarnoutTable::compute(
        &engine,
        (230.0, 0.0),
        (350.0, 3500.0),
        &EarnoutTerms::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_linear_model_full_report() {
    let model = LinearValuationModel::new(LinearModelConfig::default()).unwrap();
    let valuation = model.evaluate(300.0, 3000.0);
    let breakdown = model.breakdown(valuation.valuation);
    let buy_back = model.buy_back(300.0, &breakdown);

    assert_eq!(valuation.valuation, 1121);
    assert_eq!(breakdown.rows()[2].1, [400, 560, 160, 1121]);
    assert_eq!(buy_back.cumulative_payments[3], 1120.0);
    assert_eq!(buy_back.final_position(), 220.0);
}

#[test]
fn test_linear_model_floor_valuation_pays_less_than_base() {
    let model = LinearValuationModel::new(LinearModelConfig::default()).unwrap();
    let valuation = model.valuation(100.0, 2000.0);
    assert_eq!(valuation, 750);

    let breakdown = model.breakdown(valuation);
    assert_eq!(breakdown.difference, -50);
    assert_eq!(breakdown.totals(), [400, 375, -25]);
}
