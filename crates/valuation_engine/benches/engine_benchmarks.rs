//! Criterion benchmarks for valuation_engine.
//!
//! Measures calibration, single quotes and a sweep across EBIT margins for
//! each engine preset.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use valuation_core::types::CalibrationSet;
use valuation_engine::linear::{LinearModelConfig, LinearValuationModel};
use valuation_engine::pricing::{compute_scaling_factor, EnginePreset, PricingEngine};

/// Benchmark scaling factor calibration.
fn bench_calibration(c: &mut Criterion) {
    let set = CalibrationSet::standard();
    c.bench_function("compute_scaling_factor", |b| {
        b.iter(|| compute_scaling_factor(black_box(set.examples())).unwrap());
    });
}

/// Benchmark quotes for each preset.
fn bench_price(c: &mut Criterion) {
    let mut group = c.benchmark_group("price");

    for preset in [EnginePreset::Page, EnginePreset::Earnout] {
        let engine = PricingEngine::from_preset(preset).unwrap();

        group.bench_with_input(
            BenchmarkId::new("single", preset),
            &engine,
            |b, engine| {
                b.iter(|| engine.price(black_box(350.0), black_box(3500.0)).unwrap());
            },
        );

        // One quote per EBIT margin from 0% to 99%
        group.bench_with_input(BenchmarkId::new("margin_sweep", preset), &engine, |b, engine| {
            b.iter(|| {
                for pct in 0..100 {
                    let _ = engine.price(black_box(pct as f64 * 10.0), black_box(1000.0));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark the linear model fit and evaluation.
fn bench_linear(c: &mut Criterion) {
    c.bench_function("linear_fit", |b| {
        b.iter(|| LinearValuationModel::new(black_box(LinearModelConfig::default())).unwrap());
    });

    let model = LinearValuationModel::new(LinearModelConfig::default()).unwrap();
    c.bench_function("linear_evaluate", |b| {
        b.iter(|| model.evaluate(black_box(300.0), black_box(3000.0)));
    });
}

criterion_group!(benches, bench_calibration, bench_price, bench_linear);
criterion_main!(benches);
