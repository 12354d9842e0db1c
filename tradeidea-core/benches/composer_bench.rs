//! Criterion benchmarks for TradeIdea hot paths.
//!
//! Benchmarks:
//! 1. Indicator calculators (EMA, MACD, RSI) over growing inputs
//! 2. Composer evaluation on a 30-bar window and on long histories
//! 3. Series fingerprinting

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tradeidea_core::data::SyntheticProvider;
use tradeidea_core::domain::PriceSeries;
use tradeidea_core::indicators::{compute_ema, compute_macd, compute_rsi, detect_bullish_engulfing};
use tradeidea_core::signals::SignalComposer;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

// ── 1. Indicators ────────────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for &bar_count in &[30, 252, 2520] {
        let closes = make_closes(bar_count);

        group.bench_with_input(BenchmarkId::new("ema_26", bar_count), &closes, |b, closes| {
            b.iter(|| compute_ema(black_box(closes), 26));
        });
        group.bench_with_input(BenchmarkId::new("macd", bar_count), &closes, |b, closes| {
            b.iter(|| compute_macd(black_box(closes)));
        });
        group.bench_with_input(BenchmarkId::new("rsi", bar_count), &closes, |b, closes| {
            b.iter(|| compute_rsi(black_box(closes)));
        });
    }

    let closes = make_closes(30);
    group.bench_function("engulfing", |b| {
        b.iter(|| detect_bullish_engulfing(black_box(&closes)));
    });

    group.finish();
}

// ── 2. Composer ──────────────────────────────────────────────────────

fn bench_composer(c: &mut Criterion) {
    let mut group = c.benchmark_group("composer");
    let composer = SignalComposer::default();

    // Only the trailing window is read, so long inputs should cost the same.
    for &bar_count in &[30, 2520] {
        let closes = make_closes(bar_count);
        group.bench_with_input(
            BenchmarkId::new("evaluate", bar_count),
            &closes,
            |b, closes| {
                b.iter(|| composer.evaluate(black_box("BENCH"), black_box(closes)));
            },
        );
    }

    let watchlist: Vec<(String, PriceSeries)> = (0..50)
        .map(|i| {
            let symbol = format!("SYM{i}");
            let series = SyntheticProvider::new(7).generate(&symbol);
            (symbol, series)
        })
        .collect();
    group.bench_function("watchlist_50", |b| {
        b.iter(|| {
            watchlist
                .iter()
                .filter_map(|(s, series)| composer.generate(s, series.as_slice()))
                .count()
        });
    });

    group.finish();
}

// ── 3. Fingerprint ───────────────────────────────────────────────────

fn bench_fingerprint(c: &mut Criterion) {
    let series = PriceSeries::new(make_closes(2520)).unwrap();
    c.bench_function("fingerprint_2520", |b| {
        b.iter(|| black_box(&series).fingerprint());
    });
}

criterion_group!(benches, bench_indicators, bench_composer, bench_fingerprint);
criterion_main!(benches);
