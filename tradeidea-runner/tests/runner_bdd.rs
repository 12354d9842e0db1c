//! BDD tests for the analysis runner
//!
//! These tests verify:
//! - Config-driven analysis from local CSV files
//! - Parallel watchlist fan-out with per-symbol failures
//! - Determinism of synthetic runs across thread counts
//! - Report serialization

use std::fs;
use std::path::Path;

use tradeidea_core::data::{DataSource, InMemoryProvider};
use tradeidea_core::signals::SignalComposer;
use tradeidea_runner::{
    analyze_many, analyze_symbol, build_provider, AnalysisConfig, AnalysisReport, RunError,
};

fn golden_closes() -> Vec<f64> {
    let mut prices: Vec<f64> = (0..29).map(|i| 100.0 - i as f64).collect();
    prices.push(78.0);
    prices
}

fn write_closes(dir: &Path, symbol: &str, closes: &[f64]) {
    let mut body = String::from("close\n");
    for c in closes {
        body.push_str(&format!("{c}\n"));
    }
    fs::write(dir.join(format!("{symbol}.csv")), body).unwrap();
}

#[test]
fn bdd_scenario_config_driven_csv_analysis() {
    // GIVEN a CSV directory holding the golden reversal for AAPL
    let dir = tempfile::tempdir().unwrap();
    write_closes(dir.path(), "AAPL", &golden_closes());

    // AND a TOML config pointing at it
    let toml = format!(
        "watchlist = [\"aapl\"]\n[data]\ncsv_dir = {:?}\n",
        dir.path().to_string_lossy()
    );
    let config = AnalysisConfig::from_toml(&toml).expect("config should parse");

    // WHEN the watchlist is analyzed
    let provider = build_provider(&config.data, false).unwrap();
    let composer = SignalComposer::new(config.policy.clone()).unwrap();
    let outcomes = analyze_many(provider.as_ref(), &composer, &config.normalized_watchlist());

    // THEN a single idea comes back with the documented levels
    assert_eq!(outcomes.len(), 1);
    let report = outcomes[0].result.as_ref().expect("analysis should succeed");
    assert_eq!(report.source, DataSource::CsvImport);
    let idea = report.idea.as_ref().expect("policy should fire");
    assert_eq!(idea.entry, 78.0);
    assert_eq!(idea.target, 82.68);
    assert_eq!(idea.stop_loss, 76.05);
}

#[test]
fn bdd_scenario_one_bad_symbol_does_not_sink_the_batch() {
    // GIVEN a provider that knows two of three symbols
    let provider = InMemoryProvider::new()
        .with_series("AAPL", golden_closes())
        .with_series("MSFT", vec![10.0; 40]);
    let symbols: Vec<String> = ["AAPL", "NOPE", "MSFT"].map(String::from).to_vec();

    // WHEN all three are analyzed in parallel
    let outcomes = analyze_many(&provider, &SignalComposer::default(), &symbols);

    // THEN outcomes keep input order and only the unknown symbol fails
    let names: Vec<&str> = outcomes.iter().map(|o| o.symbol.as_str()).collect();
    assert_eq!(names, vec!["AAPL", "NOPE", "MSFT"]);
    assert!(outcomes[0].result.as_ref().unwrap().has_idea());
    assert!(matches!(outcomes[1].result, Err(RunError::Data(_))));
    assert!(!outcomes[2].result.as_ref().unwrap().has_idea());
}

#[test]
fn bdd_scenario_short_history_is_reported_not_failed() {
    // GIVEN only 20 bars of history
    let provider = InMemoryProvider::new().with_series("IPO", vec![5.0; 20]);

    // WHEN the symbol is analyzed
    let report = analyze_symbol(&provider, &SignalComposer::default(), "IPO").unwrap();

    // THEN the report succeeds with no snapshot and no idea
    assert_eq!(report.bar_count, 20);
    assert!(report.snapshot.is_none());
    assert!(report.idea.is_none());
}

#[test]
fn bdd_scenario_synthetic_runs_are_thread_count_independent() {
    // GIVEN an offline config with a fixed seed
    let config = AnalysisConfig::from_toml("[data]\nsynthetic_seed = 2024\n").unwrap();
    let provider = build_provider(&config.data, true).unwrap();
    let composer = SignalComposer::default();
    let symbols: Vec<String> = (0..16).map(|i| format!("SYM{i}")).collect();

    // WHEN the watchlist is analyzed on one thread and on many
    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| analyze_many(provider.as_ref(), &composer, &symbols));
    let many = analyze_many(provider.as_ref(), &composer, &symbols);

    // THEN every fingerprint and idea matches
    for (a, b) in single.iter().zip(&many) {
        let (a, b) = (a.result.as_ref().unwrap(), b.result.as_ref().unwrap());
        assert_eq!(a.series_fingerprint, b.series_fingerprint);
        assert_eq!(a.idea, b.idea);
        assert_eq!(a.snapshot, b.snapshot);
    }
}

#[test]
fn bdd_scenario_report_round_trips_through_json() {
    // GIVEN a report with an idea
    let provider = InMemoryProvider::new().with_series("AAPL", golden_closes());
    let report = analyze_symbol(&provider, &SignalComposer::default(), "AAPL").unwrap();

    // WHEN it is serialized
    let json = serde_json::to_string(&report).unwrap();

    // THEN field names are stable and it reads back identically
    assert!(json.contains("\"stopLoss\":76.05"));
    assert!(json.contains("\"source\":\"in_memory\""));
    let back: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.symbol, report.symbol);
    assert_eq!(back.idea, report.idea);
    assert_eq!(back.series_fingerprint, report.series_fingerprint);
    assert_eq!(back.analyzed_at, report.analyzed_at);
}
