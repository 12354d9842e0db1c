//! End-to-end tests for the signal composer on hand-checked price windows.

use tradeidea_core::domain::{PriceSeries, TradeIdea};
use tradeidea_core::signals::{generate_trade_idea, PolicyConfig, SignalComposer};

// ── Fixtures ─────────────────────────────────────────────────────────

/// 29 closes falling by 1.0 from 100, then a jump to `last`.
fn reversal(last: f64) -> Vec<f64> {
    let mut prices: Vec<f64> = (0..29).map(|i| 100.0 - i as f64).collect();
    prices.push(last);
    prices
}

/// Cent-priced slide from 142.37 that reverses on the final bar.
fn cents_reversal() -> Vec<f64> {
    vec![
        142.37, 141.17, 139.97, 138.77, 137.57, 136.37, 135.17, 133.97, 132.77, 131.57, 130.37,
        129.17, 127.97, 126.77, 125.57, 124.37, 123.17, 121.97, 120.77, 119.57, 118.37, 117.17,
        115.97, 114.77, 113.57, 112.37, 111.17, 109.97, 109.87, 122.48,
    ]
}

// ── Firing ───────────────────────────────────────────────────────────

#[test]
fn golden_reversal_produces_idea() {
    let idea = generate_trade_idea("AAPL", &reversal(78.0)).expect("policy should fire");
    assert_eq!(
        idea,
        TradeIdea {
            symbol: "AAPL".into(),
            reason: "Trade Signal: Bullish Engulfing + RSI 17.6 + MACD crossover".into(),
            entry: 78.0,
            target: 82.68,
            stop_loss: 76.05,
        }
    );
}

#[test]
fn cent_prices_round_levels_to_cents() {
    let idea = generate_trade_idea("msft", &cents_reversal()).expect("policy should fire");
    assert_eq!(idea.symbol, "MSFT");
    assert_eq!(idea.entry, 122.48);
    assert_eq!(idea.target, 129.83);
    assert_eq!(idea.stop_loss, 119.42);
    assert_eq!(
        idea.reason,
        "Trade Signal: Bullish Engulfing + RSI 28.0 + MACD crossover"
    );
    assert!(idea.stop_loss < idea.entry && idea.entry < idea.target);
}

#[test]
fn low_priced_reversal_rounds_stop_from_stored_product() {
    // 3.00 * 0.975 is stored just below 2.925.
    let prices: Vec<f64> = reversal(78.0).iter().map(|p| p * 3.0 / 78.0).collect();
    let idea = generate_trade_idea("F", &prices).expect("policy should fire");
    assert_eq!(idea.entry, 3.0);
    assert_eq!(idea.target, 3.18);
    assert_eq!(idea.stop_loss, 2.92);
}

#[test]
fn only_trailing_window_matters() {
    let composer = SignalComposer::default();
    let base = composer.generate("X", &cents_reversal());

    // Any history before the last 30 bars is ignored.
    let mut padded = vec![5.0, 500.0, 1.0, 250.0];
    padded.extend(cents_reversal());
    assert_eq!(composer.generate("X", &padded), base);
}

#[test]
fn symbol_is_trimmed_and_uppercased() {
    let idea = generate_trade_idea("  btcusd ", &reversal(78.0)).unwrap();
    assert_eq!(idea.symbol, "BTCUSD");
}

// ── Not firing ───────────────────────────────────────────────────────

#[test]
fn twenty_nine_bars_never_fire() {
    // The same shape one bar short would pass every check.
    let short = &reversal(78.0)[1..];
    assert_eq!(short.len(), 29);
    assert!(generate_trade_idea("AAPL", short).is_none());
}

#[test]
fn macd_under_signal_blocks_despite_oversold_engulfing() {
    let eval = SignalComposer::default().evaluate("X", &reversal(75.0));
    let checks = eval.checks.expect("30 bars is enough history");
    assert!(checks.oversold && checks.engulfing);
    assert!(!checks.macd_bullish);
    assert!(eval.idea.is_none());
}

#[test]
fn steady_downtrend_has_no_engulfing() {
    let prices: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
    let eval = SignalComposer::default().evaluate("X", &prices);
    let snapshot = eval.snapshot.unwrap();
    assert_eq!(snapshot.rsi, 0.0);
    assert!(!snapshot.engulfing);
    assert!(eval.idea.is_none());
}

#[test]
fn flat_market_is_neutral() {
    let eval = SignalComposer::default().evaluate("X", &[50.0; 40]);
    let snapshot = eval.snapshot.unwrap();
    assert_eq!(snapshot.rsi, 50.0);
    assert_eq!(snapshot.macd.macd, 0.0);
    assert_eq!(snapshot.macd.signal, 0.0);
    assert!(eval.idea.is_none());
}

#[test]
fn rising_market_is_not_oversold() {
    let prices: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
    let checks = SignalComposer::default()
        .evaluate("X", &prices)
        .checks
        .unwrap();
    assert!(!checks.oversold);
}

// ── Policy ───────────────────────────────────────────────────────────

#[test]
fn looser_threshold_changes_outcome_only_through_rsi() {
    let strict = SignalComposer::new(PolicyConfig {
        rsi_oversold: 20.0,
        ..PolicyConfig::default()
    })
    .unwrap();
    // RSI ~27.95 clears 30 but not 20
    assert!(strict.generate("X", &cents_reversal()).is_none());
    assert!(SignalComposer::default()
        .generate("X", &cents_reversal())
        .is_some());
}

#[test]
fn custom_levels_apply_to_entry() {
    let composer = SignalComposer::new(PolicyConfig {
        target_pct: 0.10,
        stop_pct: 0.05,
        ..PolicyConfig::default()
    })
    .unwrap();
    let idea = composer.generate("X", &reversal(78.0)).unwrap();
    assert_eq!(idea.target, 85.8);
    assert_eq!(idea.stop_loss, 74.1);
}

// ── Determinism and serialization ────────────────────────────────────

#[test]
fn repeated_runs_are_identical() {
    let composer = SignalComposer::default();
    let prices = cents_reversal();
    let first = composer.evaluate("X", &prices);
    for _ in 0..10 {
        assert_eq!(composer.evaluate("X", &prices), first);
    }
}

#[test]
fn idea_serializes_with_camel_case_stop_loss() {
    let idea = generate_trade_idea("AAPL", &reversal(78.0)).unwrap();
    let json = serde_json::to_value(&idea).unwrap();
    assert_eq!(json["stopLoss"], 76.05);
    assert_eq!(json["entry"], 78.0);
    assert!(json.get("stop_loss").is_none());
}

#[test]
fn series_json_rejects_non_numbers() {
    let series: PriceSeries = serde_json::from_str("[1.5, 2.5]").unwrap();
    assert_eq!(series.len(), 2);
    assert!(serde_json::from_str::<PriceSeries>(r#"[1.5, "x"]"#).is_err());
}
