//! Indicator calculators.
//!
//! All calculators are pure functions over a borrowed close-price slice
//! (oldest first). They never mutate their input and keep no state between
//! calls, so the same slice always yields bit-identical output.
//!
//! Insufficient history is never an error: it degrades to `None` (RSI, MACD)
//! or `false` (engulfing).

pub mod ema;
pub mod engulfing;
pub mod macd;
pub mod rsi;

pub use ema::compute_ema;
pub use engulfing::{detect_bullish_engulfing, proxy_candles, ProxyCandle};
pub use macd::{
    compute_macd, macd_line, MacdResult, MACD_FAST_PERIOD, MACD_SIGNAL_PERIOD, MACD_SLOW_PERIOD,
};
pub use rsi::compute_rsi;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
