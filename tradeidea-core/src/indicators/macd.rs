//! Moving Average Convergence/Divergence (MACD).
//!
//! MACD line = EMA(12) - EMA(26), point by point over the full window.
//! Signal line = EMA(9) over the last 9 points of the MACD line only.
//! Both EMAs are biased-start, so every index is defined.

use serde::{Deserialize, Serialize};

use super::ema::compute_ema;

/// Period of the fast EMA.
pub const MACD_FAST_PERIOD: usize = 12;
/// Period of the slow EMA.
pub const MACD_SLOW_PERIOD: usize = 26;
/// Period of the signal EMA, and how many trailing MACD points feed it.
pub const MACD_SIGNAL_PERIOD: usize = 9;

/// Most recent point of the MACD and signal lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    /// Fast EMA minus slow EMA at the last bar.
    pub macd: f64,
    /// Signal EMA at the last bar.
    pub signal: f64,
}

impl MacdResult {
    /// MACD minus signal.
    pub fn histogram(&self) -> f64 {
        self.macd - self.signal
    }

    /// MACD strictly above its signal line.
    pub fn is_bullish(&self) -> bool {
        self.macd > self.signal
    }
}

/// Full MACD line (fast EMA minus slow EMA), same length as `prices`.
pub fn macd_line(prices: &[f64]) -> Vec<f64> {
    let fast = compute_ema(prices, MACD_FAST_PERIOD);
    let slow = compute_ema(prices, MACD_SLOW_PERIOD);
    fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
}

/// Latest MACD and signal values. `None` only for an empty input.
///
/// Short inputs give finite but meaningless values; callers that act on the
/// result should enforce their own minimum history.
pub fn compute_macd(prices: &[f64]) -> Option<MacdResult> {
    let line = macd_line(prices);
    let macd = *line.last()?;

    let start = line.len().saturating_sub(MACD_SIGNAL_PERIOD);
    let signal_line = compute_ema(&line[start..], MACD_SIGNAL_PERIOD);
    let signal = *signal_line.last()?;

    Some(MacdResult { macd, signal })
}
