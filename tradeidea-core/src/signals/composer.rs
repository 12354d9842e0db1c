//! Signal composer: turns a close-price window into a trade idea or nothing.
//!
//! Policy: over the trailing `window` closes, all three must hold:
//! 1. RSI < `rsi_oversold`
//! 2. MACD > signal line
//! 3. bullish engulfing on the last two proxy candles
//!
//! The conditions are evaluated independently; none short-circuits another, so
//! the diagnostic snapshot is always complete. Fewer than `window` closes is a
//! defined "no opinion" outcome, not an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::policy::{PolicyConfig, PolicyError};
use crate::domain::{round2, TradeIdea};
use crate::indicators::{compute_macd, compute_rsi, detect_bullish_engulfing, MacdResult};

/// Indicator readings over the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub macd: MacdResult,
    pub engulfing: bool,
    pub last_price: f64,
}

/// Outcome of each policy condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyChecks {
    pub oversold: bool,
    pub macd_bullish: bool,
    pub engulfing: bool,
}

impl PolicyChecks {
    pub fn all(&self) -> bool {
        self.oversold && self.macd_bullish && self.engulfing
    }
}

/// Full result of one composer run: readings, checks, and the idea if the policy fired.
///
/// `snapshot` and `checks` are `None` when history was insufficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub symbol: String,
    pub bars_used: usize,
    pub snapshot: Option<IndicatorSnapshot>,
    pub checks: Option<PolicyChecks>,
    pub idea: Option<TradeIdea>,
}

impl Evaluation {
    pub fn has_enough_history(&self) -> bool {
        self.snapshot.is_some()
    }
}

/// Stateless composer bound to one validated policy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalComposer {
    policy: PolicyConfig,
}

impl SignalComposer {
    pub fn new(policy: PolicyConfig) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Run the policy over the trailing window of `prices` (oldest first).
    pub fn evaluate(&self, symbol: &str, prices: &[f64]) -> Evaluation {
        let symbol = symbol.trim().to_ascii_uppercase();
        let window = self.policy.window;

        let insufficient = |symbol: String, bars_used: usize| Evaluation {
            symbol,
            bars_used,
            snapshot: None,
            checks: None,
            idea: None,
        };

        if prices.len() < window {
            debug!(%symbol, bars = prices.len(), window, "insufficient history");
            return insufficient(symbol, prices.len());
        }
        let recent = &prices[prices.len() - window..];

        let (Some(rsi), Some(macd), Some(&last_price)) =
            (compute_rsi(recent), compute_macd(recent), recent.last())
        else {
            return insufficient(symbol, recent.len());
        };
        let engulfing = detect_bullish_engulfing(recent);

        let snapshot = IndicatorSnapshot {
            rsi,
            macd,
            engulfing,
            last_price,
        };
        let checks = PolicyChecks {
            oversold: rsi < self.policy.rsi_oversold,
            macd_bullish: macd.macd > macd.signal,
            engulfing,
        };

        debug!(
            %symbol,
            rsi,
            macd = macd.macd,
            signal = macd.signal,
            engulfing,
            fired = checks.all(),
            "policy evaluated"
        );

        let idea = checks.all().then(|| self.build_idea(&symbol, &snapshot));

        Evaluation {
            symbol,
            bars_used: recent.len(),
            snapshot: Some(snapshot),
            checks: Some(checks),
            idea,
        }
    }

    /// Trade idea if the policy fires, `None` otherwise (including short history).
    pub fn generate(&self, symbol: &str, prices: &[f64]) -> Option<TradeIdea> {
        self.evaluate(symbol, prices).idea
    }

    fn build_idea(&self, symbol: &str, snapshot: &IndicatorSnapshot) -> TradeIdea {
        let price = snapshot.last_price;
        TradeIdea {
            symbol: symbol.to_string(),
            reason: format!(
                "Trade Signal: Bullish Engulfing + RSI {:.1} + MACD crossover",
                snapshot.rsi
            ),
            entry: round2(price),
            target: round2(self.policy.target_for(price)),
            stop_loss: round2(self.policy.stop_for(price)),
        }
    }
}

/// Trade idea under the default policy (30 bars, RSI < 30, +6% / -2.5%).
pub fn generate_trade_idea(symbol: &str, prices: &[f64]) -> Option<TradeIdea> {
    SignalComposer::default().generate(symbol, prices)
}
