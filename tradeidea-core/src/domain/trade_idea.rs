//! TradeIdea: the composer's only output value.

use serde::{Deserialize, Serialize};

/// An actionable long idea: entry at the latest close, fixed-percentage target and stop.
///
/// Value object. Monetary fields are rounded to 2 decimal places when the idea is
/// built, so any serialization carries exactly that precision. The wire field
/// names are `symbol, reason, entry, target, stopLoss`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeIdea {
    pub symbol: String,
    pub reason: String,
    pub entry: f64,
    pub target: f64,
    pub stop_loss: f64,
}

impl TradeIdea {
    /// Reward-to-risk ratio of the rounded prices.
    pub fn reward_risk(&self) -> f64 {
        let risk = self.entry - self.stop_loss;
        if risk <= 0.0 {
            return f64::NAN;
        }
        (self.target - self.entry) / risk
    }
}

/// Round to 2 decimal places, half away from zero, on the exact binary value.
///
/// `2.925_f64` is stored as 2.92499999..., so it rounds to 2.92, the same answer
/// a fixed-point formatter gives. Naive `(value * 100.0).round()` would see 292.5
/// after the multiply rounds and return 2.93.
pub fn round2(value: f64) -> f64 {
    if value < 0.0 {
        return -round2(-value);
    }
    if !value.is_finite() {
        return value;
    }
    let scaled = value * 100.0;
    // Exact remainder of the multiply: value * 100 == scaled + err.
    let err = value.mul_add(100.0, -scaled);
    let floor = scaled.floor();
    let above_half = (scaled - floor - 0.5) + err >= 0.0;
    let cents = if above_half { floor + 1.0 } else { floor };
    cents / 100.0
}
