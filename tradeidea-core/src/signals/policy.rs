//! Decision policy parameters.
//!
//! The defaults give the standard rule: a 30-bar window,
//! RSI below 30, a 6% target and a 2.5% stop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trailing bars the composer looks at.
pub const DEFAULT_WINDOW: usize = 30;
/// RSI strictly below this reads as oversold.
pub const DEFAULT_RSI_OVERSOLD: f64 = 30.0;
/// Target distance above entry, as a fraction.
pub const DEFAULT_TARGET_PCT: f64 = 0.06;
/// Stop distance below entry, as a fraction.
pub const DEFAULT_STOP_PCT: f64 = 0.025;

/// Smallest window that still holds the four closes the pattern detector reads.
pub const MIN_WINDOW: usize = 4;

/// Why a `PolicyConfig` was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    /// Window shorter than `MIN_WINDOW` bars.
    #[error("window must be >= {MIN_WINDOW}, got {0}")]
    WindowTooSmall(usize),

    /// Oversold threshold outside RSI's (0, 100] range.
    #[error("rsi_oversold must be in (0, 100], got {0}")]
    RsiThresholdOutOfRange(f64),

    /// Target at or below entry (or not finite).
    #[error("target_pct must be > 0, got {0}")]
    NonPositiveTarget(f64),

    /// Stop at or above entry, or at or below zero.
    #[error("stop_pct must be in (0, 1), got {0}")]
    StopOutOfRange(f64),
}

/// Tunable thresholds of the trade-idea policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Trailing bars evaluated; older history is ignored.
    pub window: usize,
    /// RSI must be strictly below this.
    pub rsi_oversold: f64,
    /// Target = entry * (1 + target_pct).
    pub target_pct: f64,
    /// Stop = entry * (1 - stop_pct).
    pub stop_pct: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            rsi_oversold: DEFAULT_RSI_OVERSOLD,
            target_pct: DEFAULT_TARGET_PCT,
            stop_pct: DEFAULT_STOP_PCT,
        }
    }
}

impl PolicyConfig {
    /// Reject thresholds that could never produce a sane idea.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.window < MIN_WINDOW {
            return Err(PolicyError::WindowTooSmall(self.window));
        }
        if !(self.rsi_oversold > 0.0 && self.rsi_oversold <= 100.0) {
            return Err(PolicyError::RsiThresholdOutOfRange(self.rsi_oversold));
        }
        if !(self.target_pct > 0.0 && self.target_pct.is_finite()) {
            return Err(PolicyError::NonPositiveTarget(self.target_pct));
        }
        if !(self.stop_pct > 0.0 && self.stop_pct < 1.0) {
            return Err(PolicyError::StopOutOfRange(self.stop_pct));
        }
        Ok(())
    }

    /// Target price for an entry (unrounded).
    pub fn target_for(&self, entry: f64) -> f64 {
        entry * (1.0 + self.target_pct)
    }

    /// Stop-loss price for an entry (unrounded).
    pub fn stop_for(&self, entry: f64) -> f64 {
        entry * (1.0 - self.stop_pct)
    }
}
