//! Bullish engulfing detector over a close-only series.
//!
//! There is no OHLC data in this pipeline, so the last four closes stand in for
//! two candles: `[len-4, len-3]` is the prior bar's (open, close) and
//! `[len-2, len-1]` the current bar's (open, close). This proxy is a known
//! modeling simplification; the trade policy's semantics depend on it.

/// One candle body reconstructed from two consecutive closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyCandle {
    pub open: f64,
    pub close: f64,
}

impl ProxyCandle {
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// The (prior, current) proxy candles, or `None` with fewer than 4 prices.
pub fn proxy_candles(prices: &[f64]) -> Option<(ProxyCandle, ProxyCandle)> {
    let &[.., prior_open, prior_close, open, close] = prices else {
        return None;
    };
    Some((
        ProxyCandle {
            open: prior_open,
            close: prior_close,
        },
        ProxyCandle { open, close },
    ))
}

/// True iff a bearish prior body is fully engulfed by a bullish current body.
pub fn detect_bullish_engulfing(prices: &[f64]) -> bool {
    let Some((prior, current)) = proxy_candles(prices) else {
        return false;
    };

    prior.is_bearish()
        && current.is_bullish()
        && current.open < prior.close
        && current.close > prior.open
}
