//! Ticker normalization and asset-class routing.

use serde::{Deserialize, Serialize};

/// Which family of data source serves a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Stocks, ETFs, indices and anything else Yahoo serves.
    Equity,
    /// One of the pairs in `CRYPTO_PAIRS`.
    Crypto,
}

/// Crypto pairs with a known data source, mapped to their CoinGecko coin ids.
pub const CRYPTO_PAIRS: &[(&str, &str)] = &[
    ("BTCUSD", "bitcoin"),
    ("ETHUSD", "ethereum"),
    ("DOGEUSD", "dogecoin"),
];

/// Trim and uppercase a ticker, rejecting empty or malformed input.
///
/// Accepted characters: `A-Z`, `0-9`, `.`, `-`, `^`, `=` (index and FX
/// tickers such as `^GSPC` or `EURUSD=X`).
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() || symbol.len() > 16 {
        return None;
    }
    let valid = symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
    valid.then_some(symbol)
}

/// CoinGecko coin id for a normalized crypto pair.
pub fn coingecko_id(symbol: &str) -> Option<&'static str> {
    CRYPTO_PAIRS
        .iter()
        .find(|(pair, _)| *pair == symbol)
        .map(|(_, id)| *id)
}

/// Classify a normalized symbol.
pub fn asset_class(symbol: &str) -> AssetClass {
    if coingecko_id(symbol).is_some() {
        AssetClass::Crypto
    } else {
        AssetClass::Equity
    }
}
