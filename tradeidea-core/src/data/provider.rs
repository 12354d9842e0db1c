//! Price provider trait and structured error types.
//!
//! The PriceProvider trait abstracts over close-price sources (Yahoo Finance,
//! CoinGecko, CSV import, synthetic data) so the runner can swap them and tests
//! can use an in-memory source. Providers strip missing points before returning:
//! everything downstream assumes a dense series.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceSeries;

/// Structured error types for ingestion.
///
/// Displayable in CLI output. The engine itself never raises these; only
/// providers do.
#[derive(Debug, Error)]
pub enum DataError {
    /// No source serves this ticker, or the source does not know it.
    #[error("unsupported symbol: {symbol}")]
    UnsupportedSymbol { symbol: String },

    /// Non-success HTTP status other than 403/429.
    #[error("{provider} returned HTTP {status} for {symbol}")]
    UpstreamFetch {
        provider: String,
        symbol: String,
        status: u16,
    },

    /// Connect, timeout or other transport failure.
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    /// HTTP 429, with the server's requested wait.
    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// Body did not match the expected JSON shape.
    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    /// HTTP 403, or the breaker is still cooling down.
    #[error("hard stop: provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    /// Every point was missing after gap stripping.
    #[error("no prices returned for {symbol}")]
    EmptySeries { symbol: String },

    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),

    /// Malformed CSV, missing column, or a bad cell (with its line).
    #[error("CSV error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DataError::NetworkUnreachable(_)
                | DataError::RateLimited { .. }
                | DataError::CircuitBreakerTripped
                | DataError::UpstreamFetch { status: 500..=599, .. }
        )
    }
}

/// Where a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    YahooFinance,
    CoinGecko,
    CsvImport,
    Synthetic,
    InMemory,
}

/// Result of a successful fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub series: PriceSeries,
    pub source: DataSource,
}

/// Trait for close-price providers.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the dense close series for a symbol, oldest first.
    fn fetch(&self, symbol: &str) -> Result<FetchResult, DataError>;

    /// Check if the provider is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool {
        true
    }

    /// Convenience wrapper returning only the series.
    fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        self.fetch(symbol).map(|r| r.series)
    }
}

impl<P: PriceProvider + ?Sized> PriceProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, symbol: &str) -> Result<FetchResult, DataError> {
        (**self).fetch(symbol)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Reject a fetched series that ended up empty after gap stripping.
pub(crate) fn non_empty(symbol: &str, series: PriceSeries) -> Result<PriceSeries, DataError> {
    if series.is_empty() {
        Err(DataError::EmptySeries {
            symbol: symbol.to_string(),
        })
    } else {
        Ok(series)
    }
}
