//! CoinGecko close-price provider for the supported crypto pairs.
//!
//! Only pairs listed in `domain::CRYPTO_PAIRS` have a source; anything else is
//! `UnsupportedSymbol`. Daily prices are rounded to cents on ingestion.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::circuit_breaker::CircuitBreaker;
use super::http::{get_json, HttpOptions};
use super::provider::{non_empty, DataError, DataSource, FetchResult, PriceProvider};
use crate::domain::{coingecko_id, normalize_symbol, round2, PriceSeries};

/// Days of daily history requested by default.
pub const DEFAULT_DAYS: u32 = 60;

#[derive(Debug, Deserialize)]
struct MarketChart {
    /// `[timestamp_ms, price]` pairs, oldest first.
    prices: Vec<(f64, Option<f64>)>,
}

pub struct CoinGeckoProvider {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    options: HttpOptions,
    days: u32,
}

impl CoinGeckoProvider {
    pub fn new(
        circuit_breaker: Arc<CircuitBreaker>,
        options: HttpOptions,
        days: u32,
    ) -> Result<Self, DataError> {
        Ok(Self {
            client: options.build_client()?,
            circuit_breaker,
            options,
            days,
        })
    }

    pub fn with_defaults() -> Result<Self, DataError> {
        Self::new(
            Arc::new(CircuitBreaker::for_provider("coingecko")),
            HttpOptions::default(),
            DEFAULT_DAYS,
        )
    }

    pub fn market_chart_url(coin_id: &str, days: u32) -> String {
        format!(
            "https://api.coingecko.com/api/v3/coins/{coin_id}/market_chart\
             ?vs_currency=usd&days={days}&interval=daily"
        )
    }

    /// Parse a market_chart body into a dense series of cent-rounded prices.
    pub fn parse_prices(symbol: &str, body: &str) -> Result<PriceSeries, DataError> {
        let chart: MarketChart = serde_json::from_str(body).map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;
        Self::series_from_chart(symbol, chart)
    }

    fn series_from_chart(symbol: &str, chart: MarketChart) -> Result<PriceSeries, DataError> {
        let series = PriceSeries::from_sparse(
            chart
                .prices
                .into_iter()
                .map(|(_, price)| price.map(round2)),
        );
        non_empty(symbol, series)
    }
}

impl PriceProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn fetch(&self, symbol: &str) -> Result<FetchResult, DataError> {
        let unsupported = || DataError::UnsupportedSymbol {
            symbol: symbol.to_string(),
        };
        let symbol = normalize_symbol(symbol).ok_or_else(unsupported)?;
        let coin_id = coingecko_id(&symbol).ok_or_else(unsupported)?;

        let url = Self::market_chart_url(coin_id, self.days);
        let chart: MarketChart = get_json(
            &self.client,
            &self.circuit_breaker,
            &self.options,
            self.name(),
            &symbol,
            &url,
        )?;

        let series = Self::series_from_chart(&symbol, chart)?;
        info!(%symbol, coin_id, bars = series.len(), "fetched prices from CoinGecko");
        Ok(FetchResult {
            symbol,
            series,
            source: DataSource::CoinGecko,
        })
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}
