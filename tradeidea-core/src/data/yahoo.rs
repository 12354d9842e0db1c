//! Yahoo Finance close-price provider (equities, ETFs, indices).
//!
//! Fetches daily closes from Yahoo's v8 chart API over a trailing calendar
//! window. Null closes (holidays, halted sessions) are dropped.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; parse failures surface as `ResponseFormatChanged`.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use super::circuit_breaker::CircuitBreaker;
use super::http::{get_json, HttpOptions};
use super::provider::{non_empty, DataError, DataSource, FetchResult, PriceProvider};
use crate::domain::{normalize_symbol, PriceSeries};

/// Calendar days requested by default. Roughly 60 trading days, enough for a
/// 30-bar window after holidays are stripped.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

pub struct YahooProvider {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    options: HttpOptions,
    lookback_days: u32,
}

impl YahooProvider {
    pub fn new(
        circuit_breaker: Arc<CircuitBreaker>,
        options: HttpOptions,
        lookback_days: u32,
    ) -> Result<Self, DataError> {
        Ok(Self {
            client: options.build_client()?,
            circuit_breaker,
            options,
            lookback_days,
        })
    }

    /// Provider with its own breaker and default HTTP settings.
    pub fn with_defaults() -> Result<Self, DataError> {
        Self::new(
            Arc::new(CircuitBreaker::for_provider("yahoo_finance")),
            HttpOptions::default(),
            DEFAULT_LOOKBACK_DAYS,
        )
    }

    /// Build the chart API URL for a symbol and date range.
    pub fn chart_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let end_ts = (end + ChronoDuration::days(1))
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .timestamp()
            - 1;
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval=1d"
        )
    }

    /// Parse a chart API body into a dense close series.
    pub fn parse_closes(symbol: &str, body: &str) -> Result<PriceSeries, DataError> {
        let resp: ChartResponse = serde_json::from_str(body).map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;
        Self::closes_from_response(symbol, resp)
    }

    fn closes_from_response(symbol: &str, resp: ChartResponse) -> Result<PriceSeries, DataError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::UnsupportedSymbol {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        non_empty(symbol, PriceSeries::from_sparse(quote.close))
    }
}

/// Yahoo answers unknown tickers with a plain 404.
fn not_found_as_unsupported(symbol: &str, err: DataError) -> DataError {
    match err {
        DataError::UpstreamFetch { status: 404, .. } => DataError::UnsupportedSymbol {
            symbol: symbol.to_string(),
        },
        other => other,
    }
}

impl PriceProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str) -> Result<FetchResult, DataError> {
        let symbol = normalize_symbol(symbol).ok_or_else(|| DataError::UnsupportedSymbol {
            symbol: symbol.to_string(),
        })?;

        let end = Utc::now().date_naive();
        let start = end - ChronoDuration::days(i64::from(self.lookback_days));
        let url = Self::chart_url(&symbol, start, end);

        let resp: ChartResponse = get_json(
            &self.client,
            &self.circuit_breaker,
            &self.options,
            self.name(),
            &symbol,
            &url,
        )
        .map_err(|e| not_found_as_unsupported(&symbol, e))?;

        let series = Self::closes_from_response(&symbol, resp)?;
        info!(%symbol, bars = series.len(), "fetched closes from Yahoo Finance");
        Ok(FetchResult {
            symbol,
            series,
            source: DataSource::YahooFinance,
        })
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}
