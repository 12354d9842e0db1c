//! Blocking JSON-over-HTTP fetch with retry, backoff and circuit breaker.
//!
//! Shared by the Yahoo and CoinGecko providers. Status handling:
//! - 403 → trip the breaker, stop
//! - 429 → record failure, wait at least `retry-after` (capped), retry
//! - 5xx → record failure, back off, retry
//! - other non-success → `UpstreamFetch`, stop
//! - connect/timeout errors → back off, retry

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::circuit_breaker::CircuitBreaker;
use super::provider::DataError;

/// Assumed wait when a 429 carries no usable `retry-after`.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Longest single wait between attempts, whatever the server asks for.
pub const MAX_RETRY_WAIT: Duration = Duration::from_secs(120);

/// HTTP settings common to network providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpOptions {
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Attempts after the first one.
    pub max_retries: u32,
    /// First backoff step; doubles on each retry.
    pub base_delay_ms: u64,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            base_delay_ms: 500,
        }
    }
}

impl HttpOptions {
    pub fn build_client(&self) -> Result<reqwest::blocking::Client, DataError> {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::HttpClient(e.to_string()))
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.base_delay_ms) * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Wait before `attempt`, given the error that ended the previous one.
    fn retry_wait(&self, attempt: u32, previous: Option<&DataError>) -> Duration {
        let backoff = self.delay_for(attempt);
        match previous {
            Some(DataError::RateLimited { retry_after_secs }) => {
                backoff.max(Duration::from_secs(*retry_after_secs).min(MAX_RETRY_WAIT))
            }
            _ => backoff,
        }
    }
}

/// Decide what a response status means before the body is touched.
///
/// `Ok(())` means decode the body. 403 maps to `CircuitBreakerTripped`; the
/// caller trips the breaker. Transient errors (see `DataError::is_transient`)
/// are retried, anything else is final.
pub(crate) fn classify_status(
    provider: &str,
    symbol: &str,
    status: StatusCode,
    headers: &HeaderMap,
) -> Result<(), DataError> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::FORBIDDEN {
        return Err(DataError::CircuitBreakerTripped);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(DataError::RateLimited { retry_after_secs });
    }
    Err(DataError::UpstreamFetch {
        provider: provider.to_string(),
        symbol: symbol.to_string(),
        status: status.as_u16(),
    })
}

/// GET `url` and decode the JSON body, retrying transient failures.
pub(crate) fn get_json<T: DeserializeOwned>(
    client: &reqwest::blocking::Client,
    breaker: &CircuitBreaker,
    options: &HttpOptions,
    provider: &str,
    symbol: &str,
    url: &str,
) -> Result<T, DataError> {
    let mut last_error: Option<DataError> = None;

    for attempt in 0..=options.max_retries {
        if attempt > 0 {
            let delay = options.retry_wait(attempt, last_error.as_ref());
            warn!(provider, symbol, attempt, ?delay, "retrying after transient failure");
            std::thread::sleep(delay);
        }

        if !breaker.is_allowed() {
            return Err(DataError::CircuitBreakerTripped);
        }

        debug!(provider, symbol, url, "GET");
        let resp = match client.get(url).send() {
            Ok(resp) => resp,
            Err(e) if e.is_connect() || e.is_timeout() => {
                last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                continue;
            }
            Err(e) => return Err(DataError::NetworkUnreachable(e.to_string())),
        };

        match classify_status(provider, symbol, resp.status(), resp.headers()) {
            Ok(()) => {}
            Err(DataError::CircuitBreakerTripped) => {
                breaker.trip();
                return Err(DataError::CircuitBreakerTripped);
            }
            Err(e) if e.is_transient() => {
                breaker.record_failure();
                last_error = Some(e);
                continue;
            }
            Err(e) => return Err(e),
        }

        let body = resp.json::<T>().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;
        breaker.record_success();
        return Ok(body);
    }

    Err(last_error.unwrap_or_else(|| DataError::NetworkUnreachable("max retries exceeded".into())))
}
