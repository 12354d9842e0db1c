//! Provider selection for the runner.
//!
//! Resolution order:
//! 1. `data.csv_dir` set → read local CSV files
//! 2. `data.synthetic_seed` set, or offline → seeded synthetic walk
//! 3. Otherwise → Yahoo Finance for equities, CoinGecko for crypto pairs
//!
//! Synthetic data is for demos and tests. Reports produced from it carry
//! `source = synthetic` so they are never mistaken for market data.

use std::sync::Arc;

use tracing::info;

use tradeidea_core::data::{
    coingecko, CircuitBreaker, CoinGeckoProvider, CsvProvider, DataError, PriceProvider,
    RoutingProvider, SyntheticProvider, YahooProvider,
};

use crate::config::DataConfig;

/// Seed used offline when the config names none.
pub const DEFAULT_SYNTHETIC_SEED: u64 = 42;

/// Build the provider described by `config`.
///
/// `offline` forbids network providers; without a CSV directory it falls back
/// to synthetic data.
pub fn build_provider(
    config: &DataConfig,
    offline: bool,
) -> Result<Box<dyn PriceProvider>, DataError> {
    if let Some(dir) = &config.csv_dir {
        info!(dir = %dir.display(), "using CSV price provider");
        return Ok(Box::new(CsvProvider::new(dir.clone())));
    }

    if offline || config.synthetic_seed.is_some() {
        let seed = config.synthetic_seed.unwrap_or(DEFAULT_SYNTHETIC_SEED);
        info!(seed, "using synthetic price provider");
        return Ok(Box::new(SyntheticProvider::new(seed)));
    }

    let http = config.http_options();
    let yahoo = YahooProvider::new(
        Arc::new(CircuitBreaker::for_provider("yahoo_finance")),
        http.clone(),
        config.lookback_days,
    )?;
    let coingecko = CoinGeckoProvider::new(
        Arc::new(CircuitBreaker::for_provider("coingecko")),
        http,
        coingecko::DEFAULT_DAYS,
    )?;
    info!(lookback_days = config.lookback_days, "using network price providers");
    Ok(Box::new(RoutingProvider::new(
        Box::new(yahoo),
        Box::new(coingecko),
    )))
}
