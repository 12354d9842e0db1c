//! Seeded random-walk provider for offline runs.
//!
//! Each symbol gets its own `StdRng`, seeded from BLAKE3(seed, symbol), so the
//! series for a symbol does not depend on which other symbols were requested
//! or in what order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::provider::{DataError, DataSource, FetchResult, PriceProvider};
use crate::domain::{normalize_symbol, round2, PriceSeries};

/// Bars generated per symbol unless overridden with `with_bars`.
pub const DEFAULT_BARS: usize = 60;

/// Largest absolute daily move of the walk.
const MAX_DAILY_MOVE: f64 = 0.03;

/// Seeded random walk per symbol. The same seed and symbol always give the
/// same series.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    seed: u64,
    bars: usize,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            bars: DEFAULT_BARS,
        }
    }

    pub fn with_bars(mut self, bars: usize) -> Self {
        self.bars = bars.max(1);
        self
    }

    fn symbol_seed(&self, symbol: &str) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(symbol.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hasher.finalize().as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Generate the walk for an already-normalized symbol.
    pub fn generate(&self, symbol: &str) -> PriceSeries {
        let mut rng = StdRng::seed_from_u64(self.symbol_seed(symbol));
        let mut price: f64 = rng.gen_range(20.0..200.0);
        let closes = (0..self.bars).map(|_| {
            price *= 1.0 + rng.gen_range(-MAX_DAILY_MOVE..MAX_DAILY_MOVE);
            // keep the walk strictly positive after rounding
            price = price.max(0.01);
            Some(round2(price))
        });
        PriceSeries::from_sparse(closes.collect::<Vec<_>>())
    }
}

impl PriceProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, symbol: &str) -> Result<FetchResult, DataError> {
        let symbol = normalize_symbol(symbol).ok_or_else(|| DataError::UnsupportedSymbol {
            symbol: symbol.to_string(),
        })?;
        let series = self.generate(&symbol);
        debug!(%symbol, seed = self.seed, bars = series.len(), "generated synthetic closes");
        Ok(FetchResult {
            symbol,
            series,
            source: DataSource::Synthetic,
        })
    }
}
