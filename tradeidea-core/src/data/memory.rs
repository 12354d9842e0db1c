//! In-memory provider for tests and embedding.

use std::collections::HashMap;

use super::provider::{DataError, DataSource, FetchResult, PriceProvider};
use crate::domain::{normalize_symbol, PriceSeries};

/// Fixed map of symbol → close series. Symbols are stored normalized.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a series; non-finite values are dropped.
    pub fn insert(&mut self, symbol: &str, closes: Vec<f64>) {
        let key = normalize_symbol(symbol).unwrap_or_else(|| symbol.to_string());
        let series = PriceSeries::from_sparse(closes.into_iter().map(Some));
        self.series.insert(key, series);
    }

    pub fn with_series(mut self, symbol: &str, closes: Vec<f64>) -> Self {
        self.insert(symbol, closes);
        self
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl PriceProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn fetch(&self, symbol: &str) -> Result<FetchResult, DataError> {
        let key = normalize_symbol(symbol).unwrap_or_else(|| symbol.to_string());
        let series = self
            .series
            .get(&key)
            .cloned()
            .ok_or_else(|| DataError::UnsupportedSymbol {
                symbol: symbol.to_string(),
            })?;
        Ok(FetchResult {
            symbol: key,
            series,
            source: DataSource::InMemory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let p = InMemoryProvider::new().with_series("msft", vec![1.0, 2.0]);
        let result = p.fetch("MSFT").unwrap();
        assert_eq!(result.symbol, "MSFT");
        assert_eq!(result.series.len(), 2);
    }

    #[test]
    fn missing_symbol_is_unsupported() {
        let p = InMemoryProvider::new();
        assert!(p.is_empty());
        assert!(matches!(p.fetch("X"), Err(DataError::UnsupportedSymbol { .. })));
    }

    #[test]
    fn non_finite_values_are_stripped() {
        let p = InMemoryProvider::new().with_series("X", vec![1.0, f64::NAN, 2.0]);
        assert_eq!(p.fetch_series("X").unwrap().as_slice(), &[1.0, 2.0]);
    }
}
