//! Routes each symbol to the provider that serves its asset class.

use tracing::debug;

use super::provider::{DataError, FetchResult, PriceProvider};
use crate::domain::{asset_class, normalize_symbol, AssetClass};

/// Known crypto pairs go to the crypto provider, everything else to the equity provider.
pub struct RoutingProvider {
    equity: Box<dyn PriceProvider>,
    crypto: Box<dyn PriceProvider>,
}

impl RoutingProvider {
    pub fn new(equity: Box<dyn PriceProvider>, crypto: Box<dyn PriceProvider>) -> Self {
        Self { equity, crypto }
    }

    fn route(&self, class: AssetClass) -> &dyn PriceProvider {
        match class {
            AssetClass::Equity => self.equity.as_ref(),
            AssetClass::Crypto => self.crypto.as_ref(),
        }
    }
}

impl PriceProvider for RoutingProvider {
    fn name(&self) -> &str {
        "router"
    }

    fn fetch(&self, symbol: &str) -> Result<FetchResult, DataError> {
        let normalized = normalize_symbol(symbol).ok_or_else(|| DataError::UnsupportedSymbol {
            symbol: symbol.to_string(),
        })?;
        let provider = self.route(asset_class(&normalized));
        debug!(symbol = %normalized, provider = provider.name(), "routing fetch");
        provider.fetch(&normalized)
    }

    fn is_available(&self) -> bool {
        self.equity.is_available() || self.crypto.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryProvider;
    use crate::data::provider::DataSource;

    fn router() -> RoutingProvider {
        let equity = InMemoryProvider::new().with_series("AAPL", vec![1.0, 2.0]);
        let crypto = InMemoryProvider::new().with_series("BTCUSD", vec![3.0]);
        RoutingProvider::new(Box::new(equity), Box::new(crypto))
    }

    #[test]
    fn routes_by_asset_class() {
        let r = router();
        assert_eq!(r.fetch_series("aapl").unwrap().len(), 2);
        assert_eq!(r.fetch_series("btcusd").unwrap().as_slice(), &[3.0]);
        assert_eq!(r.fetch("BTCUSD").unwrap().source, DataSource::InMemory);
    }

    #[test]
    fn crypto_pair_never_reaches_equity_provider() {
        let equity = InMemoryProvider::new().with_series("ETHUSD", vec![1.0]);
        let r = RoutingProvider::new(Box::new(equity), Box::new(InMemoryProvider::new()));
        assert!(matches!(
            r.fetch("ETHUSD"),
            Err(DataError::UnsupportedSymbol { .. })
        ));
    }

    #[test]
    fn malformed_symbol_is_unsupported() {
        assert!(matches!(
            router().fetch("  "),
            Err(DataError::UnsupportedSymbol { .. })
        ));
    }
}
