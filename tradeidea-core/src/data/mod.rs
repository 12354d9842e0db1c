//! Price ingestion: providers that turn a symbol into a dense close series.

pub mod circuit_breaker;
pub mod coingecko;
pub mod csv_import;
pub mod http;
pub mod memory;
pub mod provider;
pub mod router;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use coingecko::CoinGeckoProvider;
pub use csv_import::{read_closes, CsvProvider, DEFAULT_CLOSE_COLUMN};
pub use http::HttpOptions;
pub use memory::InMemoryProvider;
pub use provider::{DataError, DataSource, FetchResult, PriceProvider};
pub use router::RoutingProvider;
pub use synthetic::SyntheticProvider;
pub use yahoo::{YahooProvider, DEFAULT_LOOKBACK_DAYS};
