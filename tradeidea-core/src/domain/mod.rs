//! Domain types: price series, symbols, trade ideas.

pub mod price_series;
pub mod symbol;
pub mod trade_idea;

pub use price_series::{PriceSeries, SeriesError};
pub use symbol::{asset_class, coingecko_id, normalize_symbol, AssetClass, CRYPTO_PAIRS};
pub use trade_idea::{round2, TradeIdea};
