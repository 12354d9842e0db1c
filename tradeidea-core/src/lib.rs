//! TradeIdea Core: indicators, signal composition, price ingestion.
//!
//! This crate contains the analysis engine and its data sources:
//! - Domain types (price series, symbols, trade ideas)
//! - Indicator calculators (EMA, MACD, RSI, bullish engulfing proxy)
//! - Signal composer with a configurable policy
//! - Price providers (Yahoo Finance, CoinGecko, CSV, synthetic, in-memory)
//!
//! The indicator and signal layers are pure: no I/O, no shared state. Only
//! `data` touches the network or the filesystem.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod signals;

pub use domain::{PriceSeries, TradeIdea};
pub use signals::{generate_trade_idea, Evaluation, PolicyConfig, SignalComposer};
