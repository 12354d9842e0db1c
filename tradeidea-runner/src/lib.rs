//! TradeIdea Runner: analysis orchestration over the core engine.
//!
//! This crate builds on `tradeidea-core` to provide:
//! - TOML analysis configuration (policy, data source, watchlist)
//! - Provider selection (CSV, synthetic, or routed network providers)
//! - Single-symbol and parallel multi-symbol analysis with reports
//! - Periodic re-analysis of one symbol

pub mod config;
pub mod data_loader;
pub mod runner;

pub use config::{AnalysisConfig, ConfigError, DataConfig};
pub use data_loader::{build_provider, DEFAULT_SYNTHETIC_SEED};
pub use runner::{
    analyze_many, analyze_symbol, watch_symbol, AnalysisReport, RunError, SymbolOutcome,
    SCHEMA_VERSION,
};
