//! Analysis runner: wires together provider, composer, and reports.
//!
//! Three entry points:
//! - `analyze_symbol()`: fetch one series and evaluate it. Used by `analyze`.
//! - `analyze_many()`: the same over a watchlist, fanned out on rayon.
//! - `watch_symbol()`: periodic re-analysis of one symbol. Used by `watch`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use tradeidea_core::data::{DataError, DataSource, PriceProvider};
use tradeidea_core::domain::{PriceSeries, TradeIdea};
use tradeidea_core::signals::{Evaluation, IndicatorSnapshot, PolicyChecks, SignalComposer};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    /// The provider could not deliver a usable series.
    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Current schema version for serialized reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of analyzing one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    /// Name of the provider that served the series.
    pub provider: String,
    pub source: DataSource,
    pub bar_count: usize,
    /// BLAKE3 fingerprint of the full fetched series.
    pub series_fingerprint: String,
    pub analyzed_at: DateTime<Utc>,
    pub snapshot: Option<IndicatorSnapshot>,
    pub checks: Option<PolicyChecks>,
    pub idea: Option<TradeIdea>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl AnalysisReport {
    /// Build a report from an already-fetched series.
    pub fn from_series(
        provider: &str,
        source: DataSource,
        series: &PriceSeries,
        evaluation: Evaluation,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            symbol: evaluation.symbol,
            provider: provider.to_string(),
            source,
            bar_count: series.len(),
            series_fingerprint: series.fingerprint(),
            analyzed_at: Utc::now(),
            snapshot: evaluation.snapshot,
            checks: evaluation.checks,
            idea: evaluation.idea,
        }
    }

    pub fn has_idea(&self) -> bool {
        self.idea.is_some()
    }
}

/// Outcome for one symbol of a multi-symbol run.
#[derive(Debug)]
pub struct SymbolOutcome {
    pub symbol: String,
    pub result: Result<AnalysisReport, RunError>,
}

/// Fetch `symbol` and run the composer over it.
pub fn analyze_symbol(
    provider: &dyn PriceProvider,
    composer: &SignalComposer,
    symbol: &str,
) -> Result<AnalysisReport, RunError> {
    let fetched = provider.fetch(symbol)?;
    let evaluation = composer.evaluate(&fetched.symbol, fetched.series.as_slice());
    let report =
        AnalysisReport::from_series(provider.name(), fetched.source, &fetched.series, evaluation);

    info!(
        symbol = %report.symbol,
        provider = %report.provider,
        bars = report.bar_count,
        idea = report.has_idea(),
        "analysis complete"
    );
    Ok(report)
}

/// Analyze every symbol in parallel. Output order matches `symbols`.
///
/// A failure for one symbol never affects the others.
pub fn analyze_many(
    provider: &dyn PriceProvider,
    composer: &SignalComposer,
    symbols: &[String],
) -> Vec<SymbolOutcome> {
    symbols
        .par_iter()
        .map(|symbol| {
            let result = analyze_symbol(provider, composer, symbol);
            if let Err(e) = &result {
                warn!(%symbol, error = %e, "analysis failed");
            }
            SymbolOutcome {
                symbol: symbol.clone(),
                result,
            }
        })
        .collect()
}

/// Re-analyze `symbol` every `interval`, `iterations` times (forever if `None`).
///
/// The callback sees each outcome as it completes. Failures are reported and
/// the loop continues; nothing is carried between runs.
pub fn watch_symbol<F>(
    provider: &dyn PriceProvider,
    composer: &SignalComposer,
    symbol: &str,
    interval: Duration,
    iterations: Option<u64>,
    mut on_outcome: F,
) where
    F: FnMut(u64, &Result<AnalysisReport, RunError>),
{
    let mut run = 0u64;
    while iterations.map_or(true, |n| run < n) {
        if run > 0 {
            std::thread::sleep(interval);
        }
        let result = analyze_symbol(provider, composer, symbol);
        if let Err(e) = &result {
            warn!(%symbol, run, error = %e, "watch iteration failed");
        }
        on_outcome(run, &result);
        run += 1;
    }
}
