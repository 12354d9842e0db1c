//! TradeIdea CLI: analyze, evaluate, and watch commands.
//!
//! Commands:
//! - `analyze`: fetch prices for one or more symbols and print trade ideas
//! - `evaluate`: run the composer on a local CSV file, no network
//! - `watch`: re-analyze one symbol on a fixed interval

mod logging;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tradeidea_core::data::{read_closes, DataSource, DEFAULT_CLOSE_COLUMN};
use tradeidea_core::domain::normalize_symbol;
use tradeidea_core::signals::SignalComposer;
use tradeidea_runner::{
    analyze_many, build_provider, watch_symbol, AnalysisConfig, AnalysisReport,
};

#[derive(Parser)]
#[command(
    name = "tradeidea",
    about = "TradeIdea CLI: oversold reversal trade ideas from daily closes"
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch prices and print a trade idea (or none) per symbol.
    Analyze {
        /// Symbols to analyze (e.g., AAPL BTCUSD). Defaults to the config watchlist.
        symbols: Vec<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Offline mode: use seeded synthetic data instead of the network.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Print reports as a JSON array.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run the composer on closes from a local CSV file.
    Evaluate {
        /// CSV file with a header row.
        #[arg(long)]
        file: PathBuf,

        /// Symbol to label the idea with. Defaults to the file stem.
        #[arg(long)]
        symbol: Option<String>,

        /// Name of the close-price column.
        #[arg(long, default_value = DEFAULT_CLOSE_COLUMN)]
        column: String,

        /// Path to a TOML config file (only `[policy]` is used).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Re-analyze one symbol periodically.
    Watch {
        symbol: String,

        /// Minutes between runs.
        #[arg(long, default_value_t = 15)]
        interval_mins: u64,

        /// Stop after this many runs (runs forever if omitted).
        #[arg(long)]
        iterations: Option<u64>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Offline mode: use seeded synthetic data instead of the network.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Analyze {
            symbols,
            config,
            synthetic,
            json,
        } => run_analyze(symbols, config.as_deref(), synthetic, json),
        Commands::Evaluate {
            file,
            symbol,
            column,
            config,
            json,
        } => run_evaluate(&file, symbol, &column, config.as_deref(), json),
        Commands::Watch {
            symbol,
            interval_mins,
            iterations,
            config,
            synthetic,
        } => run_watch(&symbol, interval_mins, iterations, config.as_deref(), synthetic),
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn run_analyze(
    symbols: Vec<String>,
    config_path: Option<&Path>,
    synthetic: bool,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let symbols = if symbols.is_empty() {
        config.normalized_watchlist()
    } else {
        symbols
    };
    if symbols.is_empty() {
        bail!("no symbols given and the config has no watchlist");
    }

    let provider = build_provider(&config.data, synthetic)?;
    let composer = SignalComposer::new(config.policy.clone())?;
    info!(symbols = symbols.len(), provider = provider.name(), "starting analysis");
    let outcomes = analyze_many(provider.as_ref(), &composer, &symbols);

    if json {
        let entries: Vec<serde_json::Value> = outcomes
            .iter()
            .map(|o| match &o.result {
                Ok(report) => serde_json::to_value(report),
                Err(e) => Ok(serde_json::json!({ "symbol": o.symbol, "error": e.to_string() })),
            })
            .collect::<Result<_, _>>()?;
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for outcome in &outcomes {
            match &outcome.result {
                Ok(report) => print_summary(report),
                Err(e) => eprintln!("Error for {}: {e}", outcome.symbol),
            }
        }
    }

    // "No idea" is a normal outcome; only ingestion failures fail the command.
    if outcomes.iter().any(|o| o.result.is_err()) {
        std::process::exit(1);
    }
    Ok(())
}

fn run_evaluate(
    file: &Path,
    symbol: Option<String>,
    column: &str,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let symbol = symbol
        .or_else(|| file.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .and_then(|s| normalize_symbol(&s))
        .context("could not derive a valid symbol; pass --symbol")?;

    let series = read_closes(file, column)
        .with_context(|| format!("reading closes from {}", file.display()))?;
    let composer = SignalComposer::new(config.policy)?;
    let evaluation = composer.evaluate(&symbol, series.as_slice());
    let report = AnalysisReport::from_series("csv", DataSource::CsvImport, &series, evaluation);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn run_watch(
    symbol: &str,
    interval_mins: u64,
    iterations: Option<u64>,
    config_path: Option<&Path>,
    synthetic: bool,
) -> Result<()> {
    if interval_mins == 0 {
        bail!("--interval-mins must be at least 1");
    }
    let config = load_config(config_path)?;
    let provider = build_provider(&config.data, synthetic)?;
    let composer = SignalComposer::new(config.policy)?;
    info!(%symbol, interval_mins, ?iterations, "starting watch");

    println!("Watching {symbol} every {interval_mins} min (Ctrl-C to stop)");
    watch_symbol(
        provider.as_ref(),
        &composer,
        symbol,
        Duration::from_secs(interval_mins * 60),
        iterations,
        |run, result| match result {
            Ok(report) => {
                println!(
                    "--- run {} at {} ---",
                    run + 1,
                    report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
                print_summary(report);
            }
            Err(e) => eprintln!("run {}: {e}", run + 1),
        },
    );
    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    println!();
    println!("=== {} ===", report.symbol);
    println!("Source:         {} ({:?})", report.provider, report.source);
    println!("Bars:           {}", report.bar_count);

    match (&report.snapshot, &report.checks) {
        (Some(snapshot), Some(checks)) => {
            println!("Last:           {:.2}", snapshot.last_price);
            println!(
                "RSI:            {:.1}{}",
                snapshot.rsi,
                mark(checks.oversold)
            );
            println!(
                "MACD / Signal:  {:.4} / {:.4}{}",
                snapshot.macd.macd,
                snapshot.macd.signal,
                mark(checks.macd_bullish)
            );
            println!("Engulfing:      {}", if checks.engulfing { "yes" } else { "no" });
        }
        _ => println!("Not enough history to evaluate"),
    }

    println!();
    match &report.idea {
        Some(idea) => {
            println!("{}", idea.reason);
            println!("Entry:          {:.2}", idea.entry);
            println!("Target:         {:.2}", idea.target);
            println!("Stop Loss:      {:.2}", idea.stop_loss);
        }
        None => println!("No trade idea"),
    }
    if report.source == DataSource::Synthetic {
        println!();
        println!("WARNING: Result based on SYNTHETIC data");
    }
    println!();
}

fn mark(passed: bool) -> &'static str {
    if passed {
        "  [pass]"
    } else {
        ""
    }
}
