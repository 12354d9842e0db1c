//! Local CSV close-price import.
//!
//! Files carry a header row; the close column is located by name
//! (case-insensitive, default `close`). Other columns are ignored. Blank cells
//! are gaps and get stripped like any other missing point.

use std::path::{Path, PathBuf};

use tracing::info;

use super::provider::{non_empty, DataError, DataSource, FetchResult, PriceProvider};
use crate::domain::{normalize_symbol, PriceSeries};

pub const DEFAULT_CLOSE_COLUMN: &str = "close";

/// Read one close column from a CSV file into a dense series.
///
/// A non-blank cell that is not a finite number (including `NaN` and `inf`) is
/// an error naming its line, not a gap.
pub fn read_closes(path: &Path, column: &str) -> Result<PriceSeries, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(column))
        .ok_or_else(|| {
            DataError::Csv(format!("{}: no '{column}' column", path.display()))
        })?;

    let mut points = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let cell = record.get(idx).unwrap_or("");
        if cell.is_empty() {
            points.push(None);
            continue;
        }
        // +2: one for the header, one for 1-based lines
        let value = cell
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                DataError::Csv(format!(
                    "{}: line {}: '{cell}' is not a number",
                    path.display(),
                    row + 2
                ))
            })?;
        points.push(Some(value));
    }

    Ok(PriceSeries::from_sparse(points))
}

fn csv_error(path: &Path, e: csv::Error) -> DataError {
    if e.is_io_error() {
        if let csv::ErrorKind::Io(io) = e.into_kind() {
            return DataError::Io(io);
        }
        return DataError::Csv(format!("{}: I/O failure", path.display()));
    }
    DataError::Csv(format!("{}: {e}", path.display()))
}

/// Serves `<dir>/<SYMBOL>.csv`.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
    column: String,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            column: DEFAULT_CLOSE_COLUMN.to_string(),
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

impl PriceProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, symbol: &str) -> Result<FetchResult, DataError> {
        let symbol = normalize_symbol(symbol).ok_or_else(|| DataError::UnsupportedSymbol {
            symbol: symbol.to_string(),
        })?;
        let path = self.path_for(&symbol);
        if !path.is_file() {
            return Err(DataError::UnsupportedSymbol { symbol });
        }

        let series = non_empty(&symbol, read_closes(&path, &self.column)?)?;
        info!(%symbol, path = %path.display(), bars = series.len(), "loaded closes from CSV");
        Ok(FetchResult {
            symbol,
            series,
            source: DataSource::CsvImport,
        })
    }

    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }
}
