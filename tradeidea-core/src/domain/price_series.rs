//! PriceSeries: the dense close-price input of every calculator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a `PriceSeries` from untrusted values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("non-finite price {value} at index {index}")]
    NonFinite { index: usize, value: f64 },
}

/// Ordered closing prices, oldest first.
///
/// Every value is finite. The series is immutable once built; calculators
/// borrow it as `&[f64]` so trailing windows can be passed without copying.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PriceSeries {
    values: Vec<f64>,
}

impl PriceSeries {
    /// Build a series, rejecting NaN and infinite values.
    pub fn new(values: Vec<f64>) -> Result<Self, SeriesError> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SeriesError::NonFinite { index, value });
        }
        Ok(Self { values })
    }

    /// Build a series from provider output, dropping missing and non-finite points.
    ///
    /// This is the ingestion contract: gaps are stripped, never interpolated.
    pub fn from_sparse<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values = points
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent close.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Trailing window of at most `n` values (the whole series when shorter).
    pub fn tail(&self, n: usize) -> &[f64] {
        let start = self.values.len().saturating_sub(n);
        &self.values[start..]
    }

    /// BLAKE3 digest of the values' bit patterns, hex-encoded.
    ///
    /// Two series with the same fingerprint produce bit-identical analyses.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.values.len() as u64).to_le_bytes());
        for v in &self.values {
            hasher.update(&v.to_bits().to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

impl AsRef<[f64]> for PriceSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for PriceSeries {
    type Error = SeriesError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<PriceSeries> for Vec<f64> {
    fn from(series: PriceSeries) -> Self {
        series.values
    }
}
