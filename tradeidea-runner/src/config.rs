//! Serializable analysis configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! watchlist = ["AAPL", "BTCUSD"]
//!
//! [policy]
//! window = 30
//! rsi_oversold = 30.0
//!
//! [data]
//! lookback_days = 90
//! csv_dir = "prices"
//! ```
//!
//! Every section is optional; missing keys take the documented defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tradeidea_core::data::{HttpOptions, DEFAULT_LOOKBACK_DAYS};
use tradeidea_core::domain::normalize_symbol;
use tradeidea_core::signals::{PolicyConfig, PolicyError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<PolicyError> for ConfigError {
    fn from(e: PolicyError) -> Self {
        ConfigError::Invalid(e.to_string())
    }
}

/// Where price data comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Calendar days of equity history to request.
    pub lookback_days: u32,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Read `<csv_dir>/<SYMBOL>.csv` instead of the network.
    pub csv_dir: Option<PathBuf>,
    /// Use seeded synthetic data instead of the network.
    pub synthetic_seed: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        let http = HttpOptions::default();
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            timeout_secs: http.timeout_secs,
            max_retries: http.max_retries,
            csv_dir: None,
            synthetic_seed: None,
        }
    }
}

impl DataConfig {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries,
            ..HttpOptions::default()
        }
    }
}

/// Complete configuration for an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub policy: PolicyConfig,
    pub data: DataConfig,
    pub watchlist: Vec<String>,
}

impl AnalysisConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;
        if self.data.lookback_days == 0 {
            return Err(ConfigError::Invalid("data.lookback_days must be > 0".into()));
        }
        if self.data.timeout_secs == 0 {
            return Err(ConfigError::Invalid("data.timeout_secs must be > 0".into()));
        }
        if let Some(bad) = self.watchlist.iter().find(|s| normalize_symbol(s).is_none()) {
            return Err(ConfigError::Invalid(format!(
                "watchlist entry '{bad}' is not a valid symbol"
            )));
        }
        Ok(())
    }

    /// Watchlist symbols, normalized, duplicates dropped, order kept.
    pub fn normalized_watchlist(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.watchlist.len());
        for symbol in self.watchlist.iter().filter_map(|s| normalize_symbol(s)) {
            if !out.contains(&symbol) {
                out.push(symbol);
            }
        }
        out
    }
}
