//! Error types for rusty_fxrates

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for rate ingestion and resolution
#[derive(Error, Debug)]
pub enum FxError {
    #[error("No exchange rate data loaded for provider {provider}")]
    NoDataLoaded { provider: String },

    #[error("No rate available for {base}/{term} on {}", format_dates(.dates))]
    NoRateAvailable {
        base: String,
        term: String,
        dates: Vec<NaiveDate>,
    },

    #[error("Division by zero while reversing {base}/{term}")]
    DivisionByZero { base: String, term: String },

    #[error("Rate for {base}/{term} rounds to zero at {digits} significant digits")]
    RateUnderflow {
        base: String,
        term: String,
        digits: u32,
    },

    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    #[error("Invalid quote: {0}")]
    InvalidQuote(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl FxError {
    /// True for the "nothing to answer with" kinds, as opposed to hard failures
    pub fn is_missing_rate(&self) -> bool {
        matches!(
            self,
            FxError::NoDataLoaded { .. } | FxError::NoRateAvailable { .. }
        )
    }
}

fn format_dates(dates: &[NaiveDate]) -> String {
    if dates.is_empty() {
        return "any date".to_string();
    }
    dates
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for rusty_fxrates operations
pub type Result<T> = std::result::Result<T, FxError>;
