//! # rusty_fxrates
//!
//! Historical exchange-rate resolution for Rust.
//!
//! A provider ingests date-stamped quotes expressed against one pivot
//! currency and answers conversion queries for any currency pair: directly,
//! by reversing a quote, or by triangulating through the pivot. Queries name
//! the date(s) they may be answered from and fall back across candidate dates
//! when a date's data is missing.
//!
//! ## Example
//!
//! ```rust
//! use rusty_fxrates::prelude::*;
//! use chrono::NaiveDate;
//!
//! let usd = CurrencyUnit::new("USD").unwrap();
//! let provider = HistoricRateProvider::new(ProviderConfig::new("demo", usd.clone())).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let csv = "date,currency,factor\n2024-01-02,EUR,0.92\n";
//! provider.listener().ingest(&CsvQuoteSource::from_text(csv)).unwrap();
//!
//! let eur = CurrencyUnit::new("EUR").unwrap();
//! let rate = provider.get_rate(&eur, &usd, &DateSpec::On(date)).unwrap();
//! assert_eq!(rate.base, eur);
//! ```

pub mod config;
pub mod error;
pub mod fx;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::config::ProviderConfig;
    pub use crate::error::{FxError, Result};
    pub use crate::fx::{
        CsvQuoteSource, CurrencyUnit, DateSpec, HistoricRateProvider, IngestionListener,
        QuoteSource, RateProvider, RateValue,
    };
}
