//! Historic exchange-rate resolution
//!
//! Rates are ingested quoted against a single pivot currency and cached per
//! date. Queries for any pair are answered from that cache by reversal or by
//! triangulating through the pivot, walking candidate dates until one can
//! answer.
//!
//! # Components
//!
//! - **base**: `CurrencyUnit` and the `RateProvider` trait
//! - **rate**: `RateValue` with its provenance and chain
//! - **cache**: date-indexed, concurrently writable rate store
//! - **dates**: query date specifications and their resolution
//! - **reversal**: rate inversion
//! - **triangulation**: per-bucket resolution rules
//! - **listener**: ingestion of quote batches
//! - **sources**: quote producers (in-memory, CSV)
//! - **provider**: the engine tying the above together
//!
//! # Example
//!
//! ```rust
//! use rusty_fxrates::config::ProviderConfig;
//! use rusty_fxrates::fx::{CurrencyUnit, DateSpec, HistoricRateProvider, RateProvider};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let usd = CurrencyUnit::new("USD").unwrap();
//! let provider = HistoricRateProvider::new(ProviderConfig::new("demo", usd)).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//!
//! let listener = provider.listener();
//! listener.on_batch(date, "EUR", Decimal::new(80, 2)).unwrap();
//! listener.on_batch(date, "JPY", Decimal::new(150, 0)).unwrap();
//!
//! // EUR -> USD -> JPY
//! let eur = CurrencyUnit::new("EUR").unwrap();
//! let jpy = CurrencyUnit::new("JPY").unwrap();
//! let rate = provider.get_rate(&eur, &jpy, &DateSpec::On(date)).unwrap();
//! assert_eq!(rate.factor, Decimal::new(1875, 1));
//! assert_eq!(rate.chain.len(), 2);
//! ```

pub mod base;
pub mod cache;
pub mod dates;
pub mod listener;
pub mod provider;
pub mod rate;
pub mod reversal;
pub mod sources;
pub mod triangulation;

pub use base::{CurrencyUnit, RateProvider};
pub use cache::{Bucket, CacheStats, RateCache};
pub use dates::{DateResolver, DateSpec, ResolvedDates, MAX_LOOKBACK_DAYS};
pub use listener::{IngestReport, IngestionListener};
pub use provider::{HistoricRateProvider, ProviderContext};
pub use rate::{RateContext, RateType, RateValue};
pub use reversal::reverse;
pub use sources::{CsvQuoteSource, Quote, QuoteRecord, QuoteSource, StaticQuotes};
pub use triangulation::Triangulator;

#[cfg(test)]
pub(crate) mod test_util {
    use super::CurrencyUnit;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    pub fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    pub fn unit(code: &str) -> CurrencyUnit {
        CurrencyUnit::new(code).unwrap()
    }
}
