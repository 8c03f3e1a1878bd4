//! Ingestion of quote batches into the rate cache

use super::base::CurrencyUnit;
use super::cache::RateCache;
use super::rate::{RateContext, RateValue};
use super::sources::QuoteSource;
use crate::error::{FxError, Result};
use chrono::NaiveDate;
use log::{debug, info, warn};
use rust_decimal::Decimal;

/// Outcome of ingesting one source batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub admitted: usize,
    pub skipped: usize,
}

/// Merges freshly loaded quotes into a provider's cache
///
/// The listener is a cheap handle: clones share the same cache, so a loader
/// running on its own thread can own one while queries go through the
/// provider.
#[derive(Debug, Clone)]
pub struct IngestionListener {
    pivot: CurrencyUnit,
    provider: String,
    cache: RateCache,
}

impl IngestionListener {
    pub fn new(pivot: CurrencyUnit, provider: impl Into<String>, cache: RateCache) -> Self {
        Self {
            pivot,
            provider: provider.into(),
            cache,
        }
    }

    /// Store one `pivot -> currency_code` quote for `date`
    ///
    /// An existing quote for the same date and currency is replaced.
    pub fn on_batch(&self, date: NaiveDate, currency_code: &str, factor: Decimal) -> Result<()> {
        let term = CurrencyUnit::new(currency_code)?;
        if factor <= Decimal::ZERO {
            return Err(FxError::InvalidQuote(format!(
                "{}/{} on {} must be positive, got: {}",
                self.pivot, term, date, factor
            )));
        }

        let rate = RateValue::direct(
            self.pivot.clone(),
            term.clone(),
            factor,
            RateContext::historic(self.provider.clone(), None, date),
        );
        self.cache.put(date, term.code(), rate);
        debug!("{}: stored {}/{} {} on {}", self.provider, self.pivot, term, factor, date);
        Ok(())
    }

    /// Ingest everything a source yields
    ///
    /// Records that fail to parse or validate are skipped and counted; the
    /// rest of the batch is still admitted. Only a failure to read the
    /// source at all is returned as an error.
    pub fn ingest<S: QuoteSource + ?Sized>(&self, source: &S) -> Result<IngestReport> {
        let mut report = IngestReport::default();

        for record in source.quotes()? {
            let outcome = record.and_then(|quote| {
                self.on_batch(quote.date, &quote.currency, quote.factor)
                    .map_err(|e| e.to_string())
            });
            match outcome {
                Ok(()) => report.admitted += 1,
                Err(reason) => {
                    warn!("{}: skipping quote: {}", self.provider, reason);
                    report.skipped += 1;
                }
            }
        }

        info!(
            "{}: ingested {} quotes ({} skipped), cache holds {} dates",
            self.provider,
            report.admitted,
            report.skipped,
            self.cache.size()
        );
        Ok(report)
    }
}
