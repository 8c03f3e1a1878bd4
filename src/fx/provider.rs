//! Historic rate provider
//!
//! Owns the rate cache for one pivot currency and answers queries against it.
//! Quotes arrive through [`IngestionListener`] handles obtained from
//! [`HistoricRateProvider::listener`]; queries go through [`RateProvider`].

use super::base::{CurrencyUnit, RateProvider};
use super::cache::{CacheStats, RateCache};
use super::dates::{DateResolver, DateSpec, ResolvedDates};
use super::listener::IngestionListener;
use super::rate::{RateType, RateValue};
use super::triangulation::Triangulator;
use crate::config::ProviderConfig;
use crate::error::{FxError, Result};
use chrono::NaiveDate;
use log::debug;

/// Description of a provider and the data it currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderContext {
    pub name: String,
    pub pivot: CurrencyUnit,
    pub rate_type: RateType,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Rate resolution engine for historic, pivot-quoted rates
///
/// # Example
/// ```
/// use rusty_fxrates::config::ProviderConfig;
/// use rusty_fxrates::fx::{CurrencyUnit, DateSpec, HistoricRateProvider, RateProvider};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let usd = CurrencyUnit::new("USD").unwrap();
/// let eur = CurrencyUnit::new("EUR").unwrap();
/// let provider = HistoricRateProvider::new(ProviderConfig::new("demo", usd.clone())).unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// provider.listener().on_batch(date, "EUR", Decimal::new(92, 2)).unwrap();
///
/// let rate = provider.get_rate(&usd, &eur, &DateSpec::On(date)).unwrap();
/// assert_eq!(rate.factor, Decimal::new(92, 2));
/// ```
#[derive(Debug, Clone)]
pub struct HistoricRateProvider {
    config: ProviderConfig,
    cache: RateCache,
    resolver: DateResolver,
    triangulator: Triangulator,
}

impl HistoricRateProvider {
    /// Create a provider with an empty cache
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        let cache = RateCache::new(&config.name);
        let triangulator = Triangulator::new(config.pivot.clone(), config.name.clone(), config.scale);
        Ok(Self {
            config,
            cache,
            resolver: DateResolver,
            triangulator,
        })
    }

    /// Handle for feeding quotes into this provider's cache
    pub fn listener(&self) -> IngestionListener {
        IngestionListener::new(
            self.config.pivot.clone(),
            self.config.name.clone(),
            self.cache.clone(),
        )
    }

    pub fn pivot(&self) -> &CurrencyUnit {
        &self.config.pivot
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    pub fn context(&self) -> ProviderContext {
        let stats = self.cache.stats();
        ProviderContext {
            name: self.config.name.clone(),
            pivot: self.config.pivot.clone(),
            rate_type: RateType::Historic,
            first_date: stats.first_date,
            last_date: stats.last_date,
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Resolve from the first candidate date whose bucket can answer
    fn resolve_candidates(
        &self,
        base: &CurrencyUnit,
        term: &CurrencyUnit,
        dates: &[NaiveDate],
    ) -> Result<RateValue> {
        for &date in dates {
            let Some(bucket) = self.cache.bucket(date) else {
                debug!("{}: no rates loaded for {}", self.config.name, date);
                continue;
            };
            match self.triangulator.resolve(base, term, &bucket, date) {
                Ok(rate) => return Ok(rate),
                Err(FxError::NoRateAvailable { .. }) => {
                    debug!(
                        "{}: {}/{} not resolvable on {}, trying next date",
                        self.config.name, base, term, date
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(FxError::NoRateAvailable {
            base: base.to_string(),
            term: term.to_string(),
            dates: dates.to_vec(),
        })
    }
}

impl RateProvider for HistoricRateProvider {
    fn get_rate(
        &self,
        base: &CurrencyUnit,
        term: &CurrencyUnit,
        dates: &DateSpec,
    ) -> Result<RateValue> {
        // Also fails on an empty cache, which takes precedence over identity
        let most_recent = self.cache.most_recent_date()?;
        let pivot = self.pivot();

        match self.resolver.resolve(dates) {
            ResolvedDates::MostRecent => {
                if base == pivot && term == pivot {
                    return Ok(RateValue::identity(
                        pivot.clone(),
                        self.triangulator.context(most_recent),
                    ));
                }
                self.resolve_candidates(base, term, &[most_recent])
            }
            ResolvedDates::Candidates(candidates) => {
                if base == pivot && term == pivot {
                    let date = candidates.first().copied().unwrap_or(most_recent);
                    return Ok(RateValue::identity(
                        pivot.clone(),
                        self.triangulator.context(date),
                    ));
                }
                self.resolve_candidates(base, term, &candidates)
            }
        }
    }
}
