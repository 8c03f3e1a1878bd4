//! Triangulation through the pivot currency
//!
//! Every ingested rate is quoted as `pivot -> currency`, so any pair can be
//! answered from a single date bucket:
//!
//! - `pivot -> pivot` is the identity
//! - `X -> pivot` is the reversal of the ingested `pivot -> X`
//! - `pivot -> X` is the ingested rate itself
//! - `X -> Y` composes `X -> pivot` with `pivot -> Y`

use super::base::CurrencyUnit;
use super::cache::Bucket;
use super::rate::{RateContext, RateValue};
use super::reversal::reverse;
use crate::error::{FxError, Result};
use chrono::NaiveDate;
use log::debug;

/// Resolves rates from one date bucket
#[derive(Debug, Clone)]
pub struct Triangulator {
    pivot: CurrencyUnit,
    provider: String,
    scale: Option<u32>,
}

impl Triangulator {
    pub fn new(pivot: CurrencyUnit, provider: impl Into<String>, scale: Option<u32>) -> Self {
        Self {
            pivot,
            provider: provider.into(),
            scale,
        }
    }

    pub fn pivot(&self) -> &CurrencyUnit {
        &self.pivot
    }

    /// Context stamped on identity and composed rates
    pub fn context(&self, date: NaiveDate) -> RateContext {
        RateContext::historic(self.provider.clone(), self.scale, date)
    }

    /// Resolve `base -> term` from the bucket for `date`
    pub fn resolve(
        &self,
        base: &CurrencyUnit,
        term: &CurrencyUnit,
        bucket: &Bucket,
        date: NaiveDate,
    ) -> Result<RateValue> {
        self.resolve_with_scale(base, term, bucket, date, self.scale)
    }

    /// Cross rates compose their legs at full precision and round once
    fn resolve_with_scale(
        &self,
        base: &CurrencyUnit,
        term: &CurrencyUnit,
        bucket: &Bucket,
        date: NaiveDate,
        scale: Option<u32>,
    ) -> Result<RateValue> {
        let context = RateContext::historic(self.provider.clone(), scale, date);

        if *base == self.pivot && *term == self.pivot {
            return Ok(RateValue::identity(self.pivot.clone(), context));
        }

        if *term == self.pivot {
            let quoted = self.lookup(base, term, bucket, date)?;
            return reverse(&quoted, scale);
        }

        if *base == self.pivot {
            return self.lookup(base, term, bucket, date);
        }

        let leg1 = self.resolve_with_scale(base, &self.pivot, bucket, date, None)?;
        let leg2 = self.resolve_with_scale(&self.pivot, term, bucket, date, None)?;
        debug!(
            "{}: triangulating {}/{} via {} on {}",
            self.provider, base, term, self.pivot, date
        );

        let product = leg1.factor.checked_mul(leg2.factor).ok_or_else(|| {
            FxError::InvalidQuote(format!(
                "{}/{} overflows on {}: {} x {}",
                base, term, date, leg1.factor, leg2.factor
            ))
        })?;
        let factor = context.round_factor(base, term, product)?;

        Ok(RateValue {
            base: base.clone(),
            term: term.clone(),
            factor,
            context,
            chain: vec![leg1, leg2],
        })
    }

    /// Ingested `pivot -> currency` rate, where `currency` is whichever side
    /// of the query is not the pivot
    fn lookup(
        &self,
        base: &CurrencyUnit,
        term: &CurrencyUnit,
        bucket: &Bucket,
        date: NaiveDate,
    ) -> Result<RateValue> {
        let currency = if *base == self.pivot { term } else { base };
        bucket
            .get(currency.code())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| FxError::NoRateAvailable {
                base: base.to_string(),
                term: term.to_string(),
                dates: vec![date],
            })
    }
}
