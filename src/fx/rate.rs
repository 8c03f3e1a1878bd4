//! Rate values and their provenance

use super::base::CurrencyUnit;
use crate::error::{FxError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RateType {
    /// End-of-day reference rate for a past date
    Historic,
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RateType::Historic => f.write_str("HISTORIC"),
        }
    }
}

/// Provenance of a rate value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateContext {
    /// Name of the provider that produced the rate
    pub provider: String,
    pub rate_type: RateType,
    /// Significant digits derived factors are rounded to, if any
    pub scale: Option<u32>,
    /// Date of the bucket the rate was taken from
    pub date: Option<NaiveDate>,
}

impl RateContext {
    pub fn historic(provider: impl Into<String>, scale: Option<u32>, date: NaiveDate) -> Self {
        Self {
            provider: provider.into(),
            rate_type: RateType::Historic,
            scale,
            date: Some(date),
        }
    }

    /// Round to this context's significant digits
    pub fn round(&self, value: Decimal) -> Decimal {
        match self.scale {
            Some(digits) => value.round_sf(digits).unwrap_or(value),
            None => value,
        }
    }

    /// Round a derived `base -> term` factor, rejecting one that rounds to zero
    pub fn round_factor(
        &self,
        base: &CurrencyUnit,
        term: &CurrencyUnit,
        factor: Decimal,
    ) -> Result<Decimal> {
        let rounded = self.round(factor);
        if rounded <= Decimal::ZERO {
            return Err(FxError::RateUnderflow {
                base: base.to_string(),
                term: term.to_string(),
                digits: self.scale.unwrap_or(crate::config::MAX_SCALE),
            });
        }
        Ok(rounded)
    }
}

/// Conversion factor between two currency units
///
/// One unit of `base` is worth `factor` units of `term`. Values produced by
/// reversal carry the original in `chain`; triangulated values carry their
/// two legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateValue {
    pub base: CurrencyUnit,
    pub term: CurrencyUnit,
    pub factor: Decimal,
    pub context: RateContext,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<RateValue>,
}

impl RateValue {
    /// Rate read directly from the feed
    pub fn direct(
        base: CurrencyUnit,
        term: CurrencyUnit,
        factor: Decimal,
        context: RateContext,
    ) -> Self {
        Self {
            base,
            term,
            factor,
            context,
            chain: Vec::new(),
        }
    }

    /// One unit converts to one unit
    pub fn identity(unit: CurrencyUnit, context: RateContext) -> Self {
        Self::direct(unit.clone(), unit, Decimal::ONE, context)
    }

    /// Whether the value was derived by reversal or triangulation
    pub fn is_derived(&self) -> bool {
        !self.chain.is_empty()
    }

    /// Factor implied by the chain, or `None` for a direct rate
    ///
    /// A single-element chain is a reversal, so its factor is inverted.
    pub fn chain_factor(&self) -> Option<Decimal> {
        match self.chain.as_slice() {
            [] => None,
            [original] => Decimal::ONE.checked_div(original.factor),
            legs => legs
                .iter()
                .try_fold(Decimal::ONE, |acc, leg| acc.checked_mul(leg.factor)),
        }
    }

    /// Convert an amount of `base` into `term`, `None` on overflow
    pub fn convert(&self, amount: Decimal) -> Option<Decimal> {
        amount
            .checked_mul(self.factor)
            .map(|converted| self.context.round(converted))
    }
}

impl fmt::Display for RateValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{} {}", self.base, self.term, self.factor)?;
        if let Some(date) = self.context.date {
            write!(f, " @ {}", date)?;
        }
        Ok(())
    }
}
