//! Base FX system - CurrencyUnit and RateProvider trait

use super::dates::DateSpec;
use super::rate::RateValue;
use crate::error::{FxError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque currency identifier, normally an ISO 4217 code
///
/// Codes are trimmed and upper-cased on construction, so `"eur"` and
/// `" EUR "` name the same unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyUnit(pub(crate) String);

impl CurrencyUnit {
    /// Parse a currency unit from its code
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(FxError::InvalidCurrency("empty currency code".to_string()));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(FxError::InvalidCurrency(format!(
                "Unknown currency: {}",
                code
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Get currency code as string
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyUnit {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyUnit {
    type Error = FxError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<CurrencyUnit> for String {
    fn from(unit: CurrencyUnit) -> Self {
        unit.0
    }
}

impl fmt::Display for CurrencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for resolving exchange rates
pub trait RateProvider: Send + Sync {
    /// Get the rate converting one `base` into `term`, looked up on the
    /// dates described by `dates`
    fn get_rate(
        &self,
        base: &CurrencyUnit,
        term: &CurrencyUnit,
        dates: &DateSpec,
    ) -> Result<RateValue>;

    /// Get multiple rates for the same date specification
    fn get_rates(
        &self,
        pairs: &[(CurrencyUnit, CurrencyUnit)],
        dates: &DateSpec,
    ) -> Result<Vec<RateValue>> {
        pairs
            .iter()
            .map(|(base, term)| self.get_rate(base, term, dates))
            .collect()
    }

    /// Check if rate is available
    fn has_rate(&self, base: &CurrencyUnit, term: &CurrencyUnit, dates: &DateSpec) -> bool {
        self.get_rate(base, term, dates).is_ok()
    }
}
