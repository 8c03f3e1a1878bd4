//! Rate reversal

use super::rate::RateValue;
use crate::error::{FxError, Result};
use rust_decimal::Decimal;

/// Invert a rate so it converts `term` into `base`
///
/// The reciprocal is taken at full decimal precision and rounded to `scale`
/// significant digits when one is given. A reciprocal that rounds to zero is
/// an error. The original rate is kept as the only chain entry.
pub fn reverse(rate: &RateValue, scale: Option<u32>) -> Result<RateValue> {
    let inverted = Decimal::ONE
        .checked_div(rate.factor)
        .ok_or_else(|| FxError::DivisionByZero {
            base: rate.base.to_string(),
            term: rate.term.to_string(),
        })?;

    let mut context = rate.context.clone();
    context.scale = scale;
    let factor = context.round_factor(&rate.term, &rate.base, inverted)?;

    Ok(RateValue {
        base: rate.term.clone(),
        term: rate.base.clone(),
        factor,
        context,
        chain: vec![rate.clone()],
    })
}
