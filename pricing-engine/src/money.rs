//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done in `Decimal`; `f64` appears only at the
//! serde boundary. Monetary values round to 2 decimal places, half-up.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round to monetary precision
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentage of a base amount (value expressed as 10 = 10%)
#[inline]
pub fn percent_of(base: Decimal, value: Decimal) -> Decimal {
    base * value / Decimal::ONE_HUNDRED
}
