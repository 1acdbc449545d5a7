//! Lenient price field
//!
//! Vendor catalogs arrive with prices as either JSON numbers or free
//! text ("$1,250.00", "1250", occasionally "TBD"). A price that cannot
//! be parsed must never block checkout; it contributes zero.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Un-normalized price as found on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl Default for RawPrice {
    fn default() -> Self {
        RawPrice::Number(0.0)
    }
}

impl RawPrice {
    /// Parse to a monetary amount
    ///
    /// Text prices are stripped of everything outside digits, `.` and
    /// `-` before parsing (currency symbols, thousands separators).
    /// Anything unparseable is 0.
    pub fn amount(&self) -> Decimal {
        match self {
            RawPrice::Number(n) => Decimal::from_f64(*n).unwrap_or_default(),
            RawPrice::Text(s) => parse_lenient(s),
        }
    }
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Number(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_string())
    }
}

fn parse_lenient(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match cleaned.parse::<Decimal>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(price = raw, "unparseable price, treated as 0");
            Decimal::ZERO
        }
    }
}
