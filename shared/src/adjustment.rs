//! Custom line-item adjustments (surcharges/discounts)

use serde::{Deserialize, Serialize};

/// How the adjustment value is expressed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentType {
    Percentage,
    FixedAmount,
}

/// Direction of the adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentMode {
    Surcharge,
    Discount,
}

/// One custom adjustment line
///
/// `amount` is pre-computed upstream and signed in mode direction:
/// surcharges positive, discounts negative. The engine partitions by
/// taxability only; it never re-derives the sign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Adjustment {
    pub id: String,
    pub label: String,
    pub adjustment_type: AdjustmentType,
    pub mode: AdjustmentMode,
    /// Original value (10 = 10% or $10 depending on adjustment_type)
    pub value: f64,
    /// Signed computed amount
    pub amount: f64,
    /// Whether this adjustment is folded into the tax base
    #[serde(default = "default_taxable")]
    pub taxable: bool,
}

fn default_taxable() -> bool {
    true
}
