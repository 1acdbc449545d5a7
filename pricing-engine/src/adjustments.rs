//! Adjustment splitter
//!
//! Partitions custom surcharge/discount lines into taxable and
//! non-taxable sums. Amounts arrive pre-signed (surcharges positive,
//! discounts negative); the splitter never re-derives sign.

use crate::money::{round_money, to_decimal};
use rust_decimal::Decimal;
use shared::Adjustment;

/// Taxable/non-taxable partition of the adjustment list
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdjustmentSplit {
    /// Folded into the tax base before tax is computed
    pub taxable: Decimal,
    /// Applied after tax (e.g. a post-tax gratuity)
    pub non_taxable: Decimal,
}

impl AdjustmentSplit {
    pub fn total(&self) -> Decimal {
        self.taxable + self.non_taxable
    }
}

/// Partition adjustments by taxability
pub fn split(adjustments: &[Adjustment]) -> AdjustmentSplit {
    let mut split = AdjustmentSplit::default();
    for adjustment in adjustments {
        let amount = to_decimal(adjustment.amount);
        if adjustment.taxable {
            split.taxable += amount;
        } else {
            split.non_taxable += amount;
        }
    }
    split.taxable = round_money(split.taxable);
    split.non_taxable = round_money(split.non_taxable);
    split
}
