//! Tax resolver
//!
//! Priority chain for the effective tax on a live computation:
//! explicit override (quoted drafts) → location-derived rate from the
//! external jurisdiction lookup → pending. Snapshot precedence sits one
//! level up in the reconciler; by the time this runs there is no
//! snapshot.
//!
//! Exemption forces the amount to 0 but keeps the resolved rate so the
//! UI can show what would have applied. "Pending" (no address, no
//! override) is a distinct state from "exempt" and from a computed 0.

use crate::money::{percent_of, round_money, to_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::TaxStatus;
use shared::settings::TaxOverride;

/// Already-resolved tax inputs for a live computation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaxContext {
    /// Explicit override attached to an already-quoted draft
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes: Option<TaxOverride>,
    /// Location-derived default rate, resolved upstream from the
    /// billing/event address; None when no address is on file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_rate: Option<f64>,
}

/// Resolved tax component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxOutcome {
    pub amount: Decimal,
    pub rate: Decimal,
    pub status: TaxStatus,
}

/// Resolve tax for `base` (subtotal + fees + taxable adjustments)
pub fn resolve(base: Decimal, context: &TaxContext, is_exempt: bool) -> TaxOutcome {
    let mut outcome = resolve_chain(base, context);
    if is_exempt {
        outcome.amount = Decimal::ZERO;
        outcome.status = TaxStatus::Exempt;
    }
    outcome
}

fn resolve_chain(base: Decimal, context: &TaxContext) -> TaxOutcome {
    if let Some(taxes) = &context.taxes {
        let rate = taxes.effective_rate().map(to_decimal);
        let amount = match (taxes.amount, rate) {
            (Some(amount), _) => Some(to_decimal(amount)),
            (None, Some(rate)) => Some(percent_of(base, rate)),
            (None, None) => None, // empty override, fall through
        };
        if let Some(amount) = amount {
            return TaxOutcome {
                amount: round_money(amount),
                rate: rate.unwrap_or(Decimal::ZERO),
                status: TaxStatus::Resolved,
            };
        }
    }

    if let Some(rate) = context.location_rate {
        let rate = to_decimal(rate);
        return TaxOutcome {
            amount: round_money(percent_of(base, rate)),
            rate,
            status: TaxStatus::Resolved,
        };
    }

    TaxOutcome {
        amount: Decimal::ZERO,
        rate: Decimal::ZERO,
        status: TaxStatus::Pending,
    }
}
