//! Service and delivery fees
//!
//! The service fee is computed on the subtotal alone; adjustments of
//! either taxability never feed its base. A waived fee is 0 but the
//! component stays in the breakdown for display.

use crate::money::{percent_of, round_money, to_decimal};
use rust_decimal::Decimal;
use shared::settings::{DeliveryQuote, FeeSettings, FeeType};

/// Marketplace service fee per the admin settings
pub fn service_fee(subtotal: Decimal, settings: &FeeSettings) -> Decimal {
    if settings.is_service_fee_waived {
        return Decimal::ZERO;
    }
    match settings.service_fee_type {
        FeeType::Percentage => {
            round_money(percent_of(subtotal, to_decimal(settings.service_fee_percentage)))
        }
        FeeType::Fixed => round_money(to_decimal(settings.service_fee_fixed)),
    }
}

/// Delivery fee from the external distance provider's quote, verbatim
pub fn delivery_fee(quote: Option<&DeliveryQuote>) -> Decimal {
    quote
        .map(|q| round_money(to_decimal(q.fee)))
        .unwrap_or(Decimal::ZERO)
}
