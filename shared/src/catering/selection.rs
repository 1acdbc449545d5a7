//! Service selections and the flat selection map
//!
//! The booking UI keeps quantities in a flat string-keyed map. Key
//! conventions (see `pricing-engine`'s selector parser for the typed
//! form):
//! - `itemId` — quantity of a plain catalog item
//! - `serviceId` — aggregate quantity for a service
//! - `serviceId_roleId` — quantity of a staff role on a service
//! - `comboId_categoryId_itemId` — quantity of a combo sub-item
//! - `anyKey_duration` — booked hours attached to the sibling `anyKey`;
//!   never a purchasable quantity

use super::details::ServiceDetails;
use super::price::RawPrice;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Suffix marking a duration entry in the selection map
pub const DURATION_SUFFIX: &str = "_duration";

/// Service type of a purchased line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    #[default]
    Catering,
    Staff,
    Venue,
    Rental,
    Entertainment,
    Transport,
}

impl ServiceType {
    /// Whether totals come from item-level selections rather than the
    /// service's declared price
    pub fn requires_item_selection(&self) -> bool {
        matches!(self, Self::Catering | Self::Staff | Self::Rental)
    }
}

/// One purchased service line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceSelection {
    pub id: String,
    pub service_type: ServiceType,
    /// Declared price, un-normalized (flat-priced services, staff fallback)
    #[serde(default)]
    pub price: RawPrice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    /// Booked hours at the service level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "ServiceDetails::is_empty")]
    pub details: ServiceDetails,
}

/// Flat selection-key map: opaque string keys to quantities (or hours,
/// for `_duration` keys)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SelectionMap(pub BTreeMap<String, f64>);

impl SelectionMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    /// Quantity stored at `key`, or None if absent or a duration entry
    pub fn quantity(&self, key: &str) -> Option<Decimal> {
        if key.ends_with(DURATION_SUFFIX) {
            return None;
        }
        self.0.get(key).and_then(|v| Decimal::from_f64(*v))
    }

    /// Duration sibling of `base_key` (`{base_key}_duration`), in hours
    pub fn duration_of(&self, base_key: &str) -> Option<Decimal> {
        self.0
            .get(&format!("{base_key}{DURATION_SUFFIX}"))
            .and_then(|v| Decimal::from_f64(*v))
    }

    /// All quantity entries, durations excluded
    pub fn quantity_entries(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().filter_map(|(k, v)| {
            if k.ends_with(DURATION_SUFFIX) {
                None
            } else {
                Decimal::from_f64(*v).map(|q| (k.as_str(), q))
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
