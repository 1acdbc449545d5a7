//! Staffing quantity/duration deriver
//!
//! Staff pricing is per-role, per-hour, but the selection map has no
//! native grouping: role identity must be reconstructed by key
//! convention. This is the most bug-prone area of the engine and the
//! fallback chains below follow the booking UI's conventions exactly.
//!
//! Head count: sum of quantities at keys prefixed `{serviceId}_` or
//! exactly matching a valid role id (duration keys excluded), falling
//! back to the bare `serviceId` quantity, the service's own quantity,
//! then 1.
//!
//! Hours: max of the matched keys' `_duration` siblings, falling back
//! to `{serviceId}_duration`, the service's own duration, the declared
//! minimum hours, then 1 — and never below the declared minimum.

use crate::money::to_decimal;
use rust_decimal::Decimal;
use shared::catering::{SelectionMap, ServiceSelection};
use std::collections::BTreeMap;

/// Quantity booked for one role
#[derive(Debug, Clone, PartialEq)]
pub struct RoleBooking {
    pub role_id: String,
    pub quantity: Decimal,
}

/// Derived staffing for one staff service
#[derive(Debug, Clone, PartialEq)]
pub struct Staffing {
    /// Total staff across all matched keys
    pub head_count: Decimal,
    /// Effective booked hours, shared across roles
    pub hours: Decimal,
    /// Role-level quantities; empty when only aggregate keys were set
    pub per_role: Vec<RoleBooking>,
}

/// Reconstruct effective staff count and duration from the flat map
pub fn derive(service: &ServiceSelection, selections: &SelectionMap) -> Staffing {
    let prefix = format!("{}_", service.id);

    // Matched role keys: `{serviceId}_roleId` or a bare valid role id.
    // Duration entries are already excluded by quantity_entries.
    let matched: Vec<(&str, Decimal)> = selections
        .quantity_entries()
        .filter(|(key, _)| key.starts_with(&prefix) || service.details.has_role(key))
        .collect();

    let head_count = if matched.is_empty() {
        selections
            .quantity(&service.id)
            .or_else(|| service.quantity.map(Decimal::from))
            .unwrap_or(Decimal::ONE)
    } else {
        matched.iter().map(|(_, qty)| *qty).sum()
    };

    let matched_durations: Vec<Decimal> = matched
        .iter()
        .filter_map(|(key, _)| selections.duration_of(key))
        .collect();

    let minimum_hours = service.details.minimum_hours.map(to_decimal);

    let mut hours = matched_durations
        .iter()
        .copied()
        .max()
        .or_else(|| selections.duration_of(&service.id))
        .or_else(|| service.duration.map(to_decimal))
        .or(minimum_hours)
        .unwrap_or(Decimal::ONE);

    if let Some(minimum) = minimum_hours {
        hours = hours.max(minimum);
    }

    // Aggregate quantities per role id, folding prefixed and bare keys
    let mut per_role: BTreeMap<String, Decimal> = BTreeMap::new();
    for (key, qty) in &matched {
        let role_id = key.strip_prefix(&prefix).unwrap_or(key);
        *per_role.entry(role_id.to_string()).or_default() += *qty;
    }

    Staffing {
        head_count,
        hours,
        per_role: per_role
            .into_iter()
            .map(|(role_id, quantity)| RoleBooking { role_id, quantity })
            .collect(),
    }
}
