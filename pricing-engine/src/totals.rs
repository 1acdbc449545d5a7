//! Line-item totalizer
//!
//! One pass over the selection map prices every item-level selection
//! through the catalog; a second pass over the services adds staff
//! totals (via the staffing deriver) and flat-priced services. Each
//! service's total is rounded to monetary precision before summing so
//! the subtotal always equals the sum of the displayed lines.

use crate::catalog::{Catalog, ItemKind};
use crate::money::round_money;
use crate::selector::{CatalogSelector, KeyContext};
use crate::staffing::{self, Staffing};
use rust_decimal::Decimal;
use shared::catering::{SelectionMap, ServiceSelection};
use std::collections::BTreeMap;

/// Per-service totals and their sum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineTotals {
    pub per_service: BTreeMap<String, Decimal>,
    pub subtotal: Decimal,
}

/// Compute every service's subtotal contribution
pub fn totalize(
    services: &[ServiceSelection],
    catalog: &Catalog,
    selections: &SelectionMap,
) -> LineTotals {
    let ctx = KeyContext::from_services(services);
    let mut per_service: BTreeMap<String, Decimal> = BTreeMap::new();

    // Item-level selections: menu items, rental units, combo sub-items
    for (key, quantity) in selections.quantity_entries() {
        if ctx.is_service_id(key) {
            // Aggregate quantity for a service, priced in the pass below
            continue;
        }
        let selector = CatalogSelector::parse(key, &ctx);
        match catalog.resolve(&selector) {
            Some(item) if item.kind == ItemKind::Catalog => {
                *per_service.entry(item.service_id.clone()).or_default() +=
                    item.unit_price * quantity;
            }
            // Staff roles are priced below with derived count × hours
            Some(_) => {}
            None => {
                tracing::warn!(key, "unresolvable selection key, contributes 0");
            }
        }
    }

    // Staff and flat-priced services
    for service in services {
        let entry = per_service.entry(service.id.clone()).or_default();
        if service.service_type == shared::ServiceType::Staff {
            let staffing = staffing::derive(service, selections);
            *entry += staff_total(service, &staffing);
        } else if !service.service_type.requires_item_selection() {
            let quantity = selections
                .quantity(&service.id)
                .or_else(|| service.quantity.map(Decimal::from))
                .unwrap_or(Decimal::ONE);
            *entry += service.price.amount() * quantity;
        }
    }

    let mut subtotal = Decimal::ZERO;
    for total in per_service.values_mut() {
        *total = round_money(*total);
        subtotal += *total;
    }

    LineTotals {
        per_service,
        subtotal,
    }
}

/// Price one staff service from its derived staffing
///
/// Role-level bookings price at each role's hourly rate; the aggregate
/// fallback (no role keys in the map) prices head count × hours at the
/// service's declared price.
fn staff_total(service: &ServiceSelection, staffing: &Staffing) -> Decimal {
    if staffing.per_role.is_empty() {
        return service.price.amount() * staffing.head_count * staffing.hours;
    }

    let mut total = Decimal::ZERO;
    for booking in &staffing.per_role {
        match service
            .details
            .staff_roles
            .iter()
            .find(|role| role.id == booking.role_id)
        {
            Some(role) => {
                total += role.rate_per_hour.amount() * booking.quantity * staffing.hours;
            }
            None => {
                tracing::warn!(
                    service_id = %service.id,
                    role_id = %booking.role_id,
                    "unknown staff role in selection map, contributes 0"
                );
            }
        }
    }
    total
}
