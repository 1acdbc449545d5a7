//! Catalog resolver
//!
//! Indexes every priced unit reachable from the booked services (menu
//! items, rental units, combo sub-items, staff roles) and resolves a
//! selector to its owning service and unit price. A miss is never
//! fatal: a stale or renamed catalog item contributes zero to totals.

use crate::money::to_f64;
use crate::selector::CatalogSelector;
use rust_decimal::Decimal;
use shared::catering::ServiceSelection;
use std::collections::BTreeMap;

/// What a selector resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Directly purchasable item: price × quantity
    Catalog,
    /// Staff role: priced by the staffing deriver (rate × count × hours)
    StaffRole,
}

/// A resolved priced unit
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    pub service_id: String,
    pub kind: ItemKind,
    pub unit_price: Decimal,
}

/// Lookup table over the cart's catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<CatalogSelector, ResolvedItem>,
}

impl Catalog {
    /// Build the index from the booked services
    pub fn index(services: &[ServiceSelection]) -> Self {
        let mut entries = BTreeMap::new();

        for service in services {
            let details = &service.details;

            for item in details.menu_items.iter().chain(&details.rental_units) {
                insert(
                    &mut entries,
                    CatalogSelector::Item(item.id.clone()),
                    ResolvedItem {
                        service_id: service.id.clone(),
                        kind: ItemKind::Catalog,
                        unit_price: item.price.amount(),
                    },
                );
            }

            for combo in &details.combos {
                for category in &combo.categories {
                    for item in &category.items {
                        insert(
                            &mut entries,
                            CatalogSelector::ComboItem {
                                combo_id: combo.id.clone(),
                                category_id: category.id.clone(),
                                item_id: item.id.clone(),
                            },
                            ResolvedItem {
                                service_id: service.id.clone(),
                                kind: ItemKind::Catalog,
                                unit_price: item.price.amount(),
                            },
                        );
                    }
                }
            }

            for role in &details.staff_roles {
                let resolved = ResolvedItem {
                    service_id: service.id.clone(),
                    kind: ItemKind::StaffRole,
                    unit_price: role.rate_per_hour.amount(),
                };
                insert(
                    &mut entries,
                    CatalogSelector::ServiceRole {
                        service_id: service.id.clone(),
                        role_id: role.id.clone(),
                    },
                    resolved.clone(),
                );
                // Unprefixed role keys are legal when the role id is
                // unambiguous in the map
                insert(&mut entries, CatalogSelector::Item(role.id.clone()), resolved);
            }
        }

        Self { entries }
    }

    /// Resolve a selector to its priced unit; None for stale keys
    pub fn resolve(&self, selector: &CatalogSelector) -> Option<&ResolvedItem> {
        self.entries.get(selector)
    }
}

fn insert(
    entries: &mut BTreeMap<CatalogSelector, ResolvedItem>,
    selector: CatalogSelector,
    item: ResolvedItem,
) {
    if let Some(existing) = entries.get(&selector) {
        tracing::debug!(
            ?selector,
            kept = %existing.service_id,
            dropped = %item.service_id,
            price = to_f64(existing.unit_price),
            "duplicate catalog id, first entry kept"
        );
        return;
    }
    entries.insert(selector, item);
}
