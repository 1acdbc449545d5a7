//! Typed selection-key grammar
//!
//! The booking UI's flat map encodes compound identity in opaque
//! strings with no shared schema. This module is the single place that
//! turns a raw key into a structured selector; everything downstream
//! pattern-matches on the typed form instead of re-doing prefix/suffix
//! string tests.
//!
//! Because ids may themselves contain underscores, splitting is done
//! against a `KeyContext` of known service and combo ids rather than by
//! counting separators.

use shared::catering::{DURATION_SUFFIX, ServiceSelection};
use std::collections::BTreeSet;

/// Known service/combo ids, used to split compound keys structurally
#[derive(Debug, Clone, Default)]
pub struct KeyContext {
    service_ids: BTreeSet<String>,
    combo_ids: BTreeSet<String>,
}

impl KeyContext {
    pub fn from_services(services: &[ServiceSelection]) -> Self {
        let mut ctx = Self::default();
        for service in services {
            ctx.service_ids.insert(service.id.clone());
            for combo in &service.details.combos {
                ctx.combo_ids.insert(combo.id.clone());
            }
        }
        ctx
    }

    pub fn is_service_id(&self, key: &str) -> bool {
        self.service_ids.contains(key)
    }
}

/// Structured identity of a purchasable unit
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CatalogSelector {
    /// Plain catalog item id (menu item, rental unit) or an
    /// unrecognized key that will resolve to nothing
    Item(String),
    /// A staff role on a specific service (`serviceId_roleId`)
    ServiceRole { service_id: String, role_id: String },
    /// A combo sub-item (`comboId_categoryId_itemId`)
    ComboItem {
        combo_id: String,
        category_id: String,
        item_id: String,
    },
}

impl CatalogSelector {
    /// Parse a raw quantity key against the known id sets
    pub fn parse(raw: &str, ctx: &KeyContext) -> Self {
        // Combo keys carry two id segments after the combo id
        for combo_id in &ctx.combo_ids {
            if let Some(rest) = raw.strip_prefix(combo_id.as_str()) {
                if let Some(rest) = rest.strip_prefix('_') {
                    if let Some((category_id, item_id)) = rest.split_once('_') {
                        return Self::ComboItem {
                            combo_id: combo_id.clone(),
                            category_id: category_id.to_string(),
                            item_id: item_id.to_string(),
                        };
                    }
                }
            }
        }

        for service_id in &ctx.service_ids {
            if let Some(rest) = raw.strip_prefix(service_id.as_str()) {
                if let Some(role_id) = rest.strip_prefix('_') {
                    if !role_id.is_empty() {
                        return Self::ServiceRole {
                            service_id: service_id.clone(),
                            role_id: role_id.to_string(),
                        };
                    }
                }
            }
        }

        Self::Item(raw.to_string())
    }
}

/// A fully classified selection-map entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionKey {
    /// Quantity of a purchasable unit
    Quantity(CatalogSelector),
    /// Hours attached to the sibling base key; never a quantity
    Duration(String),
}

impl SelectionKey {
    pub fn parse(raw: &str, ctx: &KeyContext) -> Self {
        match raw.strip_suffix(DURATION_SUFFIX) {
            Some(base) => Self::Duration(base.to_string()),
            None => Self::Quantity(CatalogSelector::parse(raw, ctx)),
        }
    }
}
