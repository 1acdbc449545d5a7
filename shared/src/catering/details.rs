//! Nested service details
//!
//! The shape of `ServiceDetails` depends on the service type: catering
//! services carry menu items and combos, staff services carry roles,
//! rentals carry units. Flat-priced services carry none of these.

use super::price::RawPrice;
use serde::{Deserialize, Serialize};

/// A directly priced catalog item (menu item, rental unit, combo sub-item)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: RawPrice,
}

/// A staff role priced per person per hour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffRole {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rate_per_hour: RawPrice,
    /// Per-role minimum booking hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_hours: Option<f64>,
}

/// One category inside a combo (e.g. "Mains", "Sides")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComboCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<CatalogEntry>,
}

/// A combo package with per-category item choices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Combo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<ComboCategory>,
}

/// Type-dependent detail bag attached to a service selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceDetails {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<CatalogEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combos: Vec<Combo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub staff_roles: Vec<StaffRole>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rental_units: Vec<CatalogEntry>,
    /// Service-level minimum booking hours (staff services)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_hours: Option<f64>,
}

impl ServiceDetails {
    pub fn is_empty(&self) -> bool {
        self.menu_items.is_empty()
            && self.combos.is_empty()
            && self.staff_roles.is_empty()
            && self.rental_units.is_empty()
            && self.minimum_hours.is_none()
    }

    /// Whether `role_id` is one of this service's declared staff roles
    pub fn has_role(&self, role_id: &str) -> bool {
        self.staff_roles.iter().any(|r| r.id == role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_details_skipped_in_json() {
        let details = ServiceDetails::default();
        assert!(details.is_empty());
        let json = serde_json::to_string(&details).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_has_role() {
        let details = ServiceDetails {
            staff_roles: vec![StaffRole {
                id: "bartender".to_string(),
                name: "Bartender".to_string(),
                rate_per_hour: RawPrice::from(35.0),
                minimum_hours: Some(4.0),
            }],
            ..Default::default()
        };
        assert!(details.has_role("bartender"));
        assert!(!details.has_role("server"));
    }
}
