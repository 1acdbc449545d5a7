//! Fee settings and external collaborator outputs
//!
//! The admin-settings, tax-jurisdiction and distance services are
//! external; the engine consumes their already-resolved outputs. A
//! failed settings fetch degrades to `FeeSettings::default()` (5%
//! percentage service fee), injected through the engine config rather
//! than read from a module constant.

use serde::{Deserialize, Serialize};

/// How the marketplace service fee is computed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    #[default]
    Percentage,
    Fixed,
}

/// Admin-configured fee settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeSettings {
    pub service_fee_percentage: f64,
    pub service_fee_fixed: f64,
    pub service_fee_type: FeeType,
    /// Forces tax to 0 while still surfacing the would-be rate
    #[serde(default)]
    pub is_tax_exempt: bool,
    /// Forces the service fee to 0 without removing it from display
    #[serde(default)]
    pub is_service_fee_waived: bool,
}

impl Default for FeeSettings {
    fn default() -> Self {
        Self {
            service_fee_percentage: 5.0,
            service_fee_fixed: 0.0,
            service_fee_type: FeeType::Percentage,
            is_tax_exempt: false,
            is_service_fee_waived: false,
        }
    }
}

/// One jurisdiction line inside a tax override breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxJurisdictionLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub tax_rate: f64,
}

/// Explicit tax override attached to a quoted draft
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaxOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<TaxJurisdictionLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
}

impl TaxOverride {
    /// First usable rate: explicit rate, else the leading breakdown line
    pub fn effective_rate(&self) -> Option<f64> {
        self.rate.or_else(|| self.breakdown.first().map(|b| b.tax_rate))
    }
}

/// Distance-based delivery quote from the external provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryQuote {
    pub fee: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
