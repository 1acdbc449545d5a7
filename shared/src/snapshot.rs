//! Pricing snapshot and final totals
//!
//! A snapshot is created exactly once when an invoice is finalized and
//! is the legal record of what was charged. It is never recomputed; the
//! reconciler returns its numbers verbatim. A stored record missing a
//! required monetary field is fatal for reconciliation — the amount
//! must not be guessed.

use crate::adjustment::Adjustment;
use crate::settings::DeliveryQuote;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A required monetary field was absent from a stored snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pricing snapshot missing required field `{0}`")]
pub struct MissingField(pub &'static str);

/// Resolution state of the tax component
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxStatus {
    /// Tax was computed or taken from a snapshot/override
    #[default]
    Resolved,
    /// No billing address, override or snapshot — shown as 0, pending
    Pending,
    /// Account is tax exempt; rate surfaced for display only
    Exempt,
}

/// Persisted snapshot as read from storage
///
/// Every monetary field is optional: stored records may predate fields
/// or be partially written. `verify` promotes to `PricingSnapshot`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SnapshotRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustments_total: Option<f64>,
    #[serde(default)]
    pub adjustments_breakdown: Vec<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Issuance timestamp (Unix millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
}

impl SnapshotRecord {
    /// Validate required fields, promoting to the authoritative form
    pub fn verify(&self) -> Result<PricingSnapshot, MissingField> {
        Ok(PricingSnapshot {
            subtotal: self.subtotal.ok_or(MissingField("subtotal"))?,
            service_fee: self.service_fee.ok_or(MissingField("service_fee"))?,
            delivery_fee: self.delivery_fee.ok_or(MissingField("delivery_fee"))?,
            adjustments_total: self
                .adjustments_total
                .ok_or(MissingField("adjustments_total"))?,
            adjustments_breakdown: self.adjustments_breakdown.clone(),
            tax: self.tax.ok_or(MissingField("tax"))?,
            tax_rate: self.tax_rate.ok_or(MissingField("tax_rate"))?,
            total: self.total.ok_or(MissingField("total"))?,
            issued_at: self.issued_at,
        })
    }
}

/// Verified, authoritative pricing snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingSnapshot {
    pub subtotal: f64,
    pub service_fee: f64,
    pub delivery_fee: f64,
    pub adjustments_total: f64,
    #[serde(default)]
    pub adjustments_breakdown: Vec<Adjustment>,
    pub tax: f64,
    pub tax_rate: f64,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
}

/// Reconciled monetary breakdown
///
/// The exact structure the payment layer charges against. Consumers
/// must use `total` as returned, never re-derive it from the parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalTotals {
    pub subtotal: f64,
    pub service_fee: f64,
    pub delivery_fee: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_details: Option<DeliveryQuote>,
    pub adjustments_total: f64,
    #[serde(default)]
    pub adjustments_breakdown: Vec<Adjustment>,
    pub tax: f64,
    pub tax_rate: f64,
    #[serde(default)]
    pub tax_status: TaxStatus,
    pub total: f64,
    /// Per-service subtotal contributions, for the presentation layer
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub service_totals: BTreeMap<String, f64>,
}

impl FinalTotals {
    /// Wrap a verified snapshot verbatim (snapshot mode)
    pub fn from_snapshot(snapshot: PricingSnapshot) -> Self {
        Self {
            subtotal: snapshot.subtotal,
            service_fee: snapshot.service_fee,
            delivery_fee: snapshot.delivery_fee,
            delivery_details: None,
            adjustments_total: snapshot.adjustments_total,
            adjustments_breakdown: snapshot.adjustments_breakdown,
            tax: snapshot.tax,
            tax_rate: snapshot.tax_rate,
            tax_status: TaxStatus::Resolved,
            total: snapshot.total,
            service_totals: BTreeMap::new(),
        }
    }

    /// Freeze into a persisted record at invoice issuance
    pub fn into_snapshot(self) -> SnapshotRecord {
        SnapshotRecord {
            subtotal: Some(self.subtotal),
            service_fee: Some(self.service_fee),
            delivery_fee: Some(self.delivery_fee),
            adjustments_total: Some(self.adjustments_total),
            adjustments_breakdown: self.adjustments_breakdown,
            tax: Some(self.tax),
            tax_rate: Some(self.tax_rate),
            total: Some(self.total),
            issued_at: Some(chrono::Utc::now().timestamp_millis()),
        }
    }
}
