//! Snapshot reconciler
//!
//! The single entry point. A persisted snapshot is the legal record of
//! what was charged: when one exists its numbers pass through verbatim,
//! even if the live inputs have since diverged. Otherwise the engine
//! computes an equivalent structure live:
//!
//! ```text
//! pre_tax = subtotal + service_fee + delivery_fee + taxable_adjustments
//! tax     = resolve(pre_tax)            (0 if exempt)
//! total   = pre_tax + tax + non_taxable_adjustments
//! ```
//!
//! Non-taxable adjustments are deliberately added after tax (post-tax
//! gratuities); taxable adjustments are folded into the tax base.

use crate::adjustments;
use crate::catalog::Catalog;
use crate::error::PricingError;
use crate::fees;
use crate::money::to_f64;
use crate::tax::{self, TaxContext};
use crate::totals;
use serde::{Deserialize, Serialize};
use shared::catering::{SelectionMap, ServiceSelection};
use shared::settings::{DeliveryQuote, FeeSettings};
use shared::{Adjustment, FinalTotals, SnapshotRecord};

/// Injected engine configuration
///
/// Holds the settings substituted when the admin-settings fetch fails,
/// so the fallback is an explicit value rather than hidden module
/// state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    pub default_settings: FeeSettings,
}

/// Inputs for a live (draft/cart) computation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LiveInputs {
    #[serde(default)]
    pub services: Vec<ServiceSelection>,
    #[serde(default)]
    pub selections: SelectionMap,
    /// None when the settings fetch failed; the config default applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<FeeSettings>,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryQuote>,
    #[serde(default)]
    pub taxes: TaxContext,
}

/// What to reconcile: compute live, or pass a snapshot through
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingSource {
    Live(LiveInputs),
    Snapshot(SnapshotRecord),
}

/// Produce the reconciled totals the payment layer charges against
///
/// Pure and idempotent: identical inputs yield identical output, safe
/// to call speculatively on every edit.
pub fn reconcile(
    source: &PricingSource,
    config: &EngineConfig,
) -> Result<FinalTotals, PricingError> {
    match source {
        PricingSource::Snapshot(record) => {
            let snapshot = record.verify()?;
            tracing::debug!(total = snapshot.total, "snapshot passthrough");
            Ok(FinalTotals::from_snapshot(snapshot))
        }
        PricingSource::Live(inputs) => Ok(compute_live(inputs, config)),
    }
}

fn compute_live(inputs: &LiveInputs, config: &EngineConfig) -> FinalTotals {
    let settings = inputs
        .settings
        .as_ref()
        .unwrap_or(&config.default_settings);

    let catalog = Catalog::index(&inputs.services);
    let line = totals::totalize(&inputs.services, &catalog, &inputs.selections);

    let service_fee = fees::service_fee(line.subtotal, settings);
    let delivery_fee = fees::delivery_fee(inputs.delivery.as_ref());
    let split = adjustments::split(&inputs.adjustments);

    let pre_tax = line.subtotal + service_fee + delivery_fee + split.taxable;
    let tax = tax::resolve(pre_tax, &inputs.taxes, settings.is_tax_exempt);
    let total = pre_tax + tax.amount + split.non_taxable;

    tracing::debug!(
        subtotal = to_f64(line.subtotal),
        total = to_f64(total),
        status = ?tax.status,
        "live totals computed"
    );

    FinalTotals {
        subtotal: to_f64(line.subtotal),
        service_fee: to_f64(service_fee),
        delivery_fee: to_f64(delivery_fee),
        delivery_details: inputs.delivery.clone(),
        adjustments_total: to_f64(split.total()),
        adjustments_breakdown: inputs.adjustments.clone(),
        tax: to_f64(tax.amount),
        tax_rate: to_f64(tax.rate),
        tax_status: tax.status,
        total: to_f64(total),
        service_totals: line
            .per_service
            .iter()
            .map(|(id, amount)| (id.clone(), to_f64(*amount)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::adjustment::{AdjustmentMode, AdjustmentType};
    use shared::catering::{
        CatalogEntry, RawPrice, ServiceDetails, ServiceType, StaffRole,
    };
    use shared::settings::TaxOverride;
    use shared::{MissingField, TaxStatus};

    fn map(entries: &[(&str, f64)]) -> SelectionMap {
        let mut m = SelectionMap::new();
        for (k, v) in entries {
            m.set(*k, *v);
        }
        m
    }

    fn adjustment(id: &str, amount: f64, taxable: bool) -> Adjustment {
        Adjustment {
            id: id.to_string(),
            label: id.to_string(),
            adjustment_type: AdjustmentType::FixedAmount,
            mode: if amount < 0.0 {
                AdjustmentMode::Discount
            } else {
                AdjustmentMode::Surcharge
            },
            value: amount.abs(),
            amount,
            taxable,
        }
    }

    fn sample_inputs() -> LiveInputs {
        LiveInputs {
            services: vec![
                ServiceSelection {
                    id: "cat-1".to_string(),
                    service_type: ServiceType::Catering,
                    price: RawPrice::default(),
                    quantity: None,
                    duration: None,
                    details: ServiceDetails {
                        menu_items: vec![CatalogEntry {
                            id: "paella".to_string(),
                            name: "Paella".to_string(),
                            price: RawPrice::from(20.0),
                        }],
                        ..Default::default()
                    },
                },
                ServiceSelection {
                    id: "S1".to_string(),
                    service_type: ServiceType::Staff,
                    price: RawPrice::from(40.0),
                    quantity: None,
                    duration: None,
                    details: ServiceDetails {
                        staff_roles: vec![StaffRole {
                            id: "server".to_string(),
                            name: "Server".to_string(),
                            rate_per_hour: RawPrice::from(25.0),
                            minimum_hours: None,
                        }],
                        minimum_hours: Some(3.0),
                        ..Default::default()
                    },
                },
            ],
            selections: map(&[
                ("paella", 50.0),
                ("S1_server", 2.0),
                ("S1_server_duration", 4.0),
            ]),
            settings: Some(FeeSettings::default()),
            adjustments: vec![
                adjustment("setup", 100.0, true),
                adjustment("gratuity", 150.0, false),
            ],
            delivery: Some(DeliveryQuote {
                fee: 60.0,
                distance_miles: Some(12.0),
                description: None,
            }),
            taxes: TaxContext {
                taxes: None,
                location_rate: Some(8.0),
            },
        }
    }

    // subtotal: 50*20 + 2*25*4 = 1000 + 200 = 1200
    // service fee: 5% of 1200 = 60; delivery 60; taxable adj 100
    // pre_tax = 1420; tax = 8% = 113.60; total = 1420 + 113.60 + 150 = 1683.60

    #[test]
    fn test_live_breakdown() {
        let totals = reconcile(
            &PricingSource::Live(sample_inputs()),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(totals.subtotal, 1200.0);
        assert_eq!(totals.service_fee, 60.0);
        assert_eq!(totals.delivery_fee, 60.0);
        assert_eq!(totals.adjustments_total, 250.0);
        assert_eq!(totals.tax, 113.60);
        assert_eq!(totals.tax_rate, 8.0);
        assert_eq!(totals.tax_status, TaxStatus::Resolved);
        assert_eq!(totals.total, 1683.60);
        assert_eq!(totals.service_totals["cat-1"], 1000.0);
        assert_eq!(totals.service_totals["S1"], 200.0);
    }

    #[test]
    fn test_idempotence() {
        let source = PricingSource::Live(sample_inputs());
        let config = EngineConfig::default();
        let first = reconcile(&source, &config).unwrap();
        let second = reconcile(&source, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_additivity_identity() {
        let totals = reconcile(
            &PricingSource::Live(sample_inputs()),
            &EngineConfig::default(),
        )
        .unwrap();

        // total == subtotal + service_fee + delivery_fee + taxable + tax + non_taxable
        let rebuilt = totals.subtotal
            + totals.service_fee
            + totals.delivery_fee
            + 100.0 // taxable adjustments
            + totals.tax
            + 150.0; // non-taxable adjustments
        assert_eq!(totals.total, rebuilt);
    }

    #[test]
    fn test_snapshot_precedence_over_divergent_live_inputs() {
        let snapshot = SnapshotRecord {
            subtotal: Some(999.0),
            service_fee: Some(49.95),
            delivery_fee: Some(0.0),
            adjustments_total: Some(0.0),
            adjustments_breakdown: vec![],
            tax: Some(83.92),
            tax_rate: Some(8.0),
            total: Some(1132.87),
            issued_at: Some(1704067200000),
        };

        let totals = reconcile(
            &PricingSource::Snapshot(snapshot),
            &EngineConfig::default(),
        )
        .unwrap();

        // The snapshot's numbers come back unchanged regardless of
        // whatever the cart looks like now
        assert_eq!(totals.subtotal, 999.0);
        assert_eq!(totals.total, 1132.87);
        assert_eq!(totals.tax_status, TaxStatus::Resolved);
    }

    #[test]
    fn test_malformed_snapshot_is_fatal() {
        let snapshot = SnapshotRecord {
            subtotal: Some(999.0),
            ..Default::default()
        };
        let err = reconcile(
            &PricingSource::Snapshot(snapshot),
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PricingError::MalformedSnapshot(MissingField("service_fee"))
        );
    }

    #[test]
    fn test_settings_fetch_failure_degrades_to_config_default() {
        let mut inputs = sample_inputs();
        inputs.settings = None;
        inputs.adjustments.clear();
        inputs.delivery = None;

        let totals = reconcile(&PricingSource::Live(inputs), &EngineConfig::default()).unwrap();
        // Default settings: 5% percentage fee
        assert_eq!(totals.service_fee, 60.0);
    }

    #[test]
    fn test_exemption_zero_tax_rate_still_displayed() {
        let mut inputs = sample_inputs();
        inputs.settings = Some(FeeSettings {
            is_tax_exempt: true,
            ..FeeSettings::default()
        });

        let totals = reconcile(&PricingSource::Live(inputs), &EngineConfig::default()).unwrap();
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.tax_rate, 8.0);
        assert_eq!(totals.tax_status, TaxStatus::Exempt);
        // total drops by exactly the would-be tax
        assert_eq!(totals.total, 1570.0);
    }

    #[test]
    fn test_pending_tax_when_no_address_override_or_snapshot() {
        let mut inputs = sample_inputs();
        inputs.taxes = TaxContext::default();

        let totals = reconcile(&PricingSource::Live(inputs), &EngineConfig::default()).unwrap();
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.tax_status, TaxStatus::Pending);
    }

    #[test]
    fn test_override_tax_on_quoted_draft() {
        let mut inputs = sample_inputs();
        inputs.taxes = TaxContext {
            taxes: Some(TaxOverride {
                amount: Some(99.99),
                rate: Some(7.0),
                ..Default::default()
            }),
            location_rate: Some(8.0),
        };

        let totals = reconcile(&PricingSource::Live(inputs), &EngineConfig::default()).unwrap();
        assert_eq!(totals.tax, 99.99);
        assert_eq!(totals.tax_rate, 7.0);
    }

    #[test]
    fn test_non_taxable_adjustment_bypasses_tax_base() {
        let mut inputs = sample_inputs();
        inputs.adjustments = vec![adjustment("gratuity", 200.0, false)];
        inputs.delivery = None;

        let totals = reconcile(&PricingSource::Live(inputs), &EngineConfig::default()).unwrap();
        // pre_tax = 1200 + 60 = 1260; tax = 100.80; total = 1260 + 100.80 + 200
        assert_eq!(totals.tax, 100.80);
        assert_eq!(totals.total, 1560.80);
    }

    #[test]
    fn test_live_inputs_from_wire_json() {
        // The shape the booking UI actually posts
        let inputs: LiveInputs = serde_json::from_value(serde_json::json!({
            "services": [{
                "id": "V1",
                "service_type": "VENUE",
                "price": "$2,400.00",
                "quantity": 1
            }],
            "selections": {},
            "settings": {
                "service_fee_percentage": 5.0,
                "service_fee_fixed": 0.0,
                "service_fee_type": "PERCENTAGE"
            },
            "taxes": { "location_rate": 8.0 }
        }))
        .unwrap();

        let totals = reconcile(&PricingSource::Live(inputs), &EngineConfig::default()).unwrap();
        // 2400 + 5% fee (120) = 2520; tax 8% = 201.60
        assert_eq!(totals.subtotal, 2400.0);
        assert_eq!(totals.service_fee, 120.0);
        assert_eq!(totals.tax, 201.60);
        assert_eq!(totals.total, 2721.60);
    }

    #[test]
    fn test_issued_snapshot_round_trips_through_reconcile() {
        let live = reconcile(
            &PricingSource::Live(sample_inputs()),
            &EngineConfig::default(),
        )
        .unwrap();

        let frozen = live.clone().into_snapshot();
        let replayed = reconcile(&PricingSource::Snapshot(frozen), &EngineConfig::default()).unwrap();

        assert_eq!(replayed.subtotal, live.subtotal);
        assert_eq!(replayed.total, live.total);
        assert_eq!(replayed.adjustments_breakdown, live.adjustments_breakdown);
    }
}
