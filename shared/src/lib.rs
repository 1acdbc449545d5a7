//! Shared types for the catering marketplace pricing engine
//!
//! Wire-level data model consumed by the pricing engine and by the
//! presentation/payment layers: service selections and their nested
//! catalog bags, custom adjustments, fee settings, and the persisted
//! pricing snapshot / final totals structures.

pub mod adjustment;
pub mod catering;
pub mod settings;
pub mod snapshot;

// Re-exports
pub use adjustment::{Adjustment, AdjustmentMode, AdjustmentType};
pub use catering::{
    CatalogEntry, Combo, ComboCategory, RawPrice, SelectionMap, ServiceDetails, ServiceSelection,
    ServiceType, StaffRole,
};
pub use settings::{DeliveryQuote, FeeSettings, FeeType, TaxJurisdictionLine, TaxOverride};
pub use snapshot::{FinalTotals, MissingField, PricingSnapshot, SnapshotRecord, TaxStatus};
