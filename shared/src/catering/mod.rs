//! Catering booking data model
//!
//! This module provides the types for a booked cart:
//! - Selections: purchased service lines with their catalog bags
//! - Prices: un-normalized price fields as produced by the booking UI
//! - Selection map: flat string-keyed quantity/duration map

pub mod details;
pub mod price;
pub mod selection;

// Re-exports
pub use details::{CatalogEntry, Combo, ComboCategory, ServiceDetails, StaffRole};
pub use price::RawPrice;
pub use selection::{SelectionMap, ServiceSelection, ServiceType, DURATION_SUFFIX};
