//! Order pricing and totals reconciliation engine
//!
//! Turns a cart of heterogeneous service selections plus a flat
//! quantity map into a reconciled monetary breakdown (subtotal,
//! service fee, delivery fee, adjustments, tax, grand total), and
//! produces identical numbers whether computed live or passed through
//! from a persisted snapshot.
//!
//! The engine is a pure, synchronous function of its inputs: no I/O,
//! no internal state, no suspension points. Asynchronous collaborators
//! (admin settings, delivery quotes, tax jurisdiction lookup) resolve
//! before the engine is invoked and hand in plain values.

pub mod adjustments;
pub mod catalog;
pub mod error;
pub mod fees;
pub mod money;
pub mod reconcile;
pub mod selector;
pub mod staffing;
pub mod tax;
pub mod totals;

// Re-exports
pub use adjustments::{AdjustmentSplit, split};
pub use catalog::{Catalog, ItemKind, ResolvedItem};
pub use error::PricingError;
pub use reconcile::{EngineConfig, LiveInputs, PricingSource, reconcile};
pub use selector::{CatalogSelector, KeyContext, SelectionKey};
pub use staffing::{RoleBooking, Staffing};
pub use tax::{TaxContext, TaxOutcome};
pub use totals::LineTotals;
