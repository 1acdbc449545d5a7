//! Engine error types

use shared::MissingField;
use thiserror::Error;

/// Errors surfaced by reconciliation
///
/// Stale catalog keys, unparseable prices and absent settings all
/// degrade silently; the one fatal case is a persisted snapshot missing
/// a required monetary field, since that record is the legal charge
/// amount and must not be approximated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("malformed pricing snapshot: {0}")]
    MalformedSnapshot(#[from] MissingField),
}
