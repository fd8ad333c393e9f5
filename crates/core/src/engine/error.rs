//! Analytics engine error types.

use thiserror::Error;

use crate::budget::BudgetError;

/// Analytics engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid budget input, such as a month outside 1-12.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// The snapshot could not be decoded.
    #[error("Invalid budget snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),

    /// The snapshot could not be serialized for hashing.
    #[error("Failed to fingerprint snapshot: {0}")]
    Fingerprint(#[from] serde_json::Error),
}
