//! Budget error types.

use spendlens_shared::types::InvalidMonth;
use thiserror::Error;

/// Budget-related errors.
///
/// Numeric problems never surface here; they fall back to defined values.
/// Only structurally invalid requests are rejected.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// A month number outside 1-12 was requested.
    #[error(transparent)]
    InvalidMonth(#[from] InvalidMonth),
}
