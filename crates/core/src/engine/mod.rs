//! Analytics engine facade and report cache.

pub mod cache;
pub mod error;
pub mod service;
pub mod types;

pub use cache::AnalyticsCache;
pub use error::EngineError;
pub use service::{AnalyticsEngine, resolve_as_of_month};
pub use types::{AnalyticsReport, BudgetState};
