//! Core analytics for Spendlens.
//!
//! Pure, deterministic computations over an immutable budget snapshot. No
//! I/O happens here; every monetary value is a `Decimal`.
//!
//! # Modules
//!
//! - `budget` - Monthly aggregation, YTD/forecast composition and KPIs
//! - `vendor` - Proration, concentration, risk and dependency analysis
//! - `compliance` - Data completeness, audit readiness and savings opportunities
//! - `summary` - Narrative summary paragraphs
//! - `engine` - One-call analytics pipeline and report cache

pub mod budget;
pub mod compliance;
pub mod engine;
pub mod summary;
pub mod vendor;

pub use engine::{AnalyticsCache, AnalyticsEngine, AnalyticsReport, BudgetState, EngineError};
