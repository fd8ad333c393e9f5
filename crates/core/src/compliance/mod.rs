//! Compliance scoring and savings opportunities over the vendor portfolio.

pub mod optimization;
pub mod scoring;
pub mod types;

pub use optimization::OptimizationAnalyzer;
pub use scoring::ComplianceScorer;
pub use types::{
    ComplianceFinding, ComplianceMetrics, FindingRule, OpportunityType, OptimizationOpportunity,
    Priority, Severity,
};
