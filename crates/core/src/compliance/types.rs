//! Compliance and optimization types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Severity of a compliance finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Needs attention.
    Medium,
    /// Blocks audit readiness.
    High,
}

/// Rule that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingRule {
    /// Vendor master data completeness below 80%.
    VendorDataCompleteness,
    /// Tracking completeness below 70%.
    TrackingCompleteness,
    /// Budget compliance rate below 85%.
    BudgetCompliance,
}

/// A failed compliance rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceFinding {
    /// Rule.
    pub rule: FindingRule,
    /// Severity.
    pub severity: Severity,
    /// Human-readable description including the measured value.
    pub message: String,
}

/// Compliance scores of a vendor portfolio. All scores are percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceMetrics {
    /// Share of vendor records with every required field.
    pub vendor_data_completeness: Decimal,
    /// Share of filled monthly tracking cells.
    pub tracking_completeness: Decimal,
    /// Share of budgeted vendors within budget.
    pub budget_compliance_rate: Decimal,
    /// Mean of the two completeness scores.
    pub data_quality_score: Decimal,
    /// Share of tracked vendors with a budget record.
    pub process_adherence: Decimal,
    /// 100 minus finding penalties, floored at 0.
    pub audit_readiness_score: Decimal,
    /// Failed rules.
    pub findings: Vec<ComplianceFinding>,
}

/// Kind of savings opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    /// More than two vendors in one category.
    Consolidation,
    /// Less than half of a sizeable allocation used.
    Underutilized,
    /// Spend more than 10% above allocation.
    Overbudget,
    /// Reserved; never produced.
    SeasonalOptimization,
}

/// Priority of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Worth doing.
    Medium,
    /// Do first.
    High,
}

/// A potential saving in the vendor portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOpportunity {
    /// Kind.
    #[serde(rename = "type")]
    pub opportunity_type: OpportunityType,
    /// Category concerned.
    pub category: String,
    /// Vendor concerned; absent for category-wide opportunities.
    pub vendor_name: Option<String>,
    /// Human-readable description.
    pub description: String,
    /// Current tracked spend.
    pub current_spend: Decimal,
    /// Estimated saving.
    pub estimated_savings: Decimal,
    /// Priority.
    pub priority: Priority,
}
