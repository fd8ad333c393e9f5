//! Data completeness, budget compliance and audit readiness.

use rust_decimal::Decimal;
use spendlens_shared::types::{is_filled_cell, percent_of};

use crate::vendor::{VendorData, VendorPortfolio, VendorTracking};

use super::types::{ComplianceFinding, ComplianceMetrics, FindingRule, Severity};

const fn whole(n: u32) -> Decimal {
    Decimal::from_parts(n, 0, 0, false, 0)
}

const VENDOR_COMPLETENESS_MIN: Decimal = whole(80);
const TRACKING_COMPLETENESS_MIN: Decimal = whole(70);
const BUDGET_COMPLIANCE_MIN: Decimal = whole(85);
const FINDING_PENALTY: Decimal = whole(15);
const HIGH_SEVERITY_PENALTY: Decimal = whole(10);

/// Scores compliance of a year's vendor data.
pub struct ComplianceScorer;

impl ComplianceScorer {
    /// All compliance metrics for `year`.
    #[must_use]
    pub fn score(
        vendors: &[VendorData],
        tracking: &[VendorTracking],
        year: i32,
    ) -> ComplianceMetrics {
        let year_vendors: Vec<&VendorData> = vendors.iter().filter(|v| v.year == year).collect();
        let year_tracking: Vec<&VendorTracking> =
            tracking.iter().filter(|t| t.year == year).collect();
        let portfolio = VendorPortfolio::build(vendors, tracking, year);

        let vendor_data_completeness = Self::vendor_data_completeness(&year_vendors);
        let tracking_completeness = Self::tracking_completeness(&year_tracking);
        let budget_compliance_rate = Self::budget_compliance_rate(&portfolio);
        let findings = Self::findings(
            vendor_data_completeness,
            tracking_completeness,
            budget_compliance_rate,
        );

        ComplianceMetrics {
            vendor_data_completeness,
            tracking_completeness,
            budget_compliance_rate,
            data_quality_score: (vendor_data_completeness + tracking_completeness) / whole(2),
            process_adherence: Self::process_adherence(&portfolio),
            audit_readiness_score: Self::audit_readiness(&findings),
            findings,
        }
    }

    /// Returns true if a vendor record carries every required field.
    ///
    /// Required: vendor name, finance category, category, a recognised
    /// billing type, a positive budget and a start month label ("N/A" counts).
    #[must_use]
    pub fn is_complete(vendor: &VendorData) -> bool {
        !vendor.vendor_name.trim().is_empty()
            && !vendor.finance_mapped_category.trim().is_empty()
            && !vendor.category.trim().is_empty()
            && vendor.billing_type.is_known()
            && vendor.budget > Decimal::ZERO
            && !vendor.month.trim().is_empty()
    }

    /// Percentage of complete vendor records; 0 without records.
    #[must_use]
    pub fn vendor_data_completeness(vendors: &[&VendorData]) -> Decimal {
        let complete = vendors.iter().filter(|v| Self::is_complete(v)).count();
        percent_of(Decimal::from(complete), Decimal::from(vendors.len()))
    }

    /// Percentage of filled monthly cells; 0 without rows.
    #[must_use]
    pub fn tracking_completeness(tracking: &[&VendorTracking]) -> Decimal {
        let filled: usize = tracking
            .iter()
            .map(|row| row.raw_months().iter().filter(|c| is_filled_cell(c)).count())
            .sum();
        percent_of(Decimal::from(filled), Decimal::from(tracking.len() * 12))
    }

    /// Percentage of budgeted vendors whose spend does not exceed budget;
    /// 100 when no vendor has a budget.
    #[must_use]
    pub fn budget_compliance_rate(portfolio: &VendorPortfolio) -> Decimal {
        let budgeted: Vec<_> = portfolio
            .iter()
            .filter(|v| v.budget > Decimal::ZERO)
            .collect();
        if budgeted.is_empty() {
            return Decimal::ONE_HUNDRED;
        }
        let within = budgeted
            .iter()
            .filter(|v| v.actual_spend <= v.budget)
            .count();
        percent_of(Decimal::from(within), Decimal::from(budgeted.len()))
    }

    /// Percentage of tracked vendors that have a budget record; 100 when
    /// nothing is tracked.
    #[must_use]
    pub fn process_adherence(portfolio: &VendorPortfolio) -> Decimal {
        let tracked: Vec<_> = portfolio.iter().filter(|v| v.is_tracked).collect();
        if tracked.is_empty() {
            return Decimal::ONE_HUNDRED;
        }
        let with_budget = tracked.iter().filter(|v| v.has_budget_record).count();
        percent_of(Decimal::from(with_budget), Decimal::from(tracked.len()))
    }

    /// Findings from the fixed threshold rules.
    #[must_use]
    pub fn findings(
        vendor_data_completeness: Decimal,
        tracking_completeness: Decimal,
        budget_compliance_rate: Decimal,
    ) -> Vec<ComplianceFinding> {
        let mut findings = Vec::new();

        if vendor_data_completeness < VENDOR_COMPLETENESS_MIN {
            findings.push(ComplianceFinding {
                rule: FindingRule::VendorDataCompleteness,
                severity: Severity::High,
                message: format!(
                    "Vendor data completeness is {}%, below the {VENDOR_COMPLETENESS_MIN}% minimum",
                    vendor_data_completeness.round_dp(1)
                ),
            });
        }
        if tracking_completeness < TRACKING_COMPLETENESS_MIN {
            findings.push(ComplianceFinding {
                rule: FindingRule::TrackingCompleteness,
                severity: Severity::Medium,
                message: format!(
                    "Tracking completeness is {}%, below the {TRACKING_COMPLETENESS_MIN}% minimum",
                    tracking_completeness.round_dp(1)
                ),
            });
        }
        if budget_compliance_rate < BUDGET_COMPLIANCE_MIN {
            findings.push(ComplianceFinding {
                rule: FindingRule::BudgetCompliance,
                severity: Severity::Medium,
                message: format!(
                    "Budget compliance rate is {}%, below the {BUDGET_COMPLIANCE_MIN}% minimum",
                    budget_compliance_rate.round_dp(1)
                ),
            });
        }

        findings
    }

    /// `100 − 15 × findings − 10 × high findings`, floored at 0.
    #[must_use]
    pub fn audit_readiness(findings: &[ComplianceFinding]) -> Decimal {
        let penalty: Decimal = findings
            .iter()
            .map(|f| match f.severity {
                Severity::High => FINDING_PENALTY + HIGH_SEVERITY_PENALTY,
                Severity::Medium => FINDING_PENALTY,
            })
            .sum();
        (Decimal::ONE_HUNDRED - penalty).max(Decimal::ZERO)
    }
}
