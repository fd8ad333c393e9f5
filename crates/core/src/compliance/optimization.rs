//! Savings opportunities in the vendor portfolio.

use rust_decimal::Decimal;
use spendlens_shared::types::{percent_of, saturating_sum};

use crate::vendor::{PortfolioVendor, VendorData, VendorPortfolio, VendorTracking};

use super::types::{OpportunityType, OptimizationOpportunity, Priority};

const fn whole(n: u32) -> Decimal {
    Decimal::from_parts(n, 0, 0, false, 0)
}

/// Categories with more vendors than this are consolidation candidates.
const CONSOLIDATION_MIN_VENDORS: usize = 2;
/// Share of category spend a consolidation is expected to save.
const CONSOLIDATION_SAVINGS_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);
const CONSOLIDATION_HIGH_SAVINGS: Decimal = whole(50_000);

const UNDERUTILIZED_MAX_PCT: Decimal = whole(50);
const UNDERUTILIZED_MIN_ALLOCATION: Decimal = whole(10_000);
const UNDERUTILIZED_HIGH_SAVINGS: Decimal = whole(25_000);

const OVERBUDGET_MIN_PCT: Decimal = whole(10);
const OVERBUDGET_HIGH_PCT: Decimal = whole(25);

/// Finds consolidation, underutilization and overspend opportunities.
pub struct OptimizationAnalyzer;

impl OptimizationAnalyzer {
    /// Opportunities for `year`, high priority first, then by savings.
    #[must_use]
    pub fn find_opportunities(
        vendors: &[VendorData],
        tracking: &[VendorTracking],
        year: i32,
    ) -> Vec<OptimizationOpportunity> {
        let portfolio = VendorPortfolio::build(vendors, tracking, year);
        Self::from_portfolio(&portfolio)
    }

    /// Opportunities of an assembled portfolio, sorted.
    #[must_use]
    pub fn from_portfolio(portfolio: &VendorPortfolio) -> Vec<OptimizationOpportunity> {
        let mut opportunities = Self::consolidation(portfolio);
        for vendor in portfolio.iter() {
            opportunities.extend(Self::underutilized(vendor));
            opportunities.extend(Self::overbudget(vendor));
        }
        Self::sort(&mut opportunities);
        opportunities
    }

    /// One opportunity per category with more than two vendors.
    #[must_use]
    pub fn consolidation(portfolio: &VendorPortfolio) -> Vec<OptimizationOpportunity> {
        portfolio
            .category_map()
            .into_iter()
            .filter(|(_, members)| members.len() > CONSOLIDATION_MIN_VENDORS)
            .map(|(category, members)| {
                let current_spend = saturating_sum(members.iter().map(|v| v.actual_spend));
                let estimated_savings = current_spend.saturating_mul(CONSOLIDATION_SAVINGS_RATE);
                OptimizationOpportunity {
                    opportunity_type: OpportunityType::Consolidation,
                    category: category.to_string(),
                    vendor_name: None,
                    description: format!(
                        "Consolidate {} vendors in {category} to negotiate volume pricing",
                        members.len()
                    ),
                    current_spend,
                    estimated_savings,
                    priority: if estimated_savings > CONSOLIDATION_HIGH_SAVINGS {
                        Priority::High
                    } else {
                        Priority::Medium
                    },
                }
            })
            .collect()
    }

    /// Allocation above 10,000 with less than half of it used.
    #[must_use]
    pub fn underutilized(vendor: &PortfolioVendor) -> Option<OptimizationOpportunity> {
        if vendor.budget <= UNDERUTILIZED_MIN_ALLOCATION {
            return None;
        }
        let utilization = percent_of(vendor.actual_spend, vendor.budget);
        if utilization >= UNDERUTILIZED_MAX_PCT {
            return None;
        }
        let estimated_savings = vendor.budget.saturating_sub(vendor.actual_spend);
        Some(OptimizationOpportunity {
            opportunity_type: OpportunityType::Underutilized,
            category: vendor.category.clone(),
            vendor_name: Some(vendor.vendor_name.clone()),
            description: format!(
                "{} has used {}% of its allocation; reduce or reallocate the remainder",
                vendor.vendor_name,
                utilization.round_dp(1)
            ),
            current_spend: vendor.actual_spend,
            estimated_savings,
            priority: if estimated_savings > UNDERUTILIZED_HIGH_SAVINGS {
                Priority::High
            } else {
                Priority::Medium
            },
        })
    }

    /// Spend more than 10% above a positive allocation.
    #[must_use]
    pub fn overbudget(vendor: &PortfolioVendor) -> Option<OptimizationOpportunity> {
        if vendor.budget <= Decimal::ZERO {
            return None;
        }
        let overrun = vendor.actual_spend.saturating_sub(vendor.budget);
        let overrun_pct = percent_of(overrun, vendor.budget);
        if overrun_pct <= OVERBUDGET_MIN_PCT {
            return None;
        }
        Some(OptimizationOpportunity {
            opportunity_type: OpportunityType::Overbudget,
            category: vendor.category.clone(),
            vendor_name: Some(vendor.vendor_name.clone()),
            description: format!(
                "{} is {}% over its allocation; renegotiate terms or raise the budget",
                vendor.vendor_name,
                overrun_pct.round_dp(1)
            ),
            current_spend: vendor.actual_spend,
            estimated_savings: overrun,
            priority: if overrun_pct > OVERBUDGET_HIGH_PCT {
                Priority::High
            } else {
                Priority::Medium
            },
        })
    }

    fn sort(opportunities: &mut [OptimizationOpportunity]) {
        opportunities.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.estimated_savings.cmp(&a.estimated_savings))
        });
    }
}
