//! Engine input and output types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::budget::{
    BudgetEntry, Category, ForecastModes, KpiData, MonthlySeries, TrendLabel, VarianceCategory,
    YearlyTargets, YtdComposition,
};
use crate::compliance::{ComplianceMetrics, OptimizationOpportunity};
use crate::summary::SummaryParagraph;
use crate::vendor::{
    DependencyAnalysis, MonthlyBudgetVsActual, VendorConcentrationData, VendorData,
    VendorRiskScore, VendorTracking,
};

use super::error::EngineError;

/// Immutable snapshot of the application's budget state.
///
/// Field names follow the application's camelCase state; the longer
/// `vendorData`, `vendorTracking`, `monthlyForecastModes` and
/// `yearlyBudgetTargets` spellings are accepted too.
///
/// Category ids (`categories[].id`, `entries[].categoryId`) must be UUID
/// strings; a snapshot with any other id fails to decode as a whole. Vendor
/// and tracking row ids are optional and generated when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetState {
    /// Budget entries.
    pub entries: Vec<BudgetEntry>,
    /// Category reference data.
    pub categories: Vec<Category>,
    /// Budgeted vendor commitments.
    #[serde(alias = "vendorData")]
    pub vendors: Vec<VendorData>,
    /// Vendor spend tracking rows.
    #[serde(alias = "vendorTracking")]
    pub tracking: Vec<VendorTracking>,
    /// Month finalization flags.
    #[serde(alias = "monthlyForecastModes")]
    pub forecast_modes: ForecastModes,
    /// Annual targets.
    #[serde(alias = "yearlyBudgetTargets")]
    pub yearly_targets: YearlyTargets,
}

impl BudgetState {
    /// Decodes a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Snapshot` if the JSON does not describe a state.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(EngineError::Snapshot)
    }
}

/// Every analysis of one budget year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Selected year.
    pub year: i32,
    /// Date the as-of fallback was resolved against.
    pub as_of_date: NaiveDate,
    /// YTD composition.
    pub ytd: YtdComposition,
    /// KPIs.
    pub kpis: KpiData,
    /// Spend trend through the as-of month.
    pub trend: TrendLabel,
    /// Category variances through the as-of month.
    pub variance_by_category: Vec<VarianceCategory>,
    /// Ledger-wide monthly arrays.
    pub monthly_series: MonthlySeries,
    /// Prorated vendor budget against tracked vendor spend.
    pub vendor_budget_vs_actual: Vec<MonthlyBudgetVsActual>,
    /// Vendor concentration.
    pub concentration: VendorConcentrationData,
    /// Vendor risk scores, highest first.
    pub risk_scores: Vec<VendorRiskScore>,
    /// Vendor dependencies.
    pub dependencies: DependencyAnalysis,
    /// Compliance metrics.
    pub compliance: ComplianceMetrics,
    /// Savings opportunities.
    pub optimization_opportunities: Vec<OptimizationOpportunity>,
    /// Narrative paragraphs.
    pub summary: Vec<SummaryParagraph>,
    /// Whether the report came from the cache.
    #[serde(default)]
    pub cached: bool,
}
