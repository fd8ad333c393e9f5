//! Budget data types.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendlens_shared::types::{CategoryId, Month};

/// Group label for entries whose category cannot be resolved.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One category's planned, actual and reforecast spend for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntry {
    /// Category the entry belongs to.
    pub category_id: CategoryId,
    /// Budget year.
    pub year: i32,
    /// Month number. Expected 1-12; anything else is ignored by aggregation.
    pub month: u32,
    /// Planned amount.
    pub budget_amount: Decimal,
    /// Actual amount, absent until the month has figures.
    #[serde(default)]
    pub actual_amount: Option<Decimal>,
    /// Reforecast (projected) amount.
    #[serde(default)]
    pub reforecast_amount: Decimal,
}

impl BudgetEntry {
    /// Actual amount, treating a missing value as zero.
    #[must_use]
    pub fn actual_or_zero(&self) -> Decimal {
        self.actual_amount.unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the entry belongs to `month` of `year`.
    #[must_use]
    pub fn is_in(&self, year: i32, month: Month) -> bool {
        self.year == year && self.month == month.number()
    }

    /// Validated month of the entry, if its month number is in range.
    #[must_use]
    pub fn month(&self) -> Option<Month> {
        Month::new(self.month).ok()
    }
}

/// Static category reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Top-level rollup group (e.g. "Cost of Sales", "Opex", "Adjustments").
    pub group: String,
    /// Optional subgroup within the group.
    #[serde(default)]
    pub subgroup: Option<String>,
}

/// Budget, actual and reforecast sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Planned amount.
    pub budget: Decimal,
    /// Actual amount (missing actuals count as zero).
    pub actual: Decimal,
    /// Reforecast amount.
    pub reforecast: Decimal,
}

impl Totals {
    /// Adds one entry's amounts, saturating at the `Decimal` bounds.
    pub fn add_entry(&mut self, entry: &BudgetEntry) {
        self.budget = self.budget.saturating_add(entry.budget_amount);
        self.actual = self.actual.saturating_add(entry.actual_or_zero());
        self.reforecast = self.reforecast.saturating_add(entry.reforecast_amount);
    }

    /// The figure that counts for a month: actual if final, otherwise reforecast.
    #[must_use]
    pub const fn selected(&self, is_final: bool) -> Decimal {
        if is_final { self.actual } else { self.reforecast }
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, rhs: Self) {
        self.budget = self.budget.saturating_add(rhs.budget);
        self.actual = self.actual.saturating_add(rhs.actual);
        self.reforecast = self.reforecast.saturating_add(rhs.reforecast);
    }
}

/// Totals for one top-level group with its subgroup breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTotals {
    /// Group total.
    pub totals: Totals,
    /// Subgroup totals. Entries of categories without a subgroup only count
    /// towards the group total.
    pub subgroups: BTreeMap<String, Totals>,
}

/// Aggregated totals for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    /// Budget year.
    pub year: i32,
    /// Month.
    pub month: Month,
    /// Totals per top-level group.
    pub groups: BTreeMap<String, GroupTotals>,
    /// Sum across every group, adjustments and uncategorized entries included.
    pub net_total: Totals,
}

impl MonthlyTotals {
    /// Creates all-zero totals.
    #[must_use]
    pub fn empty(year: i32, month: Month) -> Self {
        Self {
            year,
            month,
            groups: BTreeMap::new(),
            net_total: Totals::default(),
        }
    }

    /// Totals of a group, zero if the group has no entries.
    #[must_use]
    pub fn group(&self, name: &str) -> Totals {
        self.groups.get(name).map(|g| g.totals).unwrap_or_default()
    }

    /// Totals of a subgroup, zero if it has no entries.
    #[must_use]
    pub fn subgroup(&self, group: &str, subgroup: &str) -> Totals {
        self.groups
            .get(group)
            .and_then(|g| g.subgroups.get(subgroup))
            .copied()
            .unwrap_or_default()
    }
}

/// Raw 12-element monthly arrays, index 0 = January.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySeries {
    /// Planned amount per month.
    pub budget: [Decimal; 12],
    /// Actual amount per month.
    pub actual: [Decimal; 12],
    /// Reforecast amount per month.
    pub reforecast: [Decimal; 12],
}

/// Per-year, per-month finalization flags.
///
/// A month flagged `true` is final: its actual figures are authoritative.
/// Absent months are still forecast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastModes(pub BTreeMap<i32, BTreeMap<u32, bool>>);

impl ForecastModes {
    /// Creates an empty set of flags (every month forecast).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `month` of `year` is final.
    #[must_use]
    pub fn is_final(&self, year: i32, month: Month) -> bool {
        self.0
            .get(&year)
            .and_then(|months| months.get(&month.number()))
            .copied()
            .unwrap_or(false)
    }

    /// Sets the flag for one month.
    pub fn set(&mut self, year: i32, month: Month, is_final: bool) {
        self.0.entry(year).or_default().insert(month.number(), is_final);
    }

    /// Builder form of [`ForecastModes::set`] marking months final.
    #[must_use]
    pub fn with_final(mut self, year: i32, months: impl IntoIterator<Item = Month>) -> Self {
        for month in months {
            self.set(year, month, true);
        }
        self
    }
}

/// Annual budget ceilings keyed by year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearlyTargets(pub BTreeMap<i32, Decimal>);

impl YearlyTargets {
    /// Target for `year`, zero when none is set.
    #[must_use]
    pub fn target_for(&self, year: i32) -> Decimal {
        self.0.get(&year).copied().unwrap_or(Decimal::ZERO)
    }
}

/// One month of a year composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// Month.
    pub month: Month,
    /// Net totals of the month.
    pub totals: Totals,
    /// Whether the month is final.
    pub is_final: bool,
    /// Actual if final, otherwise reforecast.
    pub selected: Decimal,
    /// Running actual total from January.
    pub cumulative_actual: Decimal,
    /// Running budget total from January.
    pub cumulative_budget: Decimal,
}

/// Year-to-date composition of a budget year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YtdComposition {
    /// Budget year.
    pub year: i32,
    /// All twelve months.
    pub data: Vec<MonthlyPoint>,
    /// Highest month flagged final, if any.
    pub last_final_month: Option<Month>,
    /// Month the YTD figures run through ("as of <Month>").
    pub as_of_month: Month,
    /// Actual spend over January..=as_of_month.
    pub ytd_actual: Decimal,
    /// Budget over January..=as_of_month.
    pub ytd_budget: Decimal,
    /// Reforecast over January..=as_of_month.
    pub ytd_reforecast: Decimal,
}

impl YtdComposition {
    /// Months elapsed in the YTD window.
    #[must_use]
    pub const fn months_elapsed(&self) -> u32 {
        self.as_of_month.number()
    }
}

/// Numeric inputs of the KPI derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiInputs {
    /// Year-to-date actual spend.
    pub ytd_actual: Decimal,
    /// Year-to-date budget.
    pub ytd_budget: Decimal,
    /// Annual budget ceiling.
    pub annual_target: Decimal,
    /// Full-year projection.
    pub full_year_forecast: Decimal,
    /// Months elapsed in the YTD window.
    pub months_elapsed: u32,
}

/// Derived key performance indicators.
///
/// Variances use the "under-spend is positive" convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiData {
    /// Year-to-date actual spend.
    pub ytd_actual: Decimal,
    /// Year-to-date budget.
    pub ytd_budget: Decimal,
    /// Annual budget ceiling.
    pub annual_target: Decimal,
    /// Full-year projection.
    pub full_year_forecast: Decimal,
    /// `(ytd_actual - ytd_budget) * -1`.
    pub variance: Decimal,
    /// Variance as a percentage of YTD budget.
    pub variance_pct: Decimal,
    /// `(ytd_actual - annual_target) * -1`.
    pub annual_variance: Decimal,
    /// Annual variance as a percentage of the target.
    pub annual_variance_pct: Decimal,
    /// YTD actual as a percentage of the annual target.
    pub budget_utilization: Decimal,
    /// Pro-rata share of the annual target expected by now.
    pub expected_ytd_target: Decimal,
    /// YTD actual as a percentage of the expected YTD target (pacing).
    pub target_achievement: Decimal,
    /// `(full_year_forecast - annual_target) * -1`.
    pub forecast_vs_target_variance: Decimal,
    /// Average actual spend per elapsed month.
    pub burn_rate: Decimal,
    /// `annual_target - ytd_actual`.
    pub remaining_budget: Decimal,
    /// Months until the remaining budget is spent at the current burn rate;
    /// zero when burn is zero or nothing remains.
    pub months_remaining: Decimal,
    /// Runway with the infinite case made explicit as the sentinel.
    pub runway_months: Decimal,
    /// Months elapsed in the YTD window.
    pub months_elapsed: u32,
}

/// Qualitative spend trend over the last few months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendLabel {
    /// Variance is moving towards under-spend.
    Improving,
    /// Variance is moving towards over-spend.
    Declining,
    /// No material movement.
    Stable,
    /// Too little history; currently under budget.
    #[serde(rename = "Under Budget")]
    UnderBudget,
    /// Too little history; currently over budget.
    #[serde(rename = "Over Budget")]
    OverBudget,
    /// The trend could not be computed.
    Unknown,
}

impl TrendLabel {
    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "Improving",
            Self::Declining => "Declining",
            Self::Stable => "Stable",
            Self::UnderBudget => "Under Budget",
            Self::OverBudget => "Over Budget",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variance status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// Under budget.
    Favorable,
    /// Over budget.
    Unfavorable,
    /// Exactly on budget.
    OnBudget,
}

/// Year-to-date variance of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarianceCategory {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name, or "Unknown" for unresolved categories.
    pub category_name: String,
    /// Top-level group.
    pub group: String,
    /// YTD budget.
    pub budget: Decimal,
    /// YTD actual.
    pub actual: Decimal,
    /// `(actual - budget) * -1`.
    pub variance: Decimal,
    /// Variance as a percentage of budget.
    pub variance_pct: Decimal,
    /// Status.
    pub status: VarianceStatus,
}
