//! Monthly aggregation of budget entries.
//!
//! Every figure above this layer (YTD, forecasts, KPIs) is built from the
//! per-month totals produced here.

use std::collections::HashMap;

use spendlens_shared::types::{CategoryId, Month};

use super::error::BudgetError;
use super::types::{BudgetEntry, Category, MonthlySeries, MonthlyTotals, UNCATEGORIZED};

/// Reduces raw budget entries into monthly totals.
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// Drops entries superseded by a later entry with the same
    /// `(category_id, year, month)` key, keeping input order otherwise.
    #[must_use]
    pub fn latest_entries(entries: &[BudgetEntry]) -> Vec<&BudgetEntry> {
        let mut last_index: HashMap<(CategoryId, i32, u32), usize> = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            last_index.insert((entry.category_id, entry.year, entry.month), index);
        }

        entries
            .iter()
            .enumerate()
            .filter(|(index, entry)| {
                last_index.get(&(entry.category_id, entry.year, entry.month)) == Some(index)
            })
            .map(|(_, entry)| entry)
            .collect()
    }

    /// Aggregates one month into group, subgroup and net totals.
    ///
    /// Entries of other months or years are ignored. Entries whose category
    /// is unknown roll into the "Uncategorized" group and still count towards
    /// the net total. An empty entry set yields all-zero totals.
    #[must_use]
    pub fn aggregate_month(
        entries: &[BudgetEntry],
        categories: &[Category],
        month: Month,
        year: i32,
    ) -> MonthlyTotals {
        let lookup = Self::category_lookup(categories);
        let mut totals = MonthlyTotals::empty(year, month);

        for entry in Self::latest_entries(entries) {
            if !entry.is_in(year, month) {
                continue;
            }

            let (group, subgroup) = match lookup.get(&entry.category_id) {
                Some(category) => (category.group.as_str(), category.subgroup.as_deref()),
                None => (UNCATEGORIZED, None),
            };

            let group_totals = totals.groups.entry(group.to_string()).or_default();
            group_totals.totals.add_entry(entry);
            if let Some(subgroup) = subgroup {
                group_totals
                    .subgroups
                    .entry(subgroup.to_string())
                    .or_default()
                    .add_entry(entry);
            }
            totals.net_total.add_entry(entry);
        }

        totals
    }

    /// Like [`MonthlyAggregator::aggregate_month`] for a raw month number.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidMonth` if `month` is not in 1-12.
    pub fn aggregate_month_number(
        entries: &[BudgetEntry],
        categories: &[Category],
        month: u32,
        year: i32,
    ) -> Result<MonthlyTotals, BudgetError> {
        let month = Month::new(month)?;
        Ok(Self::aggregate_month(entries, categories, month, year))
    }

    /// Aggregates all twelve months of a year, January first.
    #[must_use]
    pub fn aggregate_year(
        entries: &[BudgetEntry],
        categories: &[Category],
        year: i32,
    ) -> Vec<MonthlyTotals> {
        Month::all()
            .map(|month| Self::aggregate_month(entries, categories, month, year))
            .collect()
    }

    /// Raw 12-element budget/actual/reforecast arrays for a year.
    ///
    /// With `category` set only that category's entries count; otherwise the
    /// whole ledger is summed. Entries with an out-of-range month are skipped.
    #[must_use]
    pub fn monthly_series(
        entries: &[BudgetEntry],
        year: i32,
        category: Option<CategoryId>,
    ) -> MonthlySeries {
        let mut series = MonthlySeries::default();

        for entry in Self::latest_entries(entries) {
            if entry.year != year || category.is_some_and(|id| id != entry.category_id) {
                continue;
            }
            let Some(month) = entry.month() else {
                continue;
            };
            let slot = month.index();
            series.budget[slot] = series.budget[slot].saturating_add(entry.budget_amount);
            series.actual[slot] = series.actual[slot].saturating_add(entry.actual_or_zero());
            series.reforecast[slot] =
                series.reforecast[slot].saturating_add(entry.reforecast_amount);
        }

        series
    }

    fn category_lookup(categories: &[Category]) -> HashMap<CategoryId, &Category> {
        categories.iter().map(|c| (c.id, c)).collect()
    }
}
