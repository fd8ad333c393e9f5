//! Per-category budget variance.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use spendlens_shared::types::{CategoryId, Month, percent_of};

use super::aggregate::MonthlyAggregator;
use super::types::{BudgetEntry, Category, UNCATEGORIZED, VarianceCategory, VarianceStatus};

/// Computes year-to-date variance per category.
pub struct VarianceAnalyzer;

impl VarianceAnalyzer {
    /// Classifies a variance that follows the under-spend-is-positive convention.
    #[must_use]
    pub fn status_of(variance: Decimal) -> VarianceStatus {
        match variance.cmp(&Decimal::ZERO) {
            Ordering::Greater => VarianceStatus::Favorable,
            Ordering::Less => VarianceStatus::Unfavorable,
            Ordering::Equal => VarianceStatus::OnBudget,
        }
    }

    /// Variance of every category with entries in January..=`through` of
    /// `year`, largest absolute variance first.
    ///
    /// Categories missing from the reference data are reported as "Unknown"
    /// in the "Uncategorized" group.
    #[must_use]
    pub fn by_category(
        entries: &[BudgetEntry],
        categories: &[Category],
        year: i32,
        through: Month,
    ) -> Vec<VarianceCategory> {
        let lookup: HashMap<CategoryId, &Category> =
            categories.iter().map(|c| (c.id, c)).collect();

        let mut sums: BTreeMap<CategoryId, (Decimal, Decimal)> = BTreeMap::new();
        for entry in MonthlyAggregator::latest_entries(entries) {
            let in_window = entry.year == year && entry.month().is_some_and(|m| m <= through);
            if !in_window {
                continue;
            }
            let sum = sums.entry(entry.category_id).or_default();
            sum.0 = sum.0.saturating_add(entry.budget_amount);
            sum.1 = sum.1.saturating_add(entry.actual_or_zero());
        }

        let mut rows: Vec<VarianceCategory> = sums
            .into_iter()
            .map(|(category_id, (budget, actual))| {
                let (category_name, group) = lookup.get(&category_id).map_or_else(
                    || ("Unknown".to_string(), UNCATEGORIZED.to_string()),
                    |c| (c.name.clone(), c.group.clone()),
                );
                let variance = budget.saturating_sub(actual);
                VarianceCategory {
                    category_id,
                    category_name,
                    group,
                    budget,
                    actual,
                    variance,
                    variance_pct: percent_of(variance, budget),
                    status: Self::status_of(variance),
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.variance
                .abs()
                .cmp(&a.variance.abs())
                .then_with(|| a.category_name.cmp(&b.category_name))
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn category(name: &str) -> Category {
        Category {
            id: CategoryId::new(),
            name: name.to_string(),
            group: "Opex".to_string(),
            subgroup: None,
        }
    }

    fn entry(category_id: CategoryId, month: u32, budget: Decimal, actual: Decimal) -> BudgetEntry {
        BudgetEntry {
            category_id,
            year: 2025,
            month,
            budget_amount: budget,
            actual_amount: Some(actual),
            reforecast_amount: budget,
        }
    }

    #[test]
    fn test_status_of() {
        assert_eq!(VarianceAnalyzer::status_of(dec!(5)), VarianceStatus::Favorable);
        assert_eq!(VarianceAnalyzer::status_of(dec!(-5)), VarianceStatus::Unfavorable);
        assert_eq!(VarianceAnalyzer::status_of(dec!(0)), VarianceStatus::OnBudget);
    }

    #[test]
    fn test_by_category_sorted_by_absolute_variance() {
        let rent = category("Rent");
        let travel = category("Travel");
        let entries = vec![
            entry(rent.id, 1, dec!(1000), dec!(950)),
            entry(rent.id, 2, dec!(1000), dec!(1000)),
            entry(travel.id, 1, dec!(200), dec!(400)),
            // outside the window
            entry(travel.id, 3, dec!(200), dec!(0)),
        ];

        let rows = VarianceAnalyzer::by_category(
            &entries,
            &[rent, travel],
            2025,
            Month::new(2).unwrap(),
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category_name, "Travel");
        assert_eq!(rows[0].variance, dec!(-200));
        assert_eq!(rows[0].variance_pct, dec!(-100));
        assert_eq!(rows[0].status, VarianceStatus::Unfavorable);
        assert_eq!(rows[1].variance, dec!(50));
        assert_eq!(rows[1].variance_pct, dec!(2.5));
        assert_eq!(rows[1].status, VarianceStatus::Favorable);
    }

    #[test]
    fn test_unknown_category_is_labelled() {
        let entries = vec![entry(CategoryId::new(), 1, dec!(10), dec!(10))];

        let rows = VarianceAnalyzer::by_category(&entries, &[], 2025, Month::JANUARY);

        assert_eq!(rows[0].category_name, "Unknown");
        assert_eq!(rows[0].group, UNCATEGORIZED);
        assert_eq!(rows[0].status, VarianceStatus::OnBudget);
    }
}
