//! Year-to-date and full-year forecast composition.
//!
//! Months flagged final contribute their actual figures; all other months
//! contribute their reforecast.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendlens_shared::types::{Month, saturating_sum};

use super::aggregate::MonthlyAggregator;
use super::types::{BudgetEntry, Category, ForecastModes, MonthlyPoint, YtdComposition};

/// Builds YTD figures and full-year projections from monthly totals.
pub struct ForecastComposer;

impl ForecastComposer {
    /// Highest month of `year` flagged final, scanning December back to January.
    #[must_use]
    pub fn last_final_month(modes: &ForecastModes, year: i32) -> Option<Month> {
        Month::all().rev().find(|month| modes.is_final(year, *month))
    }

    /// Latest month of `year` with any non-zero actual entry.
    #[must_use]
    pub fn latest_month_with_actuals(entries: &[BudgetEntry], year: i32) -> Option<Month> {
        MonthlyAggregator::latest_entries(entries)
            .into_iter()
            .filter(|entry| entry.year == year)
            .filter(|entry| entry.actual_amount.is_some_and(|actual| !actual.is_zero()))
            .filter_map(BudgetEntry::month)
            .max()
    }

    /// Month the YTD window runs through.
    ///
    /// The last final month wins; without one, the latest month with actuals;
    /// without either, the calendar month of `today`.
    #[must_use]
    pub fn resolve_as_of_month(
        entries: &[BudgetEntry],
        year: i32,
        modes: &ForecastModes,
        today: NaiveDate,
    ) -> Month {
        Self::last_final_month(modes, year)
            .or_else(|| Self::latest_month_with_actuals(entries, year))
            .unwrap_or_else(|| Month::from_date(today))
    }

    /// Composes the year-to-date view of `year`.
    ///
    /// A year without entries yields zero YTD figures.
    #[must_use]
    pub fn compose_ytd(
        entries: &[BudgetEntry],
        categories: &[Category],
        year: i32,
        modes: &ForecastModes,
        today: NaiveDate,
    ) -> YtdComposition {
        let as_of_month = Self::resolve_as_of_month(entries, year, modes, today);
        let monthly = MonthlyAggregator::aggregate_year(entries, categories, year);

        let mut cumulative_actual = Decimal::ZERO;
        let mut cumulative_budget = Decimal::ZERO;
        let mut ytd_actual = Decimal::ZERO;
        let mut ytd_budget = Decimal::ZERO;
        let mut ytd_reforecast = Decimal::ZERO;
        let mut data = Vec::with_capacity(Month::COUNT);

        for totals in monthly {
            let month = totals.month;
            let net = totals.net_total;
            let is_final = modes.is_final(year, month);

            cumulative_actual = cumulative_actual.saturating_add(net.actual);
            cumulative_budget = cumulative_budget.saturating_add(net.budget);

            if month <= as_of_month {
                ytd_actual = ytd_actual.saturating_add(net.actual);
                ytd_budget = ytd_budget.saturating_add(net.budget);
                ytd_reforecast = ytd_reforecast.saturating_add(net.reforecast);
            }

            data.push(MonthlyPoint {
                month,
                totals: net,
                is_final,
                selected: net.selected(is_final),
                cumulative_actual,
                cumulative_budget,
            });
        }

        YtdComposition {
            year,
            data,
            last_final_month: Self::last_final_month(modes, year),
            as_of_month,
            ytd_actual,
            ytd_budget,
            ytd_reforecast,
        }
    }

    /// Full-year projection: every month's actual if final, else its
    /// reforecast, regardless of where the month sits relative to the last
    /// final month.
    #[must_use]
    pub fn compose_full_year_forecast(
        entries: &[BudgetEntry],
        categories: &[Category],
        year: i32,
        modes: &ForecastModes,
    ) -> Decimal {
        saturating_sum(
            MonthlyAggregator::aggregate_year(entries, categories, year)
                .iter()
                .map(|totals| totals.net_total.selected(modes.is_final(year, totals.month))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use spendlens_shared::types::CategoryId;

    fn rent() -> Category {
        Category {
            id: CategoryId::new(),
            name: "Rent".to_string(),
            group: "Opex".to_string(),
            subgroup: None,
        }
    }

    fn entry(
        category: &Category,
        month: u32,
        budget: Decimal,
        actual: Option<Decimal>,
        reforecast: Decimal,
    ) -> BudgetEntry {
        BudgetEntry {
            category_id: category.id,
            year: 2025,
            month,
            budget_amount: budget,
            actual_amount: actual,
            reforecast_amount: reforecast,
        }
    }

    fn months(numbers: &[u32]) -> Vec<Month> {
        numbers.iter().map(|n| Month::new(*n).unwrap()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
    }

    #[test]
    fn test_last_final_month_scans_from_december() {
        let modes = ForecastModes::new().with_final(2025, months(&[1, 2, 5]));

        assert_eq!(
            ForecastComposer::last_final_month(&modes, 2025),
            Some(Month::new(5).unwrap())
        );
        assert_eq!(ForecastComposer::last_final_month(&modes, 2024), None);
    }

    #[test]
    fn test_full_year_forecast_mixes_actual_and_reforecast() {
        let cat = rent();
        let entries: Vec<BudgetEntry> = (1..=12)
            .map(|m| entry(&cat, m, dec!(100), Some(dec!(90)), dec!(110)))
            .collect();
        let modes = ForecastModes::new().with_final(2025, months(&[1, 2, 3]));

        let forecast =
            ForecastComposer::compose_full_year_forecast(&entries, &[cat], 2025, &modes);

        // 3 final months at 90 + 9 forecast months at 110
        assert_eq!(forecast, dec!(1260));
    }

    #[test]
    fn test_final_month_after_gap_still_uses_actual() {
        let cat = rent();
        let entries: Vec<BudgetEntry> = (1..=12)
            .map(|m| entry(&cat, m, dec!(100), Some(dec!(80)), dec!(100)))
            .collect();
        let modes = ForecastModes::new().with_final(2025, months(&[2, 9]));

        let forecast =
            ForecastComposer::compose_full_year_forecast(&entries, &[cat], 2025, &modes);

        assert_eq!(forecast, dec!(1160));
    }

    #[test]
    fn test_ytd_runs_through_last_final_month() {
        let cat = rent();
        let entries: Vec<BudgetEntry> = (1..=6)
            .map(|m| entry(&cat, m, dec!(100), Some(dec!(90)), dec!(95)))
            .collect();
        let modes = ForecastModes::new().with_final(2025, months(&[1, 2, 3, 4]));

        let ytd = ForecastComposer::compose_ytd(&entries, &[cat], 2025, &modes, today());

        assert_eq!(ytd.as_of_month.number(), 4);
        assert_eq!(ytd.last_final_month, Some(Month::new(4).unwrap()));
        assert_eq!(ytd.ytd_actual, dec!(360));
        assert_eq!(ytd.ytd_budget, dec!(400));
        assert_eq!(ytd.months_elapsed(), 4);
        assert_eq!(ytd.data.len(), 12);
        assert_eq!(ytd.data[5].cumulative_actual, dec!(540));
        assert!(ytd.data[3].is_final);
        assert_eq!(ytd.data[4].selected, dec!(95));
    }

    #[test]
    fn test_fallback_to_latest_month_with_actuals() {
        let cat = rent();
        let entries = vec![
            entry(&cat, 1, dec!(100), Some(dec!(90)), dec!(100)),
            entry(&cat, 5, dec!(100), Some(dec!(70)), dec!(100)),
            entry(&cat, 6, dec!(100), Some(Decimal::ZERO), dec!(100)),
            entry(&cat, 7, dec!(100), None, dec!(100)),
        ];

        let ytd =
            ForecastComposer::compose_ytd(&entries, &[cat], 2025, &ForecastModes::new(), today());

        assert_eq!(ytd.last_final_month, None);
        assert_eq!(ytd.as_of_month.number(), 5);
        assert_eq!(ytd.ytd_actual, dec!(160));
    }

    #[test]
    fn test_fallback_to_calendar_month() {
        let cat = rent();
        let entries = vec![entry(&cat, 1, dec!(100), None, dec!(100))];

        let ytd =
            ForecastComposer::compose_ytd(&entries, &[cat], 2025, &ForecastModes::new(), today());

        assert_eq!(ytd.as_of_month.number(), 8);
    }

    #[test]
    fn test_empty_year_is_zero_not_error() {
        let modes = ForecastModes::new().with_final(2025, months(&[1, 2]));

        let ytd = ForecastComposer::compose_ytd(&[], &[], 2025, &modes, today());
        let forecast = ForecastComposer::compose_full_year_forecast(&[], &[], 2025, &modes);

        assert_eq!(ytd.ytd_actual, Decimal::ZERO);
        assert_eq!(ytd.ytd_budget, Decimal::ZERO);
        assert_eq!(forecast, Decimal::ZERO);
    }
}
