//! Key performance indicators and trend classification.

use rust_decimal::Decimal;
use spendlens_shared::types::{Month, percent_of};

use super::aggregate::MonthlyAggregator;
use super::types::{BudgetEntry, KpiData, KpiInputs, TrendLabel, YtdComposition};

/// Runway reported when nothing is being spent but budget remains.
pub const RUNWAY_SENTINEL_MONTHS: Decimal = Decimal::from_parts(999, 0, 0, false, 0);

/// Number of trailing months sampled for the trend.
const TREND_WINDOW: u32 = 3;

/// Below this absolute variance % a short history counts as stable.
const STABLE_VARIANCE_PCT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Below this absolute change in variance % the trend counts as stable.
const TREND_THRESHOLD: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Derives KPIs from composed figures.
pub struct KpiService;

impl KpiService {
    /// Collects KPI inputs from a YTD composition.
    #[must_use]
    pub const fn inputs_from(
        composition: &YtdComposition,
        full_year_forecast: Decimal,
        annual_target: Decimal,
    ) -> KpiInputs {
        KpiInputs {
            ytd_actual: composition.ytd_actual,
            ytd_budget: composition.ytd_budget,
            annual_target,
            full_year_forecast,
            months_elapsed: composition.months_elapsed(),
        }
    }

    /// Derives every KPI from its numeric inputs.
    ///
    /// Pure: identical inputs always produce identical output. Every ratio
    /// with an empty denominator falls back to zero, and differences and
    /// products saturate at the `Decimal` bounds.
    #[must_use]
    pub fn derive_kpis(inputs: &KpiInputs) -> KpiData {
        let KpiInputs {
            ytd_actual,
            ytd_budget,
            annual_target,
            full_year_forecast,
            months_elapsed,
        } = *inputs;

        let variance = ytd_budget.saturating_sub(ytd_actual);
        let variance_pct = percent_of(variance, ytd_budget);

        let annual_variance = annual_target.saturating_sub(ytd_actual);
        let has_target = annual_target > Decimal::ZERO;
        let annual_variance_pct = if has_target {
            percent_of(annual_variance, annual_target)
        } else {
            Decimal::ZERO
        };
        let budget_utilization = if has_target {
            percent_of(ytd_actual, annual_target)
        } else {
            Decimal::ZERO
        };

        let elapsed = Decimal::from(months_elapsed);
        let expected_ytd_target = annual_target.saturating_mul(elapsed) / Decimal::from(12);
        let target_achievement = if expected_ytd_target > Decimal::ZERO {
            percent_of(ytd_actual, expected_ytd_target)
        } else {
            Decimal::ZERO
        };

        let forecast_vs_target_variance = annual_target.saturating_sub(full_year_forecast);

        let burn_rate = if months_elapsed > 0 {
            ytd_actual / elapsed
        } else {
            Decimal::ZERO
        };
        let remaining_budget = annual_target.saturating_sub(ytd_actual);
        let months_remaining = if burn_rate > Decimal::ZERO && remaining_budget > Decimal::ZERO {
            remaining_budget
                .checked_div(burn_rate)
                .unwrap_or(RUNWAY_SENTINEL_MONTHS)
        } else {
            Decimal::ZERO
        };

        KpiData {
            ytd_actual,
            ytd_budget,
            annual_target,
            full_year_forecast,
            variance,
            variance_pct,
            annual_variance,
            annual_variance_pct,
            budget_utilization,
            expected_ytd_target,
            target_achievement,
            forecast_vs_target_variance,
            burn_rate,
            remaining_budget,
            months_remaining,
            runway_months: Self::runway_months(burn_rate, remaining_budget, months_remaining),
            months_elapsed,
        }
    }

    /// Runway in months, with zero burn and remaining budget reported as the
    /// sentinel and an exhausted budget as zero.
    #[must_use]
    pub fn runway_months(
        burn_rate: Decimal,
        remaining_budget: Decimal,
        months_remaining: Decimal,
    ) -> Decimal {
        if remaining_budget <= Decimal::ZERO {
            Decimal::ZERO
        } else if burn_rate <= Decimal::ZERO {
            RUNWAY_SENTINEL_MONTHS
        } else {
            months_remaining.min(RUNWAY_SENTINEL_MONTHS)
        }
    }

    /// Classifies the spend trend over the last up to three months ending at
    /// `through`.
    ///
    /// Each sampled month contributes the cumulative variance % of entries up
    /// to and including it. With fewer than two samples the overall
    /// `variance_pct` decides; otherwise the change from the oldest to the
    /// newest sample does. Never panics: arithmetic overflow yields
    /// [`TrendLabel::Unknown`].
    #[must_use]
    pub fn classify_trend(
        entries: &[BudgetEntry],
        year: i32,
        through: Month,
        variance_pct: Decimal,
    ) -> TrendLabel {
        Self::try_classify_trend(entries, year, through, variance_pct).unwrap_or(TrendLabel::Unknown)
    }

    fn try_classify_trend(
        entries: &[BudgetEntry],
        year: i32,
        through: Month,
        variance_pct: Decimal,
    ) -> Option<TrendLabel> {
        let latest: Vec<&BudgetEntry> = MonthlyAggregator::latest_entries(entries)
            .into_iter()
            .filter(|entry| entry.year == year && entry.month().is_some())
            .collect();

        let last = through.number();
        let first = last.saturating_sub(TREND_WINDOW - 1).max(1);
        let mut samples = Vec::with_capacity(TREND_WINDOW as usize);

        for month in first..=last {
            let mut budget = Decimal::ZERO;
            let mut actual = Decimal::ZERO;
            for entry in latest.iter().filter(|entry| entry.month <= month) {
                budget = budget.checked_add(entry.budget_amount)?;
                actual = actual.checked_add(entry.actual_or_zero())?;
            }
            if budget.is_zero() {
                continue;
            }
            let variance = actual.checked_sub(budget)?.checked_mul(Decimal::NEGATIVE_ONE)?;
            samples.push(
                variance
                    .checked_div(budget)?
                    .checked_mul(Decimal::ONE_HUNDRED)?,
            );
        }

        if samples.len() < 2 {
            return Some(if variance_pct.abs() < STABLE_VARIANCE_PCT {
                TrendLabel::Stable
            } else if variance_pct > Decimal::ZERO {
                TrendLabel::UnderBudget
            } else {
                TrendLabel::OverBudget
            });
        }

        let difference = samples.last()?.checked_sub(*samples.first()?)?;
        Some(if difference.abs() < TREND_THRESHOLD {
            TrendLabel::Stable
        } else if difference > TREND_THRESHOLD {
            TrendLabel::Improving
        } else {
            TrendLabel::Declining
        })
    }
}
