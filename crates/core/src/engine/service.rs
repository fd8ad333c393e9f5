//! Analytics engine facade.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use spendlens_shared::types::{CategoryId, Month};
use tracing::debug;

use crate::budget::{
    ForecastComposer, KpiService, MonthlyAggregator, MonthlySeries, MonthlyTotals,
    VarianceAnalyzer,
};
use crate::compliance::{ComplianceScorer, OptimizationAnalyzer};
use crate::summary::{self, SummaryContext, SummaryToggles};
use crate::vendor::{
    ConcentrationAnalyzer, DependencyAnalyzer, ProrationEngine, RiskScorer, VendorData,
};

use super::error::EngineError;
use super::types::{AnalyticsReport, BudgetState};

/// Runs the full analytics pipeline over a budget snapshot.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    toggles: SummaryToggles,
}

impl AnalyticsEngine {
    /// Creates an engine generating the given summary sections.
    #[must_use]
    pub const fn new(toggles: SummaryToggles) -> Self {
        Self { toggles }
    }

    /// Summary sections this engine generates.
    #[must_use]
    pub const fn toggles(&self) -> &SummaryToggles {
        &self.toggles
    }

    /// Analyzes `year` of `state`.
    ///
    /// `today` only matters when no month of the year is final and no
    /// actuals are recorded; the YTD window then runs through its month.
    #[must_use]
    pub fn analyze(&self, state: &BudgetState, year: i32, today: NaiveDate) -> AnalyticsReport {
        debug!(
            year,
            entries = state.entries.len(),
            vendors = state.vendors.len(),
            tracking = state.tracking.len(),
            "Running budget analytics"
        );

        let ytd = ForecastComposer::compose_ytd(
            &state.entries,
            &state.categories,
            year,
            &state.forecast_modes,
            today,
        );
        let full_year_forecast = ForecastComposer::compose_full_year_forecast(
            &state.entries,
            &state.categories,
            year,
            &state.forecast_modes,
        );
        let inputs = KpiService::inputs_from(
            &ytd,
            full_year_forecast,
            state.yearly_targets.target_for(year),
        );
        let kpis = KpiService::derive_kpis(&inputs);
        let trend =
            KpiService::classify_trend(&state.entries, year, ytd.as_of_month, kpis.variance_pct);
        let variance_by_category = VarianceAnalyzer::by_category(
            &state.entries,
            &state.categories,
            year,
            ytd.as_of_month,
        );

        let concentration = ConcentrationAnalyzer::analyze(&state.vendors, &state.tracking, year);
        let risk_scores = RiskScorer::score_portfolio(&state.vendors, &state.tracking, year);
        let dependencies = DependencyAnalyzer::analyze(&state.vendors, &state.tracking, year);
        let compliance = ComplianceScorer::score(&state.vendors, &state.tracking, year);
        let optimization_opportunities =
            OptimizationAnalyzer::find_opportunities(&state.vendors, &state.tracking, year);

        let summary = summary::generate(
            &SummaryContext {
                year,
                kpis: &kpis,
                ytd: &ytd,
                trend,
                variance: &variance_by_category,
                concentration: &concentration,
                risk: &risk_scores,
                dependencies: &dependencies,
                compliance: &compliance,
            },
            &self.toggles,
        );

        debug!(
            year,
            as_of_month = %ytd.as_of_month,
            %trend,
            opportunities = optimization_opportunities.len(),
            "Budget analytics complete"
        );

        AnalyticsReport {
            year,
            as_of_date: today,
            kpis,
            trend,
            variance_by_category,
            monthly_series: MonthlyAggregator::monthly_series(&state.entries, year, None),
            vendor_budget_vs_actual: ProrationEngine::budget_vs_actual_by_month(
                &state.vendors,
                &state.tracking,
                year,
            ),
            ytd,
            concentration,
            risk_scores,
            dependencies,
            compliance,
            optimization_opportunities,
            summary,
            cached: false,
        }
    }

    /// Totals of one month, for callers holding a raw month number.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Budget` if `month` is not in 1-12.
    pub fn month_totals(
        state: &BudgetState,
        year: i32,
        month: u32,
    ) -> Result<MonthlyTotals, EngineError> {
        Ok(MonthlyAggregator::aggregate_month_number(
            &state.entries,
            &state.categories,
            month,
            year,
        )?)
    }

    /// Monthly arrays of one category, or of the whole ledger.
    #[must_use]
    pub fn category_series(
        state: &BudgetState,
        year: i32,
        category_id: Option<CategoryId>,
    ) -> MonthlySeries {
        MonthlyAggregator::monthly_series(&state.entries, year, category_id)
    }

    /// Prorated monthly budget of one vendor record.
    #[must_use]
    pub fn vendor_series(vendor: &VendorData) -> [Decimal; 12] {
        ProrationEngine::prorate_vendor(vendor)
    }

    /// SHA-256 over the serialized snapshot, year, date and sections.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Fingerprint` if the snapshot cannot be serialized.
    pub fn fingerprint(
        &self,
        state: &BudgetState,
        year: i32,
        today: NaiveDate,
    ) -> Result<String, EngineError> {
        let payload = serde_json::to_vec(&(state, year, today, &self.toggles))?;
        let mut hasher = Sha256::new();
        hasher.update(&payload);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Month the analysis of `year` would run through, for display before a run.
#[must_use]
pub fn resolve_as_of_month(state: &BudgetState, year: i32, today: NaiveDate) -> Month {
    ForecastComposer::resolve_as_of_month(&state.entries, year, &state.forecast_modes, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{BudgetEntry, Category, ForecastModes, TrendLabel, YearlyTargets};
    use crate::summary::SummarySection;
    use crate::vendor::{BillingType, VendorTracking};
    use rust_decimal_macros::dec;
    use spendlens_shared::types::VendorId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    fn state() -> BudgetState {
        let opex = Category {
            id: CategoryId::new(),
            name: "Rent".to_string(),
            group: "Opex".to_string(),
            subgroup: None,
        };
        let entries = (1..=12)
            .map(|month| BudgetEntry {
                category_id: opex.id,
                year: 2025,
                month,
                budget_amount: dec!(100000),
                actual_amount: (month <= 6).then_some(dec!(83333.33)),
                reforecast_amount: dec!(90000),
            })
            .collect();
        let mut tracking = VendorTracking {
            vendor_name: "Dewey & Partners".to_string(),
            finance_mapped_category: "Legal".to_string(),
            year: 2025,
            ..VendorTracking::default()
        };
        tracking.set_month(Month::JANUARY, "5000");

        BudgetState {
            entries,
            categories: vec![opex],
            vendors: vec![VendorData {
                id: VendorId::new(),
                vendor_name: "Dewey & Partners".to_string(),
                finance_mapped_category: "Legal".to_string(),
                category: "Services".to_string(),
                billing_type: BillingType::Annual,
                budget: dec!(6000),
                month: "March".to_string(),
                in_budget: true,
                year: 2025,
            }],
            tracking: vec![tracking],
            forecast_modes: ForecastModes::new().with_final(2025, Month::JANUARY.through()),
            yearly_targets: YearlyTargets([(2025, dec!(1200000))].into_iter().collect()),
        }
    }

    #[test]
    fn test_analyze_runs_every_component() {
        let mut modes = ForecastModes::new();
        for number in 1..=6 {
            modes.set(2025, Month::new(number).unwrap(), true);
        }
        let state = BudgetState {
            forecast_modes: modes,
            ..state()
        };

        let report = AnalyticsEngine::default().analyze(&state, 2025, today());

        assert_eq!(report.ytd.as_of_month.number(), 6);
        assert_eq!(report.kpis.ytd_actual, dec!(499999.98));
        assert_eq!(report.kpis.ytd_budget, dec!(600000));
        assert_eq!(report.kpis.full_year_forecast, dec!(499999.98) + dec!(540000));
        assert_eq!(report.variance_by_category.len(), 1);
        assert_eq!(report.vendor_budget_vs_actual[2].budget, dec!(6000));
        assert_eq!(report.concentration.vendor_count, 1);
        assert_eq!(report.dependencies.single_source_dependencies[0].category, "Legal");
        assert_eq!(report.risk_scores.len(), 1);
        assert_eq!(report.summary.len(), SummarySection::ALL.len());
        assert!(!report.cached);
        assert_ne!(report.trend, TrendLabel::Unknown);
    }

    #[test]
    fn test_analyze_empty_state_is_all_zero() {
        let report = AnalyticsEngine::default().analyze(&BudgetState::default(), 2025, today());

        assert_eq!(report.kpis.ytd_actual, Decimal::ZERO);
        assert_eq!(report.kpis.full_year_forecast, Decimal::ZERO);
        assert_eq!(report.ytd.as_of_month.number(), 10);
        assert_eq!(report.concentration.herfindahl_index, Decimal::ZERO);
        assert!(report.optimization_opportunities.is_empty());
    }

    #[test]
    fn test_analyze_saturates_maximal_tracking_cells() {
        let mut row = VendorTracking {
            vendor_name: "Hyperscale".to_string(),
            finance_mapped_category: "Cloud".to_string(),
            year: 2025,
            ..VendorTracking::default()
        };
        row.set_month(Month::JANUARY, "79228162514264337593543950335");
        row.set_month(Month::DECEMBER, "79228162514264337593543950335");
        let state = BudgetState {
            tracking: vec![row.clone(), row],
            yearly_targets: YearlyTargets([(2025, Decimal::MAX)].into_iter().collect()),
            ..state()
        };

        let report = AnalyticsEngine::default().analyze(&state, 2025, today());

        assert_eq!(report.concentration.total_spend, Decimal::MAX);
        assert_eq!(report.vendor_budget_vs_actual[0].actual, Decimal::MAX);
        assert_eq!(report.dependencies.category_breakdown[0].spend, Decimal::MAX);
        assert_eq!(report.risk_scores.len(), 2);
        assert_eq!(report.summary.len(), SummarySection::ALL.len());
    }

    #[test]
    fn test_toggles_limit_summary() {
        let engine = AnalyticsEngine::new(SummaryToggles::from_names(&["forecast"]));

        let report = engine.analyze(&state(), 2025, today());

        assert_eq!(report.summary.len(), 1);
        assert_eq!(report.summary[0].section, SummarySection::Forecast);
    }

    #[test]
    fn test_month_totals_rejects_invalid_month() {
        let state = state();

        assert!(matches!(
            AnalyticsEngine::month_totals(&state, 2025, 0),
            Err(EngineError::Budget(_))
        ));
        let march = AnalyticsEngine::month_totals(&state, 2025, 3).unwrap();
        assert_eq!(march.net_total.budget, dec!(100000));
    }

    #[test]
    fn test_series_helpers() {
        let state = state();
        let category_id = state.categories[0].id;

        let series = AnalyticsEngine::category_series(&state, 2025, Some(category_id));
        assert_eq!(series.actual[6], Decimal::ZERO);
        assert_eq!(series.reforecast[6], dec!(90000));

        let vendor = AnalyticsEngine::vendor_series(&state.vendors[0]);
        assert_eq!(vendor[2], dec!(6000));
    }

    #[test]
    fn test_fingerprint_is_stable_and_sensitive() {
        let engine = AnalyticsEngine::default();
        let state = state();

        let a = engine.fingerprint(&state, 2025, today()).unwrap();
        let b = engine.fingerprint(&state, 2025, today()).unwrap();
        let other_year = engine.fingerprint(&state, 2024, today()).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, other_year);
    }

    #[test]
    fn test_resolve_as_of_month() {
        assert_eq!(resolve_as_of_month(&state(), 2025, today()), Month::JANUARY);
    }
}
