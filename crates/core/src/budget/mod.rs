//! Budget aggregation, forecast composition and KPI derivation.
//!
//! Data flows one way: entries are aggregated per month, months are composed
//! into YTD and full-year figures, and KPIs are derived from those.

pub mod aggregate;
pub mod compose;
pub mod error;
pub mod kpi;
pub mod types;
pub mod variance;


pub use aggregate::MonthlyAggregator;
pub use compose::ForecastComposer;
pub use error::BudgetError;
pub use kpi::{KpiService, RUNWAY_SENTINEL_MONTHS};
pub use types::{
    BudgetEntry, Category, ForecastModes, GroupTotals, KpiData, KpiInputs, MonthlyPoint,
    MonthlySeries, MonthlyTotals, Totals, TrendLabel, UNCATEGORIZED, VarianceCategory,
    VarianceStatus, YearlyTargets, YtdComposition,
};
pub use variance::VarianceAnalyzer;
