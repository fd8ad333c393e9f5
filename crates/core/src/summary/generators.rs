//! Narrative generators, one pure function per section.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::budget::RUNWAY_SENTINEL_MONTHS;
use crate::vendor::{ConcentrationLevel, RiskLevel};

use super::types::{SummaryContext, SummaryParagraph, SummarySection, SummaryToggles};

/// Number of categories named in the variance paragraph.
const VARIANCE_HIGHLIGHTS: usize = 3;

/// Section generator signature.
pub type Generator = fn(&SummaryContext<'_>) -> String;

/// Generator of a section.
#[must_use]
pub const fn generator(section: SummarySection) -> Generator {
    match section {
        SummarySection::Overview => overview,
        SummarySection::Variance => variance,
        SummarySection::Forecast => forecast,
        SummarySection::Runway => runway,
        SummarySection::VendorConcentration => vendor_concentration,
        SummarySection::VendorRisk => vendor_risk,
        SummarySection::Compliance => compliance,
    }
}

/// Generates the enabled sections in fixed order.
#[must_use]
pub fn generate(context: &SummaryContext<'_>, toggles: &SummaryToggles) -> Vec<SummaryParagraph> {
    toggles
        .enabled()
        .map(|section| SummaryParagraph {
            section,
            text: generator(section)(context),
        })
        .collect()
}

/// Rounds to two places and drops trailing zeros.
fn amount(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

fn pct(value: Decimal) -> String {
    format!("{}%", value.round_dp(1).normalize())
}

fn overview(ctx: &SummaryContext<'_>) -> String {
    let kpis = ctx.kpis;
    let direction = match kpis.variance.cmp(&Decimal::ZERO) {
        Ordering::Greater => "under budget",
        Ordering::Less => "over budget",
        Ordering::Equal => "on budget",
    };
    format!(
        "Through {} {}, spend is {} against a budget of {}, {} by {} ({}). Trend: {}.",
        ctx.ytd.as_of_month,
        ctx.year,
        amount(kpis.ytd_actual),
        amount(kpis.ytd_budget),
        direction,
        amount(kpis.variance.abs()),
        pct(kpis.variance_pct.abs()),
        ctx.trend,
    )
}

fn variance(ctx: &SummaryContext<'_>) -> String {
    if ctx.variance.is_empty() {
        return format!("No category variances recorded for {}.", ctx.year);
    }
    let highlights: Vec<String> = ctx
        .variance
        .iter()
        .take(VARIANCE_HIGHLIGHTS)
        .map(|row| {
            let sign = if row.variance.is_sign_negative() { "-" } else { "+" };
            format!("{} ({sign}{})", row.category_name, amount(row.variance.abs()))
        })
        .collect();
    format!("Largest category variances: {}.", highlights.join(", "))
}

fn forecast(ctx: &SummaryContext<'_>) -> String {
    let kpis = ctx.kpis;
    if kpis.annual_target.is_zero() {
        return format!(
            "No annual target is set for {}; the full-year forecast is {}.",
            ctx.year,
            amount(kpis.full_year_forecast)
        );
    }
    let gap = kpis.forecast_vs_target_variance;
    let position = if gap.is_sign_negative() { "above" } else { "within" };
    format!(
        "The full-year forecast of {} is {} the annual target of {} by {}.",
        amount(kpis.full_year_forecast),
        position,
        amount(kpis.annual_target),
        amount(gap.abs())
    )
}

fn runway(ctx: &SummaryContext<'_>) -> String {
    let kpis = ctx.kpis;
    if kpis.remaining_budget <= Decimal::ZERO {
        return format!(
            "The annual budget is exhausted: spend exceeds the target by {}.",
            amount(kpis.remaining_budget.abs())
        );
    }
    if kpis.runway_months >= RUNWAY_SENTINEL_MONTHS {
        return format!(
            "No spend recorded yet; the remaining budget of {} is untouched.",
            amount(kpis.remaining_budget)
        );
    }
    format!(
        "At a burn rate of {} per month, the remaining {} lasts about {} months; {} months remain in the year.",
        amount(kpis.burn_rate),
        amount(kpis.remaining_budget),
        kpis.runway_months.round_dp(1).normalize(),
        12 - kpis.months_elapsed.min(12)
    )
}

fn vendor_concentration(ctx: &SummaryContext<'_>) -> String {
    let data = ctx.concentration;
    if data.vendor_count == 0 {
        return format!("No vendor spend tracked for {}.", ctx.year);
    }
    let level = match data.concentration_level {
        ConcentrationLevel::Unconcentrated => "unconcentrated",
        ConcentrationLevel::Moderate => "moderately concentrated",
        ConcentrationLevel::High => "highly concentrated",
    };
    let single_source = ctx.dependencies.single_source_dependencies.len();
    format!(
        "{} vendors account for {}; the top five hold {} of spend (HHI {}, {level}). {single_source} categories depend on a single vendor.",
        data.vendor_count,
        amount(data.total_spend),
        pct(data.top5_percentage),
        data.herfindahl_index.round_dp(0),
    )
}

fn vendor_risk(ctx: &SummaryContext<'_>) -> String {
    let Some(top) = ctx.risk.first() else {
        return "No vendors to score.".to_string();
    };
    let elevated = ctx
        .risk
        .iter()
        .filter(|score| score.risk_level >= RiskLevel::High)
        .count();
    format!(
        "{elevated} of {} vendors carry high or critical risk. Highest: {} at {} ({}).",
        ctx.risk.len(),
        top.vendor_name,
        top.overall_risk_score.round_dp(1).normalize(),
        top.risk_level.as_str(),
    )
}

fn compliance(ctx: &SummaryContext<'_>) -> String {
    let metrics = ctx.compliance;
    format!(
        "Audit readiness is {} with {} finding(s). Vendor data is {} complete, tracking {} complete, and {} of budgeted vendors are within budget.",
        metrics.audit_readiness_score.normalize(),
        metrics.findings.len(),
        pct(metrics.vendor_data_completeness),
        pct(metrics.tracking_completeness),
        pct(metrics.budget_compliance_rate),
    )
}
