//! Spendlens reporter
//!
//! Loads a budget state snapshot (JSON) and prints the analytics report for
//! one year as JSON.
//!
//! Usage: `spendlens [SNAPSHOT] [YEAR]`. Both default to the `report`
//! section of the configuration; the year falls back to the current one.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spendlens_core::summary::SummaryToggles;
use spendlens_core::{AnalyticsCache, AnalyticsEngine, AnalyticsReport, BudgetState};
use spendlens_shared::{AppConfig, AppError, AppResult};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spendlens=info,spendlens_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let today = Local::now().date_naive();

    let snapshot_path = args
        .first()
        .cloned()
        .or_else(|| config.report.snapshot_path.clone())
        .ok_or_else(|| {
            AppError::Validation(
                "no snapshot path given; pass one or set SPENDLENS__REPORT__SNAPSHOT_PATH"
                    .to_string(),
            )
        })?;
    let year = match args.get(1) {
        Some(raw) => parse_year(raw)?,
        None => config.report.year.unwrap_or_else(|| today.year()),
    };

    let state = load_snapshot(Path::new(&snapshot_path))
        .with_context(|| format!("loading snapshot {snapshot_path}"))?;
    info!(
        path = %snapshot_path,
        year,
        entries = state.entries.len(),
        vendors = state.vendors.len(),
        "Snapshot loaded"
    );

    let engine = AnalyticsEngine::new(SummaryToggles::from_names(&config.summary.sections));
    let report = build_report(&config, engine, &state, year, today)?;
    info!(
        year,
        as_of_month = %report.ytd.as_of_month,
        cached = report.cached,
        "Report generated"
    );

    let json = serde_json::to_string_pretty(&report).map_err(AppError::from)?;
    println!("{json}");

    Ok(())
}

fn build_report(
    config: &AppConfig,
    engine: AnalyticsEngine,
    state: &BudgetState,
    year: i32,
    today: NaiveDate,
) -> anyhow::Result<AnalyticsReport> {
    if !config.cache.enabled {
        return Ok(engine.analyze(state, year, today));
    }
    let cache = AnalyticsCache::with_config(engine, config.cache.max_capacity, config.cache.ttl_secs);
    Ok(cache.analyze_cached(state, year, today)?)
}

fn parse_year(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid year: {raw}")))
}

fn load_snapshot(path: &Path) -> AppResult<BudgetState> {
    let json = std::fs::read_to_string(path)?;
    BudgetState::from_json(&json).map_err(|err| AppError::Serialization(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(" 2025 ").unwrap(), 2025);
        assert!(matches!(parse_year("next"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_load_snapshot_decodes_and_rejects() {
        let dir = std::env::temp_dir();
        let good = dir.join(format!("spendlens-good-{}.json", std::process::id()));
        let bad = dir.join(format!("spendlens-bad-{}.json", std::process::id()));
        std::fs::write(&good, r#"{"vendorTracking": [{"vendorName": "Acme", "year": 2025, "jan": 10}]}"#)
            .unwrap();
        std::fs::write(&bad, "{not json").unwrap();

        let state = load_snapshot(&good).unwrap();
        let err = load_snapshot(&bad).unwrap_err();
        std::fs::remove_file(&good).unwrap();
        std::fs::remove_file(&bad).unwrap();

        assert_eq!(state.tracking.len(), 1);
        assert_eq!(state.tracking[0].jan, "10");
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().contains("Invalid budget snapshot"));
    }

    #[test]
    fn test_missing_snapshot_is_io_error() {
        let err = load_snapshot(Path::new("does/not/exist.json")).unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }

    #[test]
    fn test_report_without_cache() {
        let config = AppConfig::default();
        let mut uncached = config.clone();
        uncached.cache.enabled = false;
        let state = BudgetState::default();
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let fresh = build_report(&uncached, AnalyticsEngine::default(), &state, 2025, today).unwrap();
        let cached = build_report(&config, AnalyticsEngine::default(), &state, 2025, today).unwrap();

        assert!(!fresh.cached);
        assert_eq!(fresh, cached);
    }
}
