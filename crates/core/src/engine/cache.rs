//! Analytics report caching using Moka.
//!
//! Reports are keyed by a content hash of the snapshot, so an unchanged
//! snapshot is analyzed once per TTL window.

use chrono::NaiveDate;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::error::EngineError;
use super::service::AnalyticsEngine;
use super::types::{AnalyticsReport, BudgetState};

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 100;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Cache for analytics reports.
///
/// Thread-safe and suitable for concurrent access.
#[derive(Clone)]
pub struct AnalyticsCache {
    engine: AnalyticsEngine,
    cache: Cache<String, Arc<AnalyticsReport>>,
}

impl AnalyticsCache {
    /// Creates a cache with default settings: 100 entries, 5 minute TTL.
    #[must_use]
    pub fn new(engine: AnalyticsEngine) -> Self {
        Self::with_config(engine, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `engine` - Engine used on a cache miss
    /// * `max_capacity` - Maximum number of entries to cache
    /// * `ttl_secs` - Time-to-live in seconds for each entry
    #[must_use]
    pub fn with_config(engine: AnalyticsEngine, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { engine, cache }
    }

    /// Analyzes a snapshot, returning a cached report if available.
    ///
    /// Cached reports come back with `cached: true` and are otherwise
    /// identical to a fresh run.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Fingerprint` if the snapshot cannot be hashed.
    pub fn analyze_cached(
        &self,
        state: &BudgetState,
        year: i32,
        today: NaiveDate,
    ) -> Result<AnalyticsReport, EngineError> {
        let cache_key = self.engine.fingerprint(state, year, today)?;

        if let Some(cached_report) = self.cache.get(&cache_key) {
            debug!(year, key = %cache_key, "Analytics cache hit");
            let mut report = (*cached_report).clone();
            report.cached = true;
            return Ok(report);
        }

        debug!(year, key = %cache_key, "Analytics cache miss");
        let report = self.engine.analyze(state, year, today);
        self.cache.insert(cache_key, Arc::new(report.clone()));

        Ok(report)
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Invalidates the entry of one snapshot.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Fingerprint` if the snapshot cannot be hashed.
    pub fn invalidate(
        &self,
        state: &BudgetState,
        year: i32,
        today: NaiveDate,
    ) -> Result<(), EngineError> {
        let cache_key = self.engine.fingerprint(state, year, today)?;
        self.cache.invalidate(&cache_key);
        Ok(())
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    ///
    /// Moka cleans up in the background; calling this reclaims expired
    /// entries sooner.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for AnalyticsCache {
    fn default() -> Self {
        Self::new(AnalyticsEngine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{BudgetEntry, YearlyTargets};
    use rust_decimal_macros::dec;
    use spendlens_shared::types::CategoryId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn create_test_state() -> BudgetState {
        BudgetState {
            entries: vec![BudgetEntry {
                category_id: CategoryId::new(),
                year: 2025,
                month: 1,
                budget_amount: dec!(1000),
                actual_amount: Some(dec!(900)),
                reforecast_amount: dec!(1000),
            }],
            yearly_targets: YearlyTargets([(2025, dec!(12000))].into_iter().collect()),
            ..BudgetState::default()
        }
    }

    #[test]
    fn test_cache_miss_then_hit() {
        let cache = AnalyticsCache::default();
        let state = create_test_state();

        let first = cache.analyze_cached(&state, 2025, today()).unwrap();
        assert!(!first.cached, "First call should not be cached");

        let second = cache.analyze_cached(&state, 2025, today()).unwrap();
        assert!(second.cached, "Second call should be cached");

        let mut normalized = second;
        normalized.cached = false;
        assert_eq!(normalized, first);
    }

    #[test]
    fn test_different_snapshot_not_cached() {
        let cache = AnalyticsCache::default();
        let state = create_test_state();
        let mut changed = state.clone();
        changed.entries[0].actual_amount = Some(dec!(950));

        assert!(!cache.analyze_cached(&state, 2025, today()).unwrap().cached);
        let result = cache.analyze_cached(&changed, 2025, today()).unwrap();
        assert!(!result.cached, "Changed snapshot should not hit cache");
        assert_eq!(result.kpis.ytd_actual, dec!(950));

        assert!(cache.analyze_cached(&state, 2025, today()).unwrap().cached);
    }

    #[test]
    fn test_invalidate_all() {
        let cache = AnalyticsCache::default();
        let state = create_test_state();

        let _ = cache.analyze_cached(&state, 2025, today()).unwrap();
        assert!(cache.analyze_cached(&state, 2025, today()).unwrap().cached);

        cache.invalidate_all();
        cache.run_pending_tasks();

        let result = cache.analyze_cached(&state, 2025, today()).unwrap();
        assert!(!result.cached, "Should be cache miss after invalidate_all");
    }

    #[test]
    fn test_invalidate_specific() {
        let cache = AnalyticsCache::with_config(AnalyticsEngine::default(), 10, 60);
        let state = create_test_state();

        let _ = cache.analyze_cached(&state, 2025, today()).unwrap();
        let _ = cache.analyze_cached(&state, 2024, today()).unwrap();

        cache.invalidate(&state, 2025, today()).unwrap();
        cache.run_pending_tasks();

        assert!(!cache.analyze_cached(&state, 2025, today()).unwrap().cached);
        assert!(cache.analyze_cached(&state, 2024, today()).unwrap().cached);
    }

    #[test]
    fn test_entry_count() {
        let cache = AnalyticsCache::default();
        assert_eq!(cache.entry_count(), 0);

        let _ = cache.analyze_cached(&create_test_state(), 2025, today()).unwrap();

        cache.run_pending_tasks();
        assert!(cache.entry_count() >= 1);
    }
}
