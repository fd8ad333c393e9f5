//! Application configuration management.

use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Report cache configuration.
    pub cache: CacheConfig,
    /// Narrative summary configuration.
    pub summary: SummaryConfig,
    /// Reporter input configuration.
    pub report: ReportConfig,
}

/// Report cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Whether reports are memoized at all.
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Maximum number of cached reports.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live of a cached report in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_max_capacity() -> u64 {
    100
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Narrative summary configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryConfig {
    /// Section ids to generate, in any order. Empty means every section.
    #[serde(default)]
    pub sections: Vec<String>,
}

/// Reporter input configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Default snapshot path when none is given on the command line.
    #[serde(default)]
    pub snapshot_path: Option<String>,
    /// Default selected year when none is given on the command line.
    #[serde(default)]
    pub year: Option<i32>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("SPENDLENS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("summary.sections")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(
            [
                "SPENDLENS__CACHE__MAX_CAPACITY",
                "SPENDLENS__CACHE__ENABLED",
                "SPENDLENS__REPORT__YEAR",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert!(config.cache.enabled);
                assert_eq!(config.cache.max_capacity, 100);
                assert_eq!(config.cache.ttl_secs, 300);
                assert!(config.summary.sections.is_empty());
                assert!(config.report.snapshot_path.is_none());
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("SPENDLENS__CACHE__MAX_CAPACITY", Some("42")),
                ("SPENDLENS__CACHE__ENABLED", Some("false")),
                ("SPENDLENS__REPORT__YEAR", Some("2025")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.cache.max_capacity, 42);
                assert!(!config.cache.enabled);
                assert_eq!(config.report.year, Some(2025));
            },
        );
    }
}
