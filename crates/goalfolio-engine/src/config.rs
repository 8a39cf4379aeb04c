//! Engine configuration.
//!
//! Loaded from TOML; every key is optional and falls back to its default.
//! Durations are written in milliseconds.
//!
//! ```toml
//! request_delay = 500
//! request_timeout = 10000
//! chart_window = "oneYear"
//! mode = "production"
//!
//! [cache]
//! max_age = 604800000
//! refresh_min_age = 86400000
//! key_prefix = "gpv_performance_"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use goalfolio_analytics::WindowKey;
use goalfolio_storage::CacheConfig;
use goalfolio_traits::config::duration_millis;
use goalfolio_traits::ExecutionMode;

use crate::error::{EngineError, EngineResult};

/// Default pause between sequential fetches.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Orchestrator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pause between consecutive fetches.
    #[serde(with = "duration_millis")]
    pub request_delay: Duration,

    /// Upper bound on a single fetch.
    #[serde(with = "duration_millis")]
    pub request_timeout: Duration,

    /// Lookback window for the chart series.
    pub chart_window: WindowKey,

    /// Production or demo.
    pub mode: ExecutionMode,

    /// Cache settings.
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            request_delay: DEFAULT_REQUEST_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            chart_window: WindowKey::OneYear,
            mode: ExecutionMode::Production,
            cache: CacheConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Set the delay between fetches.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the chart window.
    pub fn with_chart_window(mut self, window: WindowKey) -> Self {
        self.chart_window = window;
        self
    }

    /// Set the execution mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the cache configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Reject settings that would make the cache or fetcher unusable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.request_timeout.is_zero() {
            return Err(EngineError::config("request_timeout must be positive"));
        }
        if self.cache.max_age.is_zero() {
            return Err(EngineError::config("cache.max_age must be positive"));
        }
        if self.cache.refresh_min_age.is_zero() {
            return Err(EngineError::config("cache.refresh_min_age must be positive"));
        }
        if self.cache.key_prefix.trim().is_empty() {
            return Err(EngineError::config("cache.key_prefix must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.request_delay, Duration::from_millis(500));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.chart_window, WindowKey::OneYear);
        assert_eq!(config.mode, ExecutionMode::Production);
        assert_eq!(config.cache.key_prefix, "gpv_performance_");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            request_delay = 0
            mode = "demo"
            chart_window = "sixMonth"

            [cache]
            max_age = 3600000
            "#,
        )
        .unwrap();

        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.mode, ExecutionMode::Demo);
        assert_eq!(config.chart_window, WindowKey::SixMonth);
        assert_eq!(config.cache.max_age, Duration::from_secs(3600));
        assert_eq!(config.cache.refresh_min_age, Duration::from_secs(86_400));
    }

    #[test]
    fn test_invalid_toml() {
        let err = EngineConfig::from_toml_str("chart_window = \"tenYear\"").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_toml_file("/nonexistent/goalfolio.toml").unwrap_err();
        assert!(matches!(err, EngineError::ConfigIo { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let zero_timeout = EngineConfig::default().with_request_timeout(Duration::ZERO);
        assert!(matches!(zero_timeout.validate(), Err(EngineError::Config(_))));

        let zero_age =
            EngineConfig::default().with_cache(CacheConfig::default().with_max_age(Duration::ZERO));
        assert!(zero_age.validate().is_err());

        let zero_cooldown = EngineConfig::default()
            .with_cache(CacheConfig::default().with_refresh_min_age(Duration::ZERO));
        assert!(zero_cooldown.validate().is_err());

        let no_prefix =
            EngineConfig::default().with_cache(CacheConfig::default().with_key_prefix(" "));
        assert!(no_prefix.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EngineConfig::default().with_mode(ExecutionMode::Demo);
        let text = toml::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }
}
