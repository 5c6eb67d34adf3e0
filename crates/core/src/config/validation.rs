//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::collections::HashSet;

use crate::config::AppConfig;
use thiserror::Error;

/// Upper bound on `retry_count`.
const MAX_RETRY_COUNT: u32 = 10;

/// Upper bound on `cache_ttl_secs` (30 days).
const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - an endpoint is blank, not http(s), or listed twice
    /// - `retry_count` exceeds 10
    /// - `cache_ttl_secs` is 0 or exceeds 30 days
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    ///
    /// Returns `ConfigError::Missing` if the sqlite backend is selected with an empty `db_path`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for endpoint in &self.endpoints {
            let trimmed = endpoint.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Invalid { field: "endpoints".into(), reason: "entries must not be empty".into() });
            }
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    field: "endpoints".into(),
                    reason: format!("{trimmed} is not an http(s) URL"),
                });
            }
            if !seen.insert(trimmed) {
                return Err(ConfigError::Invalid { field: "endpoints".into(), reason: format!("{trimmed} is listed twice") });
            }
        }

        if self.endpoints.is_empty() {
            tracing::warn!("No endpoints configured; every aggregation will return no flights");
        }

        if self.retry_count > MAX_RETRY_COUNT {
            return Err(ConfigError::Invalid {
                field: "retry_count".into(),
                reason: format!("must not exceed {MAX_RETRY_COUNT}"),
            });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_secs".into(), reason: "must be at least 1".into() });
        }
        if self.cache_ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_secs".into(),
                reason: format!("must not exceed {MAX_CACHE_TTL_SECS} (30 days)"),
            });
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.cache_backend == super::CacheBackend::Sqlite && self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Missing {
                field: "db_path".into(),
                hint: "Set FLIGHTS_DB_PATH when FLIGHTS_CACHE_BACKEND=sqlite".into(),
            });
        }

        Ok(())
    }
}
