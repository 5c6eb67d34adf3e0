//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (FLIGHTS_*)
//! 2. TOML config file (if FLIGHTS_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Which store backs the per-source flight cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process-local map; entries vanish on restart.
    #[default]
    Memory,
    /// SQLite file at `db_path`.
    Sqlite,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (FLIGHTS_*)
/// 2. TOML config file (if FLIGHTS_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream sources, queried in this order and merged in this order.
    ///
    /// Set via FLIGHTS_ENDPOINTS as an array, e.g. `["https://a/flights","https://b/flights"]`.
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Extra attempts after a transient network failure.
    ///
    /// Set via FLIGHTS_RETRY_COUNT environment variable.
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Lifetime of a cached source result in seconds.
    ///
    /// Set via FLIGHTS_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Cache store implementation.
    ///
    /// Set via FLIGHTS_CACHE_BACKEND (`memory` or `sqlite`).
    #[serde(default)]
    pub cache_backend: CacheBackend,

    /// Path to SQLite cache database, used by the `sqlite` backend.
    ///
    /// Set via FLIGHTS_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via FLIGHTS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via FLIGHTS_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds, applied to every attempt.
    ///
    /// Set via FLIGHTS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoints() -> Vec<String> {
    vec![
        "https://coding-challenge.powerus.de/flight/source1".into(),
        "https://coding-challenge.powerus.de/flight/source2".into(),
    ]
}

fn default_retry_count() -> u32 {
    3
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./flights-cache.sqlite")
}

fn default_user_agent() -> String {
    "flight-aggregator/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            retry_count: default_retry_count(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_backend: CacheBackend::default(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache TTL as Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `FLIGHTS_`
    /// 2. TOML file from `FLIGHTS_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("FLIGHTS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("FLIGHTS_")
                .ignore(&["config_file"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        Self::from_figment(figment)
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
