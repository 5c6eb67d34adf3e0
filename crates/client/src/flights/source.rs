//! Per-source cache-or-fetch pipeline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use flightagg_core::{AppConfig, Error, Flight, FlightStore};

use super::normalize::normalize;
use super::validate::validate;
use crate::fetch::Transport;

/// Retry budget and cache lifetime applied to every source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Extra attempts after a transient failure; immediate, no backoff.
    pub retries: u32,
    /// Lifetime of a successful result in the cache.
    pub ttl: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self { retries: 3, ttl: Duration::from_secs(3600) }
    }
}

impl From<&AppConfig> for FetchPolicy {
    fn from(config: &AppConfig) -> Self {
        Self { retries: config.retry_count, ttl: config.cache_ttl() }
    }
}

/// Fetches one source's flights, preferring the cache.
///
/// [`SourceFetcher::fetch`] never fails: a broken source contributes no
/// flights and a warning in the log.
pub struct SourceFetcher {
    transport: Arc<dyn Transport>,
    store: Arc<dyn FlightStore>,
    policy: FetchPolicy,
}

impl SourceFetcher {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn FlightStore>, policy: FetchPolicy) -> Self {
        Self { transport, store, policy }
    }

    /// Flights for `url`: cached if present, otherwise fetched, validated,
    /// normalized and cached.
    pub async fn fetch(&self, url: &str) -> Vec<Flight> {
        match self.store.get(url).await {
            Ok(Some(flights)) => {
                tracing::debug!(url, count = flights.len(), "flight cache hit");
                return flights;
            }
            Ok(None) => tracing::debug!(url, "flight cache miss"),
            Err(e) => tracing::warn!(url, error = %e, "flight cache unavailable, fetching from source"),
        }

        let start = Instant::now();
        let flights = match self.fetch_fresh(url).await {
            Ok(flights) => flights,
            Err(e) => {
                tracing::warn!(url, error = %e, "source failed, contributing no flights");
                return Vec::new();
            }
        };

        tracing::debug!(url, count = flights.len(), elapsed = ?start.elapsed(), "fetched flights from source");

        if let Err(e) = self.store.set(url, &flights, self.policy.ttl).await {
            tracing::warn!(url, error = %e, "failed to cache flights");
        }

        flights
    }

    async fn fetch_fresh(&self, url: &str) -> Result<Vec<Flight>, Error> {
        let body = self.get_with_retry(url).await?;
        let response = validate(&body)?;
        Ok(normalize(response))
    }

    async fn get_with_retry(&self, url: &str) -> Result<Bytes, Error> {
        let mut attempt = 0;
        loop {
            match self.transport.get(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.policy.retries => {
                    attempt += 1;
                    tracing::debug!(url, attempt, retries = self.policy.retries, error = %e, "retrying source");
                }
                Err(e) => return Err(e),
            }
        }
    }
}
