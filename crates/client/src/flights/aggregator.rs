//! Concurrent fan-out over all configured sources.

use std::collections::HashMap;
use std::sync::Arc;

use flightagg_core::Flight;

use super::source::SourceFetcher;

/// Merges the flights of every configured source.
pub struct Aggregator {
    fetcher: Arc<SourceFetcher>,
    sources: Vec<String>,
}

impl Aggregator {
    pub fn new(fetcher: SourceFetcher, sources: Vec<String>) -> Self {
        Self { fetcher: Arc::new(fetcher), sources }
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Fetch every source concurrently and merge the results.
    ///
    /// Waits for all sources. Results are concatenated in source order and
    /// deduplicated with [`dedup_by_id`]. A source that fails, or whose task
    /// panics, contributes nothing.
    ///
    /// Fetches are detached tasks: dropping the returned future stops the
    /// wait, not the fetches, so their results still reach the cache.
    pub async fn get_flights(&self) -> Vec<Flight> {
        let handles: Vec<_> = self
            .sources
            .iter()
            .cloned()
            .map(|url| {
                let fetcher = self.fetcher.clone();
                tokio::spawn(async move { fetcher.fetch(&url).await })
            })
            .collect();

        let mut per_source: Vec<Vec<Flight>> = Vec::with_capacity(handles.len());

        for (url, handle) in self.sources.iter().zip(handles) {
            match handle.await {
                Ok(flights) => per_source.push(flights),
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "source task did not complete");
                    per_source.push(Vec::new());
                }
            }
        }

        let merged = dedup_by_id(per_source.into_iter().flatten());

        tracing::debug!(sources = self.sources.len(), flights = merged.len(), "aggregated flights");

        merged
    }
}

/// Keep one flight per id.
///
/// The last occurrence of an id wins, but it takes the position where that id
/// first appeared.
pub fn dedup_by_id(flights: impl IntoIterator<Item = Flight>) -> Vec<Flight> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Flight> = Vec::new();

    for flight in flights {
        match positions.get(&flight.id) {
            Some(&position) => unique[position] = flight,
            None => {
                positions.insert(flight.id.clone(), unique.len());
                unique.push(flight);
            }
        }
    }

    unique
}
