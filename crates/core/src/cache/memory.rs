//! In-process flight cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::FlightStore;
use crate::{Error, Flight};

/// Cached flight list with its expiry instant.
struct CachedFlights {
    flights: Vec<Flight>,
    expires_at: Instant,
}

impl CachedFlights {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache for per-source flight lists.
///
/// Uses a HashMap behind a tokio RwLock for concurrent access.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CachedFlights>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl FlightStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<Flight>>, Error> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(cached) if !cached.is_expired() => Ok(Some(cached.flights.clone())),
            _ => Ok(None),
        }
    }

    async fn set(&self, key: &str, flights: &[Flight], ttl: Duration) -> Result<(), Error> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| Error::Cache(format!("ttl {ttl:?} overflows the clock")))?;

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CachedFlights { flights: flights.to_vec(), expires_at });
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, Error> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, cached| !cached.is_expired());
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn flight(id: &str) -> Flight {
        let at: DateTime<Utc> = "2020-01-01T00:00:00Z".parse().unwrap();
        Flight {
            id: id.to_string(),
            origin: "London".into(),
            destination: "Paris".into(),
            departure_date: at,
            arrival_date: at,
            duration: 100.0,
            price: 100.0,
            flight_number: "1234".into(),
        }
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = MemoryCache::new();
        assert!(cache.get("https://example.com/source1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new();
        let flights = vec![flight("a"), flight("b")];
        cache.set("src", &flights, Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.get("src").await.unwrap(), Some(flights));
    }

    #[tokio::test]
    async fn test_empty_list_is_a_hit() {
        let cache = MemoryCache::new();
        cache.set("src", &[], Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.get("src").await.unwrap(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_set_replaces_entry() {
        let cache = MemoryCache::new();
        cache.set("src", &[flight("a")], Duration::from_secs(60)).await.unwrap();
        cache.set("src", &[flight("b")], Duration::from_secs(60)).await.unwrap();

        let cached = cache.get("src").await.unwrap().unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "b");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_miss() {
        let cache = MemoryCache::new();
        cache.set("src", &[flight("a")], Duration::ZERO).await.unwrap();

        assert!(cache.get("src").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let cache = MemoryCache::new();
        cache.set("stale", &[flight("a")], Duration::ZERO).await.unwrap();
        cache.set("fresh", &[flight("b")], Duration::from_secs(3600)).await.unwrap();

        let purged = cache.purge_expired().await.unwrap();
        assert_eq!(purged, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get("fresh").await.unwrap().is_some());
    }
}
