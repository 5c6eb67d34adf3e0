//! Per-source flight cache.
//!
//! Each configured source URL maps to the flights last fetched from it, with a
//! time-to-live. Two stores are provided:
//!
//! - [`MemoryCache`]: process-local map, the default
//! - [`CacheDb`]: SQLite with async access via tokio-rusqlite, WAL mode and
//!   automatic schema migrations

pub mod connection;
pub mod flights;
pub mod hash;
pub mod memory;
pub mod migrations;

use std::time::Duration;

use async_trait::async_trait;

pub use crate::Error;
use crate::Flight;

pub use connection::CacheDb;
pub use memory::MemoryCache;

/// Key-value store of flight lists with expiry.
///
/// Keys are source URLs. An expired entry reads as absent. Implementations must
/// be safe to call from many tasks at once.
#[async_trait]
pub trait FlightStore: Send + Sync {
    /// Flights cached for `key`, or `None` on a miss.
    async fn get(&self, key: &str) -> Result<Option<Vec<Flight>>, Error>;

    /// Store `flights` under `key` for `ttl`, replacing any previous entry.
    async fn set(&self, key: &str, flights: &[Flight], ttl: Duration) -> Result<(), Error>;

    /// Drop expired entries, returning how many were removed.
    async fn purge_expired(&self) -> Result<u64, Error>;
}
