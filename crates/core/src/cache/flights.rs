//! Flight cache operations on the SQLite store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tokio_rusqlite::{params, rusqlite};

use super::connection::CacheDb;
use super::hash::source_key;
use super::FlightStore;
use crate::{Error, Flight};

/// Row timestamps are fixed-width RFC 3339 so string comparison orders them.
fn timestamp(at: chrono::DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl CacheDb {
    /// Get the cached flights for a source URL.
    ///
    /// Returns None if there is no entry or the entry has expired.
    pub async fn get_flights(&self, source_url: &str) -> Result<Option<Vec<Flight>>, Error> {
        let key_hash = source_key(source_url);
        let now = timestamp(Utc::now());

        let json = self
            .conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt =
                    conn.prepare("SELECT flights_json FROM flight_cache WHERE key_hash = ?1 AND expires_at > ?2")?;

                let result = stmt.query_row(params![key_hash, now], |row| row.get(0));

                match result {
                    Ok(json) => Ok(Some(json)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        json.map(|j| serde_json::from_str(&j).map_err(|e| Error::Cache(format!("unreadable entry for {source_url}: {e}"))))
            .transpose()
    }

    /// Insert or update the cached flights for a source URL.
    ///
    /// Uses UPSERT semantics: inserts if the source has no entry, replaces it otherwise.
    pub async fn put_flights(&self, source_url: &str, flights: &[Flight], ttl: Duration) -> Result<(), Error> {
        let key_hash = source_key(source_url);
        let source_url = source_url.to_string();
        let flights_json = serde_json::to_string(flights).map_err(|e| Error::Cache(e.to_string()))?;
        let flight_count = flights.len() as i64;

        let ttl = chrono::Duration::from_std(ttl).map_err(|e| Error::Cache(format!("invalid ttl: {e}")))?;
        let fetched_at = Utc::now();
        let expires_at = fetched_at
            .checked_add_signed(ttl)
            .ok_or_else(|| Error::Cache("ttl overflows the clock".into()))?;
        let (fetched_at, expires_at) = (timestamp(fetched_at), timestamp(expires_at));

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO flight_cache (key_hash, source_url, flights_json, flight_count, fetched_at, expires_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    ON CONFLICT(key_hash) DO UPDATE SET
                        source_url = excluded.source_url,
                        flights_json = excluded.flights_json,
                        flight_count = excluded.flight_count,
                        fetched_at = excluded.fetched_at,
                        expires_at = excluded.expires_at",
                    params![key_hash, source_url, flights_json, flight_count, fetched_at, expires_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete expired flight cache entries.
    ///
    /// Returns the number of deleted entries.
    pub async fn purge_expired_flights(&self) -> Result<u64, Error> {
        let now = timestamp(Utc::now());
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM flight_cache WHERE expires_at <= ?1", params![now])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl FlightStore for CacheDb {
    async fn get(&self, key: &str) -> Result<Option<Vec<Flight>>, Error> {
        self.get_flights(key).await
    }

    async fn set(&self, key: &str, flights: &[Flight], ttl: Duration) -> Result<(), Error> {
        self.put_flights(key, flights, ttl).await
    }

    async fn purge_expired(&self) -> Result<u64, Error> {
        self.purge_expired_flights().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    const SOURCE: &str = "https://coding-challenge.powerus.de/flight/source1";

    fn flight(number: &str, departure: &str, price: f64) -> Flight {
        let at: DateTime<Utc> = departure.parse().unwrap();
        Flight {
            id: Flight::compose_id(number, departure),
            origin: "London".into(),
            destination: "Paris".into(),
            departure_date: at,
            arrival_date: at,
            duration: 100.0,
            price,
            flight_number: number.into(),
        }
    }

    #[tokio::test]
    async fn test_put_and_get_flights() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let flights = vec![
            flight("1234", "2020-01-01T00:00:00.000Z", 100.0),
            flight("5678", "2020-01-02T10:30:00.000Z", 80.5),
        ];

        db.put_flights(SOURCE, &flights, Duration::from_secs(3600)).await.unwrap();

        let cached = db.get_flights(SOURCE).await.unwrap().unwrap();
        assert_eq!(cached, flights);
    }

    #[tokio::test]
    async fn test_get_missing_flights() {
        let db = CacheDb::open_in_memory().await.unwrap();
        assert!(db.get_flights("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_list_is_cached() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put_flights(SOURCE, &[], Duration::from_secs(3600)).await.unwrap();

        assert_eq!(db.get_flights(SOURCE).await.unwrap(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_flight_expiry() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put_flights(SOURCE, &[flight("1234", "2020-01-01T00:00:00.000Z", 100.0)], Duration::from_secs(1))
            .await
            .unwrap();

        assert!(db.get_flights(SOURCE).await.unwrap().is_some());
        tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
        assert!(db.get_flights(SOURCE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_flights() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put_flights(SOURCE, &[flight("1234", "2020-01-01T00:00:00.000Z", 100.0)], Duration::from_secs(3600))
            .await
            .unwrap();
        db.put_flights(SOURCE, &[flight("1234", "2020-01-01T00:00:00.000Z", 90.0)], Duration::from_secs(3600))
            .await
            .unwrap();

        let cached = db.get_flights(SOURCE).await.unwrap().unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].price, 90.0);
    }

    #[tokio::test]
    async fn test_purge_expired_flights() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put_flights("expiring", &[], Duration::from_secs(1)).await.unwrap();
        db.put_flights("fresh", &[], Duration::from_secs(3600)).await.unwrap();

        tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;

        let deleted = db.purge_expired().await.unwrap();
        assert_eq!(deleted, 1);
        assert!(db.get("expiring").await.unwrap().is_none());
        assert!(db.get("fresh").await.unwrap().is_some());
    }
}
