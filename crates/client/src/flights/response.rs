//! Raw upstream response types.
//!
//! Every source speaks the same schema:
//!
//! ```json
//! { "flights": [ { "price": 100, "slices": [ {
//!     "origin_name": "London", "destination_name": "Paris",
//!     "departure_date_time_utc": "2020-01-01T00:00:00.000Z",
//!     "arrival_date_time_utc": "2020-01-01T02:00:00.000Z",
//!     "flight_number": "1234", "duration": 100 } ] } ] }
//! ```
//!
//! Deserializing into these types enforces presence and JSON types; the
//! content rules live in [`crate::flights::validate`].

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::Deserialize;

/// `YYYY-MM-DDTHH:MM[:SS[.fff...]][Z]`, month 01-12, day 01-31.
static TIMESTAMP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])T([01]\d|2[0-3]):[0-5]\d(:[0-5]\d(\.\d+)?)?Z?$")
        .expect("timestamp pattern compiles")
});

/// Top-level payload from a source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFlightResponse {
    pub flights: Vec<RawFlightGroup>,
}

/// One priced offer made of one or more legs.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFlightGroup {
    pub price: f64,
    pub slices: Vec<RawSlice>,
}

/// One leg of a flight group.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSlice {
    pub origin_name: String,
    pub destination_name: String,
    pub departure_date_time_utc: UtcTimestamp,
    pub arrival_date_time_utc: UtcTimestamp,
    pub flight_number: String,
    pub duration: f64,
}

impl RawFlightResponse {
    /// Total number of slices across all groups.
    pub fn slice_count(&self) -> usize {
        self.flights.iter().map(|group| group.slices.len()).sum()
    }
}

/// A UTC timestamp as the source wrote it, plus its parsed instant.
///
/// The text as sent is kept because it is part of the flight id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct UtcTimestamp {
    raw: String,
    at: DateTime<Utc>,
}

impl UtcTimestamp {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.at
    }

    /// Check the pattern and parse; a missing `Z` still means UTC.
    pub fn parse(raw: &str) -> Result<Self, String> {
        if !TIMESTAMP_PATTERN.is_match(raw) {
            return Err(format!("`{raw}` is not an ISO-8601 date-time"));
        }

        let naive = raw.strip_suffix('Z').unwrap_or(raw);
        let parsed = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M"))
            .map_err(|e| format!("`{raw}` is not a valid date-time: {e}"))?;

        Ok(Self { raw: raw.to_string(), at: parsed.and_utc() })
    }
}

impl TryFrom<String> for UtcTimestamp {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}
