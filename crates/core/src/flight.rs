//! Normalized flight model.
//!
//! A [`Flight`] is the only shape upstream data takes once it has passed
//! validation. It is also the unit stored in the cache and returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator between the flight number and the departure timestamp in a flight id.
pub const ID_SEPARATOR: char = '-';

/// A single flight leg, normalized from one upstream slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: DateTime<Utc>,
    pub arrival_date: DateTime<Utc>,
    pub duration: f64,
    pub price: f64,
    pub flight_number: String,
}

impl Flight {
    /// Build the identity of a flight from its natural key.
    ///
    /// `departure` is the timestamp string exactly as the source sent it, so the
    /// same logical flight keeps the same id across fetches.
    pub fn compose_id(flight_number: &str, departure: &str) -> String {
        format!("{flight_number}{ID_SEPARATOR}{departure}")
    }
}
