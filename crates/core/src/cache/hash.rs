//! Cache key derivation for the SQLite store.

use sha2::{Digest, Sha256};

/// Hash a source URL into the fixed-width key used as the `flight_cache` primary key.
///
/// Surrounding whitespace is ignored so `" https://a/ "` and `"https://a/"` share an entry.
pub fn source_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.trim().as_bytes());
    hex::encode(hasher.finalize())
}
