//! Flight offer pipeline.
//!
//! ```text
//! source URL -> cache? -> Transport (retry) -> validate -> normalize -> cache
//!                                                                   |
//!                                  Aggregator: all sources -> dedup_by_id
//! ```

pub mod aggregator;
pub mod normalize;
pub mod response;
pub mod source;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::{Aggregator, dedup_by_id};
pub use normalize::normalize;
pub use response::{RawFlightGroup, RawFlightResponse, RawSlice, UtcTimestamp};
pub use source::{FetchPolicy, SourceFetcher};
pub use validate::validate;
