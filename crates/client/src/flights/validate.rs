//! Response validation.
//!
//! A payload is accepted whole or rejected whole. Shape and type mismatches
//! (missing `flights`, a string `price`, a malformed timestamp) are reported
//! by the deserializer with their position in the body; content rules are
//! checked afterwards and report the path of the offending field.

use flightagg_core::Error;

use super::response::{RawFlightResponse, RawSlice};

/// Parse and check a raw source body.
///
/// # Errors
///
/// Returns `Error::Validation` on the first problem found.
pub fn validate(body: &[u8]) -> Result<RawFlightResponse, Error> {
    let response: RawFlightResponse =
        serde_json::from_slice(body).map_err(|e| Error::Validation(format!("malformed payload: {e}")))?;

    for (g, group) in response.flights.iter().enumerate() {
        for (s, slice) in group.slices.iter().enumerate() {
            check_slice(slice).map_err(|field| Error::Validation(format!("flights[{g}].slices[{s}].{field}")))?;
        }
    }

    Ok(response)
}

/// Returns the failing field and rule.
fn check_slice(slice: &RawSlice) -> Result<(), String> {
    let required = [
        ("origin_name", &slice.origin_name),
        ("destination_name", &slice.destination_name),
        ("flight_number", &slice.flight_number),
    ];

    for (field, value) in required {
        if value.is_empty() {
            return Err(format!("{field}: must not be empty"));
        }
    }

    Ok(())
}
