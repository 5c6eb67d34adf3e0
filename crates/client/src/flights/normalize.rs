//! Raw response to [`Flight`] conversion.

use flightagg_core::Flight;

use super::response::{RawFlightResponse, RawSlice};

/// Flatten a validated response into one [`Flight`] per slice.
///
/// Output order is group order, then slice order within a group. Each slice
/// takes the price of its group. Repeated slices stay repeated; deduplication
/// happens across sources in the aggregator.
pub fn normalize(response: RawFlightResponse) -> Vec<Flight> {
    response
        .flights
        .into_iter()
        .flat_map(|group| {
            let price = group.price;
            group.slices.into_iter().map(move |slice| to_flight(slice, price))
        })
        .collect()
}

fn to_flight(slice: RawSlice, price: f64) -> Flight {
    Flight {
        id: Flight::compose_id(&slice.flight_number, slice.departure_date_time_utc.as_str()),
        origin: slice.origin_name,
        destination: slice.destination_name,
        departure_date: slice.departure_date_time_utc.instant(),
        arrival_date: slice.arrival_date_time_utc.instant(),
        duration: slice.duration,
        price,
        flight_number: slice.flight_number,
    }
}
