use serde::Serialize;

use crate::analyzers::utility::mode;
use crate::trip::TripSet;

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub most_common_start: Option<String>,
    pub most_common_end: Option<String>,
    /// Start and end station joined by `" to "`.
    pub most_common_trip: Option<String>,
}

#[tracing::instrument(skip_all, fields(trips = trips.len()))]
pub fn station_stats(trips: &TripSet) -> StationStats {
    StationStats {
        most_common_start: mode(trips.iter().map(|t| t.start_station.as_str())).map(str::to_string),
        most_common_end: mode(trips.iter().map(|t| t.end_station.as_str())).map(str::to_string),
        most_common_trip: mode(trips.iter().map(|t| t.route())),
    }
}
