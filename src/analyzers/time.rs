use serde::Serialize;

use crate::analyzers::utility::{mode, mode_by_key};
use crate::filters::{Month, Weekday};
use crate::trip::TripSet;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub most_common_month: Option<Month>,
    pub most_common_day: Option<Weekday>,
    pub most_common_hour: Option<u32>,
}

/// Month and day ties go to the alphabetically first name, hour ties to the earliest hour.
#[tracing::instrument(skip_all, fields(trips = trips.len()))]
pub fn time_stats(trips: &TripSet) -> TimeStats {
    TimeStats {
        most_common_month: mode_by_key(trips.iter().map(|t| t.month), |m| m.as_str()),
        most_common_day: mode_by_key(trips.iter().map(|t| t.day_of_week), |d| d.as_str()),
        most_common_hour: mode(trips.iter().map(|t| t.hour)),
    }
}
