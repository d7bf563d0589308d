use serde::Serialize;

use crate::analyzers::utility::mean;
use crate::trip::TripSet;

/// Total and average trip duration, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    /// `None` when there are no trips to average.
    pub mean_seconds: Option<f64>,
}

#[tracing::instrument(skip_all, fields(trips = trips.len()))]
pub fn duration_stats(trips: &TripSet) -> DurationStats {
    let durations: Vec<f64> = trips.iter().map(|t| t.trip_duration).collect();

    DurationStats {
        trip_count: durations.len(),
        total_seconds: durations.iter().sum(),
        mean_seconds: mean(&durations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::{Capabilities, Trip, parse_timestamp};

    #[test]
    fn test_duration_stats_sum_and_mean() {
        let start = parse_timestamp("2017-02-14 12:00:00").unwrap();
        let set = TripSet::new(
            [100.0, 200.0, 300.0]
                .into_iter()
                .map(|d| Trip::new(start, "A", "B", d))
                .collect(),
            Capabilities::default(),
        );

        let stats = duration_stats(&set);
        assert_eq!(stats.trip_count, 3);
        assert_eq!(stats.total_seconds, 600.0);
        assert_eq!(stats.mean_seconds, Some(200.0));
    }

    #[test]
    fn test_duration_stats_empty() {
        let stats = duration_stats(&TripSet::default());
        assert_eq!(stats.trip_count, 0);
        assert_eq!(stats.total_seconds, 0.0);
        assert_eq!(stats.mean_seconds, None);
    }
}
