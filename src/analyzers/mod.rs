//! Descriptive statistics over a filtered set of trips.
//!
//! Each aggregator is a pure function of a [`TripSet`](crate::trip::TripSet)
//! and never fails: an empty set yields `None` for every statistic that has no
//! value, so callers can report "no data" instead of hitting a division by zero.

pub mod duration;
pub mod station;
pub mod time;
pub mod users;
pub mod utility;

use serde::Serialize;
use std::time::Instant;

use crate::filters::Selection;
use crate::trip::TripSet;
use duration::{DurationStats, duration_stats};
use station::{StationStats, station_stats};
use time::{TimeStats, time_stats};
use users::{UserStats, user_stats};

/// An aggregator result and how long it took to compute.
#[derive(Debug, Clone, Serialize)]
pub struct Timed<T> {
    #[serde(flatten)]
    pub stats: T,
    pub elapsed_secs: f64,
}

impl<T> Timed<T> {
    fn run(f: impl FnOnce() -> T) -> Self {
        let start = Instant::now();
        let stats = f();
        Timed {
            stats,
            elapsed_secs: start.elapsed().as_secs_f64(),
        }
    }
}

/// Output of all four aggregators for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub selection: Selection,
    pub trip_count: usize,
    pub time: Timed<TimeStats>,
    pub stations: Timed<StationStats>,
    pub durations: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.trip_count == 0
    }
}

/// Runs every aggregator over `trips`.
#[tracing::instrument(skip_all, fields(city = %selection.city, trips = trips.len()))]
pub fn build_report(selection: &Selection, trips: &TripSet) -> Report {
    Report {
        selection: selection.clone(),
        trip_count: trips.len(),
        time: Timed::run(|| time_stats(trips)),
        stations: Timed::run(|| station_stats(trips)),
        durations: Timed::run(|| duration_stats(trips)),
        users: Timed::run(|| user_stats(trips)),
    }
}
