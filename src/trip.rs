//! Trip records as read from a city's CSV log, plus the derived calendar fields.

use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::filters::{Month, Selection, Weekday};

/// Columns every city log must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Start Time",
    "Start Station",
    "End Station",
    "Trip Duration",
    "User Type",
];

pub const GENDER_COLUMN: &str = "Gender";
pub const BIRTH_YEAR_COLUMN: &str = "Birth Year";

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A single row deserialized from a city CSV file.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTrip {
    #[serde(rename = "Start Time")]
    pub(crate) start_time: String,
    #[serde(rename = "End Time", default)]
    pub(crate) end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub(crate) trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub(crate) start_station: String,
    #[serde(rename = "End Station")]
    pub(crate) end_station: String,
    #[serde(rename = "User Type", default)]
    pub(crate) user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub(crate) gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub(crate) birth_year: Option<f64>,
}

/// One ride, with month, day of week and hour derived from its start time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,

    // derived
    pub month: Month,
    pub day_of_week: Weekday,
    pub hour: u32,
}

impl Trip {
    /// Builds a trip from its start time, deriving the calendar fields.
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration: f64,
    ) -> Self {
        let month = Month::from_number(start_time.month()).unwrap_or(Month::January);
        Trip {
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month,
            day_of_week: start_time.weekday().into(),
            hour: start_time.hour(),
        }
    }

    pub fn with_user_type(mut self, user_type: &str) -> Self {
        self.user_type = Some(user_type.to_string());
        self
    }

    pub fn with_demographics(mut self, gender: Option<&str>, birth_year: Option<f64>) -> Self {
        self.gender = gender.map(str::to_string);
        self.birth_year = birth_year;
        self
    }

    pub(crate) fn from_raw(raw: RawTrip) -> Result<Self> {
        let start_time = parse_timestamp(&raw.start_time)?;
        let end_time = match raw.end_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => match parse_timestamp(s) {
                Ok(t) => Some(t),
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable End Time");
                    None
                }
            },
        };

        let mut trip = Trip::new(
            start_time,
            raw.start_station,
            raw.end_station,
            raw.trip_duration,
        );
        trip.end_time = end_time;
        trip.user_type = non_blank(raw.user_type);
        trip.gender = non_blank(raw.gender);
        trip.birth_year = raw.birth_year.filter(|y| y.is_finite());
        Ok(trip)
    }

    /// The `"{start} to {end}"` composite used for the most common trip.
    pub fn route(&self) -> String {
        format!("{} to {}", self.start_station, self.end_station)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses a start/end timestamp in any of the formats the city logs use.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| anyhow!("unparseable timestamp {s:?}"))
}

/// Which optional demographic columns the loaded schema carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub gender: bool,
    pub birth_year: bool,
}

impl Capabilities {
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let has = |name: &str| headers.iter().any(|h| h.trim() == name);
        Capabilities {
            gender: has(GENDER_COLUMN),
            birth_year: has(BIRTH_YEAR_COLUMN),
        }
    }
}

/// A city's trips together with the schema capabilities they were loaded with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSet {
    pub trips: Vec<Trip>,
    pub capabilities: Capabilities,
}

impl TripSet {
    pub fn new(trips: Vec<Trip>, capabilities: Capabilities) -> Self {
        Self {
            trips,
            capabilities,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    /// Keeps the trips whose derived month and day match the selection.
    pub fn filter(self, selection: &Selection) -> TripSet {
        let trips = self
            .trips
            .into_iter()
            .filter(|t| selection.month.matches(&t.month) && selection.day.matches(&t.day_of_week))
            .collect();
        TripSet {
            trips,
            capabilities: self.capabilities,
        }
    }
}
