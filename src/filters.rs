//! Month/day/city selection and the pure validation that backs the prompts.

use serde::Serialize;
use std::fmt;

use crate::config::CityConfig;

/// Calendar month derived from a trip's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Months the trip logs cover, and therefore the only ones a user may filter on.
    pub const FILTERABLE: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// Maps a 1-based month number (as returned by `chrono::Datelike::month`).
    pub fn from_number(n: u32) -> Option<Month> {
        Self::ALL.get(n.checked_sub(1)? as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of week derived from a trip's start time, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either every value (`"all"`) or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Period<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Period::All => true,
            Period::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Period<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::All => f.write_str(ALL),
            Period::Only(v) => v.fmt(f),
        }
    }
}

const ALL: &str = "all";

/// A validated (city, month, day) choice. Built once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub city: String,
    pub month: Period<Month>,
    pub day: Period<Weekday>,
}

impl Selection {
    /// Resolves all three raw inputs, failing on the first rejected one.
    pub fn resolve(
        cities: &CityConfig,
        city: &str,
        month: &str,
        day: &str,
    ) -> Result<Self, Rejection> {
        Ok(Selection {
            city: resolve_city(city, cities)?,
            month: resolve_month(month)?,
            day: resolve_day(day)?,
        })
    }
}

/// Why a raw input was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub input: String,
    pub valid: Vec<String>,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid input. Please enter one of the following: {}",
            self.valid.join(", ")
        )
    }
}

impl std::error::Error for Rejection {}

/// Accepts `raw` iff, trimmed and lowercased, it equals one of `valid`.
pub fn resolve<S: AsRef<str>>(raw: &str, valid: &[S]) -> Result<String, Rejection> {
    let normalized = raw.trim().to_lowercase();
    if valid.iter().any(|v| v.as_ref() == normalized) {
        Ok(normalized)
    } else {
        Err(Rejection {
            input: raw.to_string(),
            valid: valid.iter().map(|v| v.as_ref().to_string()).collect(),
        })
    }
}

pub fn month_options() -> Vec<&'static str> {
    Month::FILTERABLE
        .iter()
        .map(|m| m.as_str())
        .chain(std::iter::once(ALL))
        .collect()
}

pub fn day_options() -> Vec<&'static str> {
    Weekday::ALL
        .iter()
        .map(|d| d.as_str())
        .chain(std::iter::once(ALL))
        .collect()
}

pub fn resolve_city(raw: &str, cities: &CityConfig) -> Result<String, Rejection> {
    let names: Vec<&str> = cities.names().collect();
    resolve(raw, &names)
}

pub fn resolve_month(raw: &str) -> Result<Period<Month>, Rejection> {
    let name = resolve(raw, &month_options())?;
    Ok(Month::FILTERABLE
        .into_iter()
        .find(|m| m.as_str() == name)
        .map_or(Period::All, Period::Only))
}

pub fn resolve_day(raw: &str) -> Result<Period<Weekday>, Rejection> {
    let name = resolve(raw, &day_options())?;
    Ok(Weekday::ALL
        .into_iter()
        .find(|d| d.as_str() == name)
        .map_or(Period::All, Period::Only))
}
