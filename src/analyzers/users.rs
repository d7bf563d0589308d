use serde::Serialize;

use crate::analyzers::utility::{mode, value_counts};
use crate::trip::TripSet;

/// Earliest, most recent and most common year of birth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub most_recent: Option<i32>,
    pub most_common: Option<i32>,
}

/// User type breakdown, plus demographics when the city log carries them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    /// `None` when the log has no `Gender` column.
    pub genders: Option<Vec<(String, usize)>>,
    /// `None` when the log has no `Birth Year` column.
    pub birth_years: Option<BirthYearStats>,
}

#[tracing::instrument(skip_all, fields(trips = trips.len()))]
pub fn user_stats(trips: &TripSet) -> UserStats {
    let user_types = counts(trips.iter().filter_map(|t| t.user_type.as_deref()));

    let genders = trips
        .capabilities
        .gender
        .then(|| counts(trips.iter().filter_map(|t| t.gender.as_deref())));

    let birth_years = trips.capabilities.birth_year.then(|| {
        let years: Vec<i32> = trips
            .iter()
            .filter_map(|t| t.birth_year)
            .map(|y| y as i32)
            .collect();

        BirthYearStats {
            earliest: years.iter().min().copied(),
            most_recent: years.iter().max().copied(),
            most_common: mode(years.iter().copied()),
        }
    });

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

fn counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    value_counts(values)
        .into_iter()
        .map(|(v, n)| (v.to_string(), n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::{Capabilities, Trip, parse_timestamp};

    fn rider(user_type: &str, gender: Option<&str>, birth_year: Option<f64>) -> Trip {
        Trip::new(parse_timestamp("2017-01-02 09:00:00").unwrap(), "A", "B", 60.0)
            .with_user_type(user_type)
            .with_demographics(gender, birth_year)
    }

    #[test]
    fn test_user_stats_with_demographics() {
        let set = TripSet::new(
            vec![
                rider("Subscriber", Some("Male"), Some(1985.0)),
                rider("Subscriber", Some("Female"), Some(1990.0)),
                rider("Customer", None, None),
                rider("Subscriber", Some("Male"), Some(1985.0)),
                rider("Subscriber", Some("Female"), Some(1962.0)),
            ],
            Capabilities {
                gender: true,
                birth_year: true,
            },
        );

        let stats = user_stats(&set);
        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 4), ("Customer".to_string(), 1)]
        );
        assert_eq!(
            stats.genders,
            Some(vec![("Female".to_string(), 2), ("Male".to_string(), 2)])
        );
        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: Some(1962),
                most_recent: Some(1990),
                most_common: Some(1985),
            })
        );
    }

    #[test]
    fn test_user_stats_without_demographic_columns() {
        let set = TripSet::new(
            vec![rider("Subscriber", None, None), rider("Customer", None, None)],
            Capabilities::default(),
        );

        let stats = user_stats(&set);
        assert_eq!(stats.user_types.len(), 2);
        assert_eq!(stats.genders, None);
        assert_eq!(stats.birth_years, None);
    }

    #[test]
    fn test_user_stats_empty_set_keeps_sections() {
        let set = TripSet::new(
            vec![],
            Capabilities {
                gender: true,
                birth_year: true,
            },
        );

        let stats = user_stats(&set);
        assert!(stats.user_types.is_empty());
        assert_eq!(stats.genders, Some(vec![]));
        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: None,
                most_recent: None,
                most_common: None,
            })
        );
    }
}
