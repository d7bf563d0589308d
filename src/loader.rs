//! Loading a city's trip log from disk and narrowing it to a selection.

use anyhow::{Context, Result, anyhow, bail};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::config::CityConfig;
use crate::filters::Selection;
use crate::trip::{Capabilities, REQUIRED_COLUMNS, RawTrip, Trip, TripSet};

/// Loads the selected city's trips and keeps those matching the month/day selection.
#[tracing::instrument(skip_all, fields(city = %selection.city, month = %selection.month, day = %selection.day))]
pub fn load_data(config: &CityConfig, selection: &Selection) -> Result<TripSet> {
    let path = config
        .path_for(&selection.city)
        .ok_or_else(|| anyhow!("no data file configured for city {:?}", selection.city))?;

    let all = load_trips(path)?;
    let total = all.len();
    let filtered = all.filter(selection);

    info!(total, kept = filtered.len(), "Trips filtered");
    Ok(filtered)
}

/// Reads every trip from a CSV file, decompressing it first if the name ends in `.gz`.
pub fn load_trips(path: &Path) -> Result<TripSet> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let gzipped = path.extension().and_then(|e| e.to_str()) == Some("gz");
    debug!(path = %path.display(), gzipped, "Reading trip log");

    let reader: Box<dyn Read> = if gzipped {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    read_trips(reader).with_context(|| format!("loading {}", path.display()))
}

/// Reads trips from any CSV source.
///
/// # Errors
///
/// Fails if a required column is missing, a row does not deserialize, or a
/// start timestamp cannot be parsed. Nothing is returned for a partially read source.
pub fn read_trips<R: Read>(reader: R) -> Result<TripSet> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("missing required columns: {}", missing.join(", "));
    }

    let capabilities = Capabilities::from_headers(&headers);
    debug!(
        gender = capabilities.gender,
        birth_year = capabilities.birth_year,
        "Schema capabilities"
    );

    let mut trips = Vec::new();
    for (i, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let row = i + 1;
        let raw = result.with_context(|| format!("row {row}"))?;
        trips.push(Trip::from_raw(raw).with_context(|| format!("row {row}"))?);
    }

    Ok(TripSet::new(trips, capabilities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Month, Period, Weekday};
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-03-03 08:00:00,2017-03-03 08:05:00,300,Clark St,State St,Subscriber,Male,1985.0
2,2017-03-04 09:00:00,2017-03-04 09:05:00,200,Clark St,Lake St,Customer,,
3,2017-04-07 10:00:00,2017-04-07 10:05:00,100,State St,Clark St,Subscriber,Female,1990.0
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    #[test]
    fn test_read_trips_with_demographics() {
        let set = read_trips(CHICAGO.as_bytes()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.capabilities.gender);
        assert!(set.capabilities.birth_year);
        assert_eq!(set.trips[0].birth_year, Some(1985.0));
        assert_eq!(set.trips[1].gender, None);
        assert_eq!(set.trips[1].birth_year, None);
    }

    #[test]
    fn test_read_trips_without_demographics() {
        let set = read_trips(WASHINGTON.as_bytes()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.capabilities, Capabilities::default());
        assert_eq!(set.trips[0].trip_duration, 489.066);
        assert_eq!(set.trips[0].month, Month::June);
    }

    #[test]
    fn test_read_trips_reports_missing_columns() {
        let csv = "Start Time,Trip Duration\n2017-01-01 00:00:00,10\n";
        let err = read_trips(csv.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Start Station"));
        assert!(msg.contains("End Station"));
        assert!(msg.contains("User Type"));
    }

    #[test]
    fn test_read_trips_rejects_bad_timestamp() {
        let csv = "Start Time,Trip Duration,Start Station,End Station,User Type\n\
                   yesterday,10,A,B,Subscriber\n";
        let err = read_trips(csv.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "row 1");
    }

    #[test]
    fn test_read_trips_keeps_row_with_bad_end_time() {
        let csv = "Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
                   2017-02-01 07:00:00,garbled,10,A,B,Subscriber\n";
        let set = read_trips(csv.as_bytes()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.trips[0].end_time, None);
    }

    #[test]
    fn test_load_trips_missing_file() {
        assert!(load_trips(Path::new("/definitely/not/here.csv")).is_err());
    }

    #[test]
    fn test_load_trips_gzip_matches_plain() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("chicago.csv");
        let gz = dir.path().join("chicago.csv.gz");
        std::fs::write(&plain, CHICAGO).unwrap();

        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(CHICAGO.as_bytes()).unwrap();
        encoder.finish().unwrap();

        assert_eq!(load_trips(&plain).unwrap(), load_trips(&gz).unwrap());
    }

    #[test]
    fn test_load_data_filters_by_month() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
        let config = CityConfig::with_data_dir(dir.path());

        let selection = Selection {
            city: "chicago".into(),
            month: Period::Only(Month::March),
            day: Period::All,
        };
        let set = load_data(&config, &selection).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|t| t.month == Month::March));

        let selection = Selection {
            day: Period::Only(Weekday::Sunday),
            ..selection
        };
        assert!(load_data(&config, &selection).unwrap().is_empty());
    }

    #[test]
    fn test_load_data_unknown_city() {
        let config = CityConfig::with_data_dir("data");
        let selection = Selection {
            city: "boston".into(),
            month: Period::All,
            day: Period::All,
        };
        assert!(load_data(&config, &selection).is_err());
    }
}
