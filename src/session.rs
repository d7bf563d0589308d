//! The interactive explore loop: filters, load, report, raw rows, restart.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::info;

use crate::analyzers::build_report;
use crate::config::CityConfig;
use crate::loader::load_data;
use crate::output::{render_raw_rows, render_report};
use crate::prompt::Prompter;
use crate::trip::Trip;

/// Rows shown per raw-data request.
pub const RAW_PAGE_SIZE: usize = 5;

/// Runs sessions until the user declines to restart.
pub fn run<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, config: &CityConfig) -> Result<()> {
    let mut round = 0;
    loop {
        round += 1;
        let selection = prompter.get_filters(config)?;
        info!(round, city = %selection.city, month = %selection.month, day = %selection.day, "Selection made");

        let trips = load_data(config, &selection)?;
        let report = build_report(&selection, &trips);
        prompter.say(&render_report(&report))?;

        display_raw_data(prompter, &trips.trips)?;

        if !prompter.confirm("\nWould you like to restart? Enter yes or no: ")? {
            break;
        }
    }
    Ok(())
}

/// Pages through `trips` five rows at a time for as long as the user answers `yes`.
pub fn display_raw_data<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    trips: &[Trip],
) -> Result<()> {
    let mut pages = trips.chunks(RAW_PAGE_SIZE);
    let mut question = "Would you like to see 5 lines of raw data? Enter yes or no: ";

    while prompter.confirm(question)? {
        match pages.next() {
            Some(page) => prompter.say(&render_raw_rows(page)?)?,
            None => {
                prompter.say("No more raw data to display.")?;
                break;
            }
        }
        question = "Would you like to see 5 more lines of raw data? Enter yes or no: ";
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::parse_timestamp;
    use std::io::Cursor;

    fn trips(n: usize) -> Vec<Trip> {
        let start = parse_timestamp("2017-01-02 09:00:00").unwrap();
        (0..n)
            .map(|i| Trip::new(start, format!("Station {i}"), "End", 10.0))
            .collect()
    }

    fn show(input: &str, trips: &[Trip]) -> String {
        let mut out = Vec::new();
        {
            let mut p = Prompter::new(Cursor::new(input.as_bytes().to_vec()), &mut out);
            display_raw_data(&mut p, trips).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_display_raw_data_pages_in_fives() {
        let shown = show("yes\nyes\nno\n", &trips(12));

        assert!(shown.contains("\"Station 0\""));
        assert!(shown.contains("\"Station 9\""));
        assert!(!shown.contains("\"Station 10\""));
        assert!(shown.contains("5 more lines"));
    }

    #[test]
    fn test_display_raw_data_stops_when_exhausted() {
        let shown = show("yes\nyes\nyes\nyes\n", &trips(7));

        assert!(shown.contains("\"Station 6\""));
        assert!(shown.contains("No more raw data to display."));
    }

    #[test]
    fn test_display_raw_data_declined() {
        let shown = show("no\n", &trips(3));
        assert!(!shown.contains("Station 0"));
    }
}
