//! Output formatting for reports and raw trip rows.
//!
//! Supports the plain-text console report, JSON serialization, and raw row dumps.

use anyhow::Result;
use std::fmt::{self, Display};
use tracing::debug;

use crate::analyzers::{Report, Timed};
use crate::trip::Trip;

pub const RULE: &str = "----------------------------------------";
pub const NO_DATA: &str = "No data available for this selection.";

/// Renders a report as the console text shown after each selection.
pub fn render_report(report: &Report) -> String {
    ReportText(report).to_string()
}

struct ReportText<'a>(&'a Report);

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let empty = report.is_empty();

        section(f, "The Most Frequent Times of Travel", &report.time, empty, |f, s| {
            line(f, "Most Common Month", opt(&s.most_common_month))?;
            line(f, "Most Common Day of Week", opt(&s.most_common_day))?;
            line(f, "Most Common Start Hour", opt(&s.most_common_hour))
        })?;

        section(f, "The Most Popular Stations and Trip", &report.stations, empty, |f, s| {
            line(f, "Most Commonly Used Start Station", opt(&s.most_common_start))?;
            line(f, "Most Commonly Used End Station", opt(&s.most_common_end))?;
            line(f, "Most Common Trip", opt(&s.most_common_trip))
        })?;

        section(f, "Trip Duration", &report.durations, empty, |f, s| {
            line(f, "Total Travel Time", format!("{} seconds", s.total_seconds))?;
            let mean = s
                .mean_seconds
                .map_or_else(|| "n/a".to_string(), |m| format!("{m:.2} seconds"));
            line(f, "Mean Travel Time", mean)
        })?;

        section(f, "User Stats", &report.users, empty, |f, s| {
            counts(f, "User Types", &s.user_types)?;

            if let Some(genders) = &s.genders {
                writeln!(f)?;
                counts(f, "Gender Distribution", genders)?;
            }

            if let Some(years) = &s.birth_years {
                writeln!(f)?;
                line(f, "Earliest Year of Birth", opt(&years.earliest))?;
                line(f, "Most Recent Year of Birth", opt(&years.most_recent))?;
                line(f, "Most Common Year of Birth", opt(&years.most_common))?;
            }
            Ok(())
        })
    }
}

fn section<T>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    timed: &Timed<T>,
    empty: bool,
    body: impl FnOnce(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    writeln!(f, "\nCalculating {title}...\n")?;
    if empty {
        writeln!(f, "{NO_DATA}")?;
    } else {
        body(f, &timed.stats)?;
    }
    writeln!(f, "\nThis took {} seconds.", timed.elapsed_secs)?;
    writeln!(f, "{RULE}")
}

fn line(f: &mut fmt::Formatter<'_>, label: &str, value: impl Display) -> fmt::Result {
    writeln!(f, "{label}: {value}")
}

fn counts(f: &mut fmt::Formatter<'_>, label: &str, counts: &[(String, usize)]) -> fmt::Result {
    writeln!(f, "{label}:")?;
    if counts.is_empty() {
        writeln!(f, "  n/a")?;
    }
    for (value, n) in counts {
        writeln!(f, "  {value}: {n}")?;
    }
    Ok(())
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "n/a".to_string(), T::to_string)
}

/// Serializes a report as pretty-printed JSON.
pub fn report_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Renders a batch of raw trips, one pretty-printed JSON object each.
pub fn render_raw_rows(trips: &[Trip]) -> Result<String> {
    debug!(rows = trips.len(), "Rendering raw rows");
    let mut out = String::new();
    for trip in trips {
        out.push_str(&serde_json::to_string_pretty(trip)?);
        out.push('\n');
    }
    Ok(out)
}
