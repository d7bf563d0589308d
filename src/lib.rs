//! Descriptive statistics over US bikeshare trip logs.
//!
//! A city's CSV log is loaded into a [`trip::TripSet`], narrowed by a
//! month/day [`filters::Selection`], and summarized by the aggregators in
//! [`analyzers`].

pub mod analyzers;
pub mod config;
pub mod filters;
pub mod loader;
pub mod output;
pub mod prompt;
pub mod session;
pub mod trip;
