//! Descriptive statistics over a filtered trip table.
//!
//! Each routine reads the table and returns a small result; none of them
//! mutate it, and they can run in any order. Routines that have nothing to
//! report on an empty table return `None` instead of a made-up value.

pub mod duration;
pub mod mode;
pub mod station;
pub mod temporal;
pub mod user;

pub use duration::{DurationStats, duration_stats};
pub use mode::{ValueCount, frequencies, mode};
pub use station::{StationPair, StationStats, station_stats};
pub use temporal::{TemporalStats, temporal_stats};
pub use user::{BirthYearStats, UserStats, user_stats};

use serde::Serialize;
use tracing::info;

use crate::selection::Selection;
use crate::table::TripTable;

/// Output of a single statistics routine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "stats", rename_all = "snake_case")]
pub enum StatResult {
    Temporal(Option<TemporalStats>),
    Station(Option<StationStats>),
    Duration(DurationStats),
    User(UserStats),
}

/// Every statistic for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub selection: Selection,
    pub row_count: usize,
    pub results: Vec<StatResult>,
}

impl Report {
    /// Runs all routines over an already filtered table.
    #[tracing::instrument(skip(table), fields(rows = table.len()))]
    pub fn compute(selection: Selection, table: &TripTable) -> Self {
        let results = vec![
            StatResult::Temporal(temporal_stats(table)),
            StatResult::Station(station_stats(table)),
            StatResult::Duration(duration_stats(table)),
            StatResult::User(user_stats(table)),
        ];
        info!(rows = table.len(), "Statistics computed");

        Self {
            selection,
            row_count: table.len(),
            results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Datelike, NaiveDateTime};

    use crate::table::{TIMESTAMP_FORMAT, TripRecord};

    pub fn trip_at(ts: &str) -> TripRecord {
        let start_time = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap();
        TripRecord {
            start_time,
            end_time: None,
            duration_seconds: 60.0,
            start_station: "A".to_string(),
            end_station: "B".to_string(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
        }
    }

    pub fn trip(start: &str, end: &str, duration: f64) -> TripRecord {
        TripRecord {
            start_station: start.to_string(),
            end_station: end.to_string(),
            duration_seconds: duration,
            ..trip_at("2017-01-02 09:00:00")
        }
    }

    pub fn rider(
        user_type: Option<&str>,
        gender: Option<&str>,
        birth_year: Option<f64>,
    ) -> TripRecord {
        TripRecord {
            user_type: user_type.map(str::to_string),
            gender: gender.map(str::to_string),
            birth_year,
            ..trip_at("2017-01-02 09:00:00")
        }
    }
}
