//! Most popular start station, end station, and trip.

use serde::Serialize;
use std::fmt;

use crate::stats::mode::{ValueCount, mode};
use crate::table::TripTable;

/// A start and end station combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

impl fmt::Display for StationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub popular_start: ValueCount<String>,
    pub popular_end: ValueCount<String>,
    pub popular_pair: ValueCount<StationPair>,
}

/// Returns `None` for an empty table.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn station_stats(table: &TripTable) -> Option<StationStats> {
    let start = mode(table.iter().map(|r| r.start_station.as_str()))?;
    let end = mode(table.iter().map(|r| r.end_station.as_str()))?;
    let pair = mode(
        table
            .iter()
            .map(|r| (r.start_station.as_str(), r.end_station.as_str())),
    )?;

    Some(StationStats {
        popular_start: owned(start),
        popular_end: owned(end),
        popular_pair: ValueCount {
            value: StationPair {
                start: pair.value.0.to_string(),
                end: pair.value.1.to_string(),
            },
            count: pair.count,
        },
    })
}

fn owned(c: ValueCount<&str>) -> ValueCount<String> {
    ValueCount {
        value: c.value.to_string(),
        count: c.count,
    }
}
