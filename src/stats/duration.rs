//! Total and mean trip duration.

use serde::Serialize;

use crate::table::TripTable;

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    /// `None` when there are no trips.
    pub mean_seconds: Option<f64>,
}

#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn duration_stats(table: &TripTable) -> DurationStats {
    let trip_count = table.len();
    let total_seconds: f64 = table.iter().map(|r| r.duration_seconds).sum();
    let mean_seconds = (trip_count > 0).then(|| total_seconds / trip_count as f64);

    DurationStats {
        trip_count,
        total_seconds,
        mean_seconds,
    }
}
