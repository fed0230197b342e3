//! Most frequent month, weekday, and start hour.

use serde::Serialize;

use crate::stats::mode::{ValueCount, mode};
use crate::table::TripTable;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalStats {
    /// Calendar month number, 1 to 12.
    pub popular_month: ValueCount<u32>,
    pub popular_weekday: ValueCount<&'static str>,
    /// Hour of day of the start time, 0 to 23.
    pub popular_hour: ValueCount<u32>,
}

/// Returns `None` for an empty table.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn temporal_stats(table: &TripTable) -> Option<TemporalStats> {
    Some(TemporalStats {
        popular_month: mode(table.iter().map(|r| r.month))?,
        popular_weekday: mode(table.iter().map(|r| r.weekday_name()))?,
        popular_hour: mode(table.iter().map(|r| r.hour()))?,
    })
}
