//! Time window filter.

use chrono::Weekday;
use tracing::{debug, warn};

use crate::selection::{Month, weekday_name};
use crate::table::{TripRecord, TripTable};

/// Returns `true` when `record` falls inside the window. `None` matches all.
pub fn matches(record: &TripRecord, month: Option<Month>, weekday: Option<Weekday>) -> bool {
    month.is_none_or(|m| record.month == m.number())
        && weekday.is_none_or(|d| record.weekday == d)
}

/// Restricts `table` to rows whose month and weekday match the window.
///
/// Row order and schema capabilities are preserved. An empty result is not an
/// error; it is logged and returned as an empty table.
#[tracing::instrument(
    skip_all,
    fields(
        rows_in = table.len(),
        month = month.map(Month::name).unwrap_or("all"),
        weekday = weekday.map(weekday_name).unwrap_or("all"),
    )
)]
pub fn filter(table: &TripTable, month: Option<Month>, weekday: Option<Weekday>) -> TripTable {
    let records: Vec<TripRecord> = table
        .iter()
        .filter(|r| matches(r, month, weekday))
        .cloned()
        .collect();

    if records.is_empty() {
        warn!("No trips match the selected time window");
    } else {
        debug!(rows_out = records.len(), "Time window applied");
    }

    TripTable::new(records, table.capabilities())
}
