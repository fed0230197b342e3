//! Fixed-size slices of a table for raw row inspection.

use crate::table::{TripRecord, TripTable};

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Rows `[offset, offset + size)`, clipped to the table. Empty once `offset`
/// reaches the end.
pub fn page(table: &TripTable, offset: usize, size: usize) -> &[TripRecord] {
    let records = table.records();
    let start = offset.min(records.len());
    let end = offset.saturating_add(size).min(records.len());
    &records[start..end]
}

/// Successive pages starting at `offset`, until the table is exhausted.
pub fn pages(table: &TripTable, offset: usize, size: usize) -> impl Iterator<Item = &[TripRecord]> {
    let size = size.max(1);
    (offset..table.len())
        .step_by(size)
        .map(move |start| page(table, start, size))
}
