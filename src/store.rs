//! Record store: reads a city's trip log into a [`TripTable`].
//!
//! The CSV header is checked once up front. Required columns must all be
//! present; the optional demographic columns are recorded as
//! [`Capabilities`] so the statistics stage never checks for them again.
//! Every start time must parse, since month, weekday, and hour are all
//! derived from it.

use chrono::{Datelike, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::io::Read;
use tracing::{debug, info, warn};

use crate::error::{Result, StatsError};
use crate::filter::filter;
use crate::selection::{City, Selection};
use crate::source::SourceResolver;
use crate::table::{Capabilities, TIMESTAMP_FORMAT, TripRecord, TripTable};

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

const REQUIRED_COLUMNS: [&str; 4] = [START_TIME, TRIP_DURATION, START_STATION, END_STATION];

/// Cell values that mean "missing", on top of an empty cell.
const NULL_TOKENS: [&str; 8] = ["NaN", "nan", "NA", "N/A", "n/a", "null", "NULL", "None"];

const TIMESTAMP_FORMATS: [&str; 3] = [
    TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// A single row as it appears in the source CSV.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

/// Loads the full trip table for `city` through `resolver`.
///
/// # Errors
///
/// [`StatsError::DataSource`] if the source cannot be opened or read, and
/// [`StatsError::Schema`] if a required column is missing or a row fails to
/// parse.
#[tracing::instrument(skip_all, fields(city = %city))]
pub fn load(resolver: &dyn SourceResolver, city: City) -> Result<TripTable> {
    let reader = resolver.open(city)?;
    let table = load_from_reader(reader, city)?;
    info!(
        rows = table.len(),
        demographics = table.capabilities().has_demographics(),
        "Trip data loaded"
    );
    Ok(table)
}

/// Loads the city named in `selection` and applies its time window.
pub fn load_selection(resolver: &dyn SourceResolver, selection: &Selection) -> Result<TripTable> {
    let table = load(resolver, selection.city)?;
    Ok(filter(&table, selection.month, selection.weekday))
}

/// Parses CSV trip data from any reader. `city` is used for error reporting.
pub fn load_from_reader<R: Read>(reader: R, city: City) -> Result<TripTable> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers().map_err(|e| map_csv_error(e, city))?.clone();
    let capabilities = check_schema(&headers)?;
    debug!(?capabilities, columns = headers.len(), "Schema checked");

    let mut records = Vec::new();
    for result in rdr.deserialize::<RawTrip>() {
        let raw = result.map_err(|e| map_csv_error(e, city))?;
        let row = records.len() + 1;
        records.push(into_record(raw, row)?);
    }

    Ok(TripTable::new(records, capabilities))
}

fn check_schema(headers: &StringRecord) -> Result<Capabilities> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !has(*c))
        .collect();
    if !missing.is_empty() {
        return Err(StatsError::schema(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )));
    }

    Ok(Capabilities {
        user_type: has(USER_TYPE),
        gender: has(GENDER),
        birth_year: has(BIRTH_YEAR),
    })
}

fn into_record(raw: RawTrip, row: usize) -> Result<TripRecord> {
    let start_time = parse_timestamp(&raw.start_time).ok_or_else(|| {
        StatsError::schema(format!(
            "row {row}: unparsable {START_TIME} `{}`",
            raw.start_time
        ))
    })?;

    // only the start time is authoritative; a bad end time is dropped
    let end_time = match present(raw.end_time).as_deref() {
        None => None,
        Some(s) => {
            let parsed = parse_timestamp(s);
            if parsed.is_none() {
                warn!(row, value = s, "Unparsable End Time, keeping row without it");
            }
            parsed
        }
    };

    let birth_year = match present(raw.birth_year) {
        None => None,
        Some(s) => {
            let year: f64 = s.parse().map_err(|_| {
                StatsError::schema(format!("row {row}: unparsable {BIRTH_YEAR} `{s}`"))
            })?;
            year.is_finite().then_some(year)
        }
    };

    Ok(TripRecord {
        start_time,
        end_time,
        duration_seconds: raw.trip_duration,
        start_station: raw.start_station,
        end_station: raw.end_station,
        user_type: present(raw.user_type),
        gender: present(raw.gender),
        birth_year,
        month: start_time.month(),
        weekday: start_time.weekday(),
    })
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Drops empty cells and null markers such as `NaN` or `NA`.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && !NULL_TOKENS.contains(&v.as_str()))
}

fn map_csv_error(err: csv::Error, city: City) -> StatsError {
    if err.is_io_error() {
        StatsError::data_source(city, err)
    } else {
        StatsError::schema(err.to_string())
    }
}
