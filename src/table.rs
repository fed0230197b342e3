//! In-memory trip table.

use chrono::{NaiveDateTime, Timelike, Weekday};
use serde::{Serialize, Serializer};

use crate::selection::weekday_name;

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One rental, with month and weekday derived from the start time at load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(serialize_with = "serialize_opt_timestamp")]
    pub end_time: Option<NaiveDateTime>,
    pub duration_seconds: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
    pub month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
}

impl TripRecord {
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

/// Optional columns present in a city's source.
///
/// This is a property of the dataset, checked once when it is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub user_type: bool,
    pub gender: bool,
    pub birth_year: bool,
}

impl Capabilities {
    pub fn has_demographics(&self) -> bool {
        self.gender && self.birth_year
    }
}

/// An ordered set of trips sharing one schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripTable {
    records: Vec<TripRecord>,
    capabilities: Capabilities,
}

impl TripTable {
    pub fn new(records: Vec<TripRecord>, capabilities: Capabilities) -> Self {
        Self {
            records,
            capabilities,
        }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a TripTable {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

fn serialize_opt_timestamp<S: Serializer>(
    ts: &Option<NaiveDateTime>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => s.collect_str(&ts.format(TIMESTAMP_FORMAT)),
        None => s.serialize_none(),
    }
}

fn serialize_weekday<S: Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*day))
}
