//! Query selection: which city to load and which time window to keep.

use chrono::Weekday;
use serde::{Serialize, Serializer};
use std::fmt;

/// Cities with a published trip log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    /// Identifier used on the command line and in source configuration files.
    pub fn id(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYork => "new-york",
            City::Washington => "washington",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        }
    }

    /// File name of the city's trip log inside the data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    pub fn from_id(id: &str) -> Option<City> {
        City::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Months covered by the trip logs. The published data spans January to June.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based calendar month number.
    pub fn number(self) -> u32 {
        match self {
            Month::January => 1,
            Month::February => 2,
            Month::March => 3,
            Month::April => 4,
            Month::May => 5,
            Month::June => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
        }
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English weekday name, e.g. `Monday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a month filter: `all` or a full month name (case-insensitive).
pub fn parse_month_filter(s: &str) -> Result<Option<Month>, String> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    Month::ALL
        .into_iter()
        .find(|m| m.name().eq_ignore_ascii_case(s))
        .map(Some)
        .ok_or_else(|| format!("{s} is not a supported month (January to June, or all)"))
}

/// Parses a weekday filter: `all` or a full weekday name (case-insensitive).
pub fn parse_day_filter(s: &str) -> Result<Option<Weekday>, String> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    WEEKDAYS
        .into_iter()
        .find(|d| weekday_name(*d).eq_ignore_ascii_case(s))
        .map(Some)
        .ok_or_else(|| format!("{s} is not a weekday name (Monday to Sunday, or all)"))
}

/// A validated query. `None` stands for "all" on either time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub city: City,
    pub month: Option<Month>,
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Option<Weekday>,
}

impl Selection {
    pub fn new(city: City, month: Option<Month>, weekday: Option<Weekday>) -> Self {
        Self {
            city,
            month,
            weekday,
        }
    }

    pub fn month_label(&self) -> &'static str {
        self.month.map(Month::name).unwrap_or("All")
    }

    pub fn weekday_label(&self) -> &'static str {
        self.weekday.map(weekday_name).unwrap_or("All")
    }
}

pub(crate) fn serialize_weekday<S: Serializer>(
    day: &Option<Weekday>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match day {
        Some(d) => serializer.serialize_some(weekday_name(*d)),
        None => serializer.serialize_none(),
    }
}
