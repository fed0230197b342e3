//! Error taxonomy for loading and querying trip data.
//!
//! Only two conditions are fatal for a query: the backing source could not be
//! read, or its contents do not match the trip schema. An empty time window and
//! a city without demographic columns are normal outcomes, not errors.

use crate::selection::City;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// The source for a city is missing or unreadable.
    #[error("Data source for {city} unavailable: {reason}")]
    DataSource { city: City, reason: String },

    /// A required column is missing or a value in it cannot be parsed.
    #[error("Schema error: {0}")]
    Schema(String),
}

impl StatsError {
    pub fn data_source(city: City, reason: impl ToString) -> Self {
        StatsError::DataSource {
            city,
            reason: reason.to_string(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        StatsError::Schema(message.into())
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
