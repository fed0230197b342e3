//! Rider breakdown: user types, gender, and birth years.

use serde::Serialize;
use tracing::debug;

use crate::stats::mode::{ValueCount, frequencies, mode};
use crate::table::TripTable;

/// Birth year extremes and mode. Each is `None` when no row has a birth year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub most_recent: Option<i32>,
    pub most_common: Option<i32>,
}

/// Rider breakdown.
///
/// `gender_counts` and `birth_years` are `None` when the city's data does not
/// carry those columns at all. Rows with a blank value are left out of the
/// corresponding aggregate only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub type_counts: Vec<ValueCount<String>>,
    pub gender_counts: Option<Vec<ValueCount<String>>>,
    pub birth_years: Option<BirthYearStats>,
}

#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn user_stats(table: &TripTable) -> UserStats {
    let caps = table.capabilities();

    let type_counts = counts(table.iter().filter_map(|r| r.user_type.as_deref()));

    let gender_counts = if caps.gender {
        Some(counts(table.iter().filter_map(|r| r.gender.as_deref())))
    } else {
        debug!("Gender column absent, skipping gender counts");
        None
    };

    let birth_years = if caps.birth_year {
        Some(birth_year_stats(table))
    } else {
        debug!("Birth Year column absent, skipping birth year stats");
        None
    };

    UserStats {
        type_counts,
        gender_counts,
        birth_years,
    }
}

fn counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<ValueCount<String>> {
    frequencies(values)
        .into_iter()
        .map(|c| ValueCount {
            value: c.value.to_string(),
            count: c.count,
        })
        .collect()
}

fn birth_year_stats(table: &TripTable) -> BirthYearStats {
    let years: Vec<f64> = table
        .iter()
        .filter_map(|r| r.birth_year)
        .filter(|y| y.is_finite())
        .collect();

    let earliest = years.iter().copied().reduce(f64::min).map(|y| y as i32);
    let most_recent = years.iter().copied().reduce(f64::max).map(|y| y as i32);
    // birth years are whole numbers stored as floats in the source
    let most_common = mode(years.iter().map(|y| *y as i32)).map(|c| c.value);

    BirthYearStats {
        earliest,
        most_recent,
        most_common,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::rider;
    use crate::table::Capabilities;

    const ALL_COLUMNS: Capabilities = Capabilities {
        user_type: true,
        gender: true,
        birth_year: true,
    };

    #[test]
    fn test_full_demographics() {
        let table = TripTable::new(
            vec![
                rider(Some("Subscriber"), Some("Male"), Some(1985.0)),
                rider(Some("Customer"), Some("Female"), Some(1990.0)),
                rider(Some("Subscriber"), None, Some(1990.0)),
                rider(Some("Subscriber"), Some("Female"), None),
                rider(None, Some("Male"), Some(1949.0)),
            ],
            ALL_COLUMNS,
        );

        let stats = user_stats(&table);
        assert_eq!(
            stats.type_counts,
            vec![
                ValueCount {
                    value: "Subscriber".to_string(),
                    count: 3
                },
                ValueCount {
                    value: "Customer".to_string(),
                    count: 1
                },
            ]
        );

        let genders = stats.gender_counts.unwrap();
        assert_eq!(genders.len(), 2);
        assert_eq!(genders[0].value, "Male");
        assert_eq!(genders[0].count, 2);
        assert_eq!(genders[1].count, 2);

        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: Some(1949),
                most_recent: Some(1990),
                most_common: Some(1990),
            })
        );
    }

    #[test]
    fn test_non_finite_birth_years_are_skipped() {
        let table = TripTable::new(
            vec![
                rider(None, Some("Male"), Some(f64::NAN)),
                rider(None, Some("Male"), Some(f64::NAN)),
                rider(None, Some("Male"), Some(1990.0)),
            ],
            ALL_COLUMNS,
        );

        let years = user_stats(&table).birth_years.unwrap();
        assert_eq!(years.earliest, Some(1990));
        assert_eq!(years.most_recent, Some(1990));
        assert_eq!(years.most_common, Some(1990));
    }

    #[test]
    fn test_absent_columns_are_marked_absent() {
        let caps = Capabilities {
            user_type: true,
            gender: false,
            birth_year: false,
        };
        let table = TripTable::new(vec![rider(Some("Customer"), None, None)], caps);

        let stats = user_stats(&table);
        assert_eq!(stats.type_counts.len(), 1);
        assert_eq!(stats.gender_counts, None);
        assert_eq!(stats.birth_years, None);
    }

    #[test]
    fn test_present_columns_on_empty_table() {
        let stats = user_stats(&TripTable::new(vec![], ALL_COLUMNS));
        assert!(stats.type_counts.is_empty());
        assert_eq!(stats.gender_counts, Some(vec![]));
        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: None,
                most_recent: None,
                most_common: None,
            })
        );
    }
}
