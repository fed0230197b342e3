use bikeshare_stats::config::SourceConfig;
use bikeshare_stats::error::StatsError;
use bikeshare_stats::pager::{DEFAULT_PAGE_SIZE, page, pages};
use bikeshare_stats::selection::{City, Month, Selection};
use bikeshare_stats::source::FileResolver;
use bikeshare_stats::stats::{
    BirthYearStats, Report, StatResult, StationPair, duration_stats, station_stats,
    temporal_stats, user_stats,
};
use bikeshare_stats::store::{load, load_selection};
use chrono::Weekday;

fn fixtures() -> FileResolver {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
    FileResolver::new(SourceConfig::new(dir))
}

#[test]
fn test_full_pipeline() {
    let selection = Selection::new(City::Chicago, None, None);
    let table = load_selection(&fixtures(), &selection).expect("Failed to load fixture");
    assert_eq!(table.len(), 8);

    let temporal = temporal_stats(&table).unwrap();
    assert_eq!(temporal.popular_month.value, 1);
    assert_eq!(temporal.popular_weekday.value, "Monday");
    assert_eq!(temporal.popular_hour.value, 8);

    let stations = station_stats(&table).unwrap();
    assert_eq!(stations.popular_start.value, "Canal St");
    assert_eq!(stations.popular_end.value, "Clark St");
    assert_eq!(stations.popular_pair.count, 3);

    let durations = duration_stats(&table);
    assert_eq!(durations.total_seconds, 5520.0);
    assert_eq!(durations.mean_seconds, Some(690.0));

    let users = user_stats(&table);
    let types: Vec<(&str, usize)> = users
        .type_counts
        .iter()
        .map(|c| (c.value.as_str(), c.count))
        .collect();
    assert_eq!(
        types,
        vec![("Subscriber", 5), ("Customer", 2), ("Dependent", 1)]
    );
    let genders = users.gender_counts.unwrap();
    assert_eq!(genders[0].value, "Male");
    assert_eq!(genders[0].count, 4);
    assert_eq!(genders[1].count, 3);
    assert_eq!(
        users.birth_years,
        Some(BirthYearStats {
            earliest: Some(1975),
            most_recent: Some(1999),
            most_common: Some(1990),
        })
    );
}

#[test]
fn test_month_and_weekday_window() {
    let selection = Selection::new(City::Chicago, Some(Month::January), Some(Weekday::Mon));
    let table = load_selection(&fixtures(), &selection).unwrap();

    assert_eq!(table.len(), 3);
    assert!(
        table
            .iter()
            .all(|r| r.month == 1 && r.weekday == Weekday::Mon)
    );

    let durations = duration_stats(&table);
    assert_eq!(durations.total_seconds, 1260.0);
    assert_eq!(durations.mean_seconds, Some(420.0));
    assert_eq!(station_stats(&table).unwrap().popular_pair.count, 2);
}

#[test]
fn test_empty_window_reports_no_data() {
    let selection = Selection::new(City::Chicago, Some(Month::March), Some(Weekday::Tue));
    let table = load_selection(&fixtures(), &selection).unwrap();
    assert!(table.is_empty());

    let report = Report::compute(selection, &table);
    assert_eq!(report.row_count, 0);
    assert_eq!(report.results[0], StatResult::Temporal(None));
    assert_eq!(report.results[1], StatResult::Station(None));
    match &report.results[2] {
        StatResult::Duration(d) => {
            assert_eq!(d.total_seconds, 0.0);
            assert_eq!(d.mean_seconds, None);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_january_scenario_without_demographics() {
    let selection = Selection::new(City::Washington, Some(Month::January), None);
    let table = load_selection(&fixtures(), &selection).unwrap();
    assert_eq!(table.len(), 2);

    let stations = station_stats(&table).unwrap();
    assert_eq!(
        stations.popular_pair.value,
        StationPair {
            start: "A".to_string(),
            end: "B".to_string()
        }
    );
    assert_eq!(stations.popular_pair.count, 1);

    let durations = duration_stats(&table);
    assert_eq!(durations.total_seconds, 300.0);
    assert_eq!(durations.mean_seconds, Some(150.0));

    let users = user_stats(&table);
    assert_eq!(users.gender_counts, None);
    assert_eq!(users.birth_years, None);
}

#[test]
fn test_missing_city_source() {
    let err = load(&fixtures(), City::NewYork).unwrap_err();
    assert!(matches!(
        err,
        StatsError::DataSource {
            city: City::NewYork,
            ..
        }
    ));
}

#[test]
fn test_paging_through_filtered_rows() {
    let table = load(&fixtures(), City::Chicago).unwrap();

    assert_eq!(page(&table, 0, DEFAULT_PAGE_SIZE).len(), 5);
    assert_eq!(page(&table, 5, DEFAULT_PAGE_SIZE).len(), 3);
    assert!(page(&table, 8, DEFAULT_PAGE_SIZE).is_empty());

    let stations: Vec<&str> = pages(&table, 0, DEFAULT_PAGE_SIZE)
        .flatten()
        .map(|r| r.start_station.as_str())
        .collect();
    let expected: Vec<&str> = table.iter().map(|r| r.start_station.as_str()).collect();
    assert_eq!(stations, expected);
}
