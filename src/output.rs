//! Presentation of reports and raw rows.
//!
//! Supports a human-readable text report, JSON serialization, and CSV output
//! of raw trip rows.

use anyhow::Result;
use csv::WriterBuilder;
use std::io::Write;

use crate::stats::{
    DurationStats, Report, StatResult, StationStats, TemporalStats, UserStats, ValueCount,
};
use crate::table::TripRecord;

const RULE_WIDTH: usize = 60;

/// Writes a report as pretty-printed JSON.
pub fn write_json<W: Write>(mut out: W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes trip rows as CSV, with a header line when `with_header` is set.
pub fn write_rows<W: Write>(out: W, rows: &[TripRecord], with_header: bool) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(with_header)
        .from_writer(out);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Renders a seconds count the way a timedelta prints: `[D day[s], ]H:MM:SS[.ffffff]`.
pub fn format_duration(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let micros_total = (seconds.abs() * 1_000_000.0).round() as u64;

    let micros = micros_total % 1_000_000;
    let secs_total = micros_total / 1_000_000;
    let days = secs_total / 86_400;
    let h = (secs_total % 86_400) / 3_600;
    let m = (secs_total % 3_600) / 60;
    let s = secs_total % 60;

    let mut text = String::from(sign);
    if days > 0 {
        let unit = if days == 1 { "day" } else { "days" };
        text.push_str(&format!("{days} {unit}, "));
    }
    text.push_str(&format!("{h}:{m:02}:{s:02}"));
    if micros > 0 {
        text.push_str(&format!(".{micros:06}"));
    }
    text
}

/// Writes the full human-readable report.
pub fn write_text<W: Write>(mut out: W, report: &Report) -> Result<()> {
    let sel = &report.selection;
    writeln!(
        out,
        "City: {} | Month: {} | Day: {} | Trips: {}",
        sel.city.title(),
        sel.month_label(),
        sel.weekday_label(),
        report.row_count
    )?;
    rule(&mut out)?;

    if report.is_empty() {
        writeln!(out, "\nNo trips match this selection.")?;
    }

    for result in &report.results {
        match result {
            StatResult::Temporal(stats) => write_temporal(&mut out, stats.as_ref())?,
            StatResult::Station(stats) => write_station(&mut out, stats.as_ref())?,
            StatResult::Duration(stats) => write_duration(&mut out, stats)?,
            StatResult::User(stats) => write_user(&mut out, stats)?,
        }
        rule(&mut out)?;
    }
    Ok(())
}

fn rule<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    Ok(())
}

fn write_temporal<W: Write>(out: &mut W, stats: Option<&TemporalStats>) -> Result<()> {
    writeln!(out, "\nThe Most Frequent Times of Travel\n")?;
    let Some(s) = stats else {
        writeln!(out, "No data.")?;
        return Ok(());
    };
    writeln!(out, "The most popular month is: {}", s.popular_month.value)?;
    writeln!(out, "The most popular weekday is on a: {}", s.popular_weekday.value)?;
    writeln!(out, "The most popular hour is at: {} o'clock", s.popular_hour.value)?;
    Ok(())
}

fn write_station<W: Write>(out: &mut W, stats: Option<&StationStats>) -> Result<()> {
    writeln!(out, "\nThe Most Popular Stations and Trip\n")?;
    let Some(s) = stats else {
        writeln!(out, "No data.")?;
        return Ok(());
    };
    writeln!(out, "The most common start station is: {}", s.popular_start.value)?;
    writeln!(out, "The most common end station is: {}", s.popular_end.value)?;
    writeln!(
        out,
        "The most frequent trip is: {} ({} trips)",
        s.popular_pair.value, s.popular_pair.count
    )?;
    Ok(())
}

fn write_duration<W: Write>(out: &mut W, stats: &DurationStats) -> Result<()> {
    writeln!(out, "\nTrip Duration\n")?;
    writeln!(
        out,
        "Total travel time: {}",
        format_duration(stats.total_seconds)
    )?;
    match stats.mean_seconds {
        Some(mean) => writeln!(out, "The mean travel time is: {}", format_duration(mean))?,
        None => writeln!(out, "The mean travel time is: no data")?,
    }
    Ok(())
}

fn write_user<W: Write>(out: &mut W, stats: &UserStats) -> Result<()> {
    writeln!(out, "\nUser Stats\n")?;
    writeln!(out, "The user types are:")?;
    write_counts(out, &stats.type_counts)?;

    let (Some(genders), Some(years)) = (&stats.gender_counts, &stats.birth_years) else {
        writeln!(
            out,
            "\nThis dataset does not have Gender and Birth Year information."
        )?;
        return Ok(());
    };

    writeln!(out, "\nThe genders are:")?;
    write_counts(out, genders)?;

    let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_else(|| "n/a".into());
    writeln!(out, "\nThe earliest birth year is: {}", year(years.earliest))?;
    writeln!(out, "The most recent birth year is: {}", year(years.most_recent))?;
    writeln!(out, "The most common birth year is: {}", year(years.most_common))?;
    Ok(())
}

fn write_counts<W: Write>(out: &mut W, counts: &[ValueCount<String>]) -> Result<()> {
    if counts.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for c in counts {
        writeln!(out, "  {:<12} {}", c.value, c.count)?;
    }
    Ok(())
}
