//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides subcommands for reporting trip statistics for a city and time
//! window, paging through the raw filtered trips, and listing known cities.

use anyhow::Result;
use bikeshare_stats::{
    config::SourceConfig,
    output::{write_json, write_rows, write_text},
    pager::{DEFAULT_PAGE_SIZE, pages},
    selection::{City, Month, Selection, parse_day_filter, parse_month_filter},
    source::FileResolver,
    stats::Report,
    store::load_selection,
};
use chrono::Weekday;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Descriptive statistics over bikeshare trip logs", long_about = None)]
struct Cli {
    /// Directory holding the city trip logs
    #[arg(long, global = true, env = "BIKESHARE_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Optional JSON file mapping city ids to explicit source paths
    #[arg(long, global = true, env = "BIKESHARE_SOURCES")]
    sources: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report popular times, stations, trip durations and rider stats
    Report {
        #[command(flatten)]
        query: QueryArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print raw filtered trips as CSV, a page at a time
    Rows {
        #[command(flatten)]
        query: QueryArgs,

        /// Row to start from
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Rows per page
        #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: usize,

        /// Number of successive pages to print
        #[arg(short = 'n', long, default_value_t = 1)]
        pages: usize,
    },
    /// List supported cities and where their data is read from
    Cities,
}

#[derive(Args)]
struct QueryArgs {
    /// City to analyze
    #[arg(short, long, value_enum)]
    city: City,

    /// Month to keep (January to June), or "all"
    #[arg(short, long, default_value = "all", value_parser = parse_month_arg)]
    month: MonthArg,

    /// Weekday to keep (Monday to Sunday), or "all"
    #[arg(short, long, default_value = "all", value_parser = parse_day_arg)]
    day: DayArg,
}

impl QueryArgs {
    fn selection(&self) -> Selection {
        Selection::new(self.city, self.month.0, self.day.0)
    }
}

#[derive(Clone)]
struct MonthArg(Option<Month>);

#[derive(Clone)]
struct DayArg(Option<Weekday>);

fn parse_month_arg(s: &str) -> Result<MonthArg, String> {
    parse_month_filter(s).map(MonthArg)
}

fn parse_day_arg(s: &str) -> Result<DayArg, String> {
    parse_day_filter(s).map(DayArg)
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = SourceConfig::new(&cli.data_dir);
    if let Some(path) = &cli.sources {
        config = config.with_overrides_file(path)?;
    }
    let resolver = FileResolver::new(config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Report { query, format } => {
            let selection = query.selection();
            let table = load_selection(&resolver, &selection)?;
            let report = Report::compute(selection, &table);

            match format {
                OutputFormat::Text => write_text(&mut out, &report)?,
                OutputFormat::Json => write_json(&mut out, &report)?,
            }
        }
        Commands::Rows {
            query,
            offset,
            size,
            pages: page_count,
        } => {
            let table = load_selection(&resolver, &query.selection())?;
            if offset >= table.len() {
                warn!(offset, rows = table.len(), "Offset is past the last row");
            }

            for (i, rows) in pages(&table, offset, size).take(page_count).enumerate() {
                write_rows(&mut out, rows, i == 0)?;
            }
        }
        Commands::Cities => {
            for city in City::ALL {
                match resolver.locate(city) {
                    Some(path) => writeln!(out, "{}\t{}", city.id(), path.display())?,
                    None => writeln!(
                        out,
                        "{}\t{} (missing)",
                        city.id(),
                        resolver.config().path_for(city).display()
                    )?,
                }
            }
        }
    }

    out.flush()?;
    info!("Done");
    Ok(())
}
