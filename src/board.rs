use log::{info, warn};

use points_board::normalize::normalize_category;
use points_board::timeline::{resolve_range, RangeSelection};
use points_board::Snapshot;
use snafu::{prelude::*, Snafu};

use std::fs;

use chrono::{Local, NaiveDate};
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;
pub mod fetch;
pub mod io_csv;
pub mod io_workbook;
pub mod report;

use crate::args::Args;
use crate::board::config_reader::{read_config, BoardConfig};

#[derive(Debug, Snafu)]
pub enum BoardError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Invalid column reference in the configuration: {content}"))]
    ConfigColumnIndex { content: String },
    #[snafu(display("The total sheet {name} is not listed under 'sheets'"))]
    MissingTotalSheet { name: String },
    #[snafu(display("Error opening CSV source {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV record"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Error opening workbook {path}"))]
    OpeningWorkbook {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Workbook {path} has no worksheet named {name}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("Error building the HTTP client"))]
    FetchClient { source: reqwest::Error },
    #[snafu(display("Error starting the fetch runtime"))]
    FetchRuntime { source: std::io::Error },
    #[snafu(display("Error fetching {url}"))]
    Fetch { source: reqwest::Error, url: String },
    #[snafu(display("Error parsing date {content} (expected YYYY-MM-DD)"))]
    ParsingDate {
        source: chrono::ParseError,
        content: String,
    },
    #[snafu(display("Error rendering the report"))]
    RenderingReport { source: serde_json::Error },
    #[snafu(display("Error writing the report to {path}"))]
    WritingReport {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type BoardResult<T> = Result<T, BoardError>;

pub fn run_report(args: &Args) -> BoardResult<()> {
    let config = read_config(&args.config)?;
    info!(
        "config: club {:?}, {} sheets, total sheet {:?}",
        config.club_name,
        config.sheets.len(),
        config.total_sheet
    );

    let snapshot = load_snapshot(&config)?;
    let selection = range_selection(args)?;
    let today = Local::now().date_naive();
    let range = resolve_range(&selection, today);
    info!("Reporting range: {:?}", range);

    let top_n = args.top.unwrap_or(report::DEFAULT_TOP_N);
    let report_js = report::build_report(
        &config,
        &snapshot,
        &range,
        args.member.as_deref(),
        top_n,
        args.show_meeting_numbers,
    );
    let pretty = serde_json::to_string_pretty(&report_js).context(RenderingReportSnafu {})?;

    match args.out.as_deref() {
        None | Some("") | Some("stdout") => println!("{}", pretty),
        Some(path) => fs::write(path, &pretty).context(WritingReportSnafu { path })?,
    }

    // The reference report, if provided for comparison
    if let Some(reference_path) = &args.reference {
        let reference = read_reference(reference_path)?;
        let pretty_reference =
            serde_json::to_string_pretty(&reference).context(RenderingReportSnafu {})?;
        if pretty_reference != pretty {
            warn!("Found differences with the reference report");
            print_diff(pretty_reference.as_str(), pretty.as_str(), "\n");
            whatever!("Difference detected between generated report and reference report");
        }
    }

    Ok(())
}

/// Builds the data snapshot out of every configured sheet. A sheet that
/// fails to load becomes an empty table; the load itself only fails on
/// configuration problems.
fn load_snapshot(config: &BoardConfig) -> BoardResult<Snapshot> {
    let raw = fetch::load_all_sources(&config.sheets)?;
    let mut tables = Vec::new();
    for (sheet, rows_r) in config.sheets.iter().zip(raw) {
        let layout = sheet.layout()?;
        let rows = match rows_r {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Failed to load category {:?}: {}", sheet.name, e);
                Vec::new()
            }
        };
        tables.push(normalize_category(&sheet.name, &rows, &layout));
    }
    Ok(Snapshot::new(tables, &config.total_sheet))
}

fn range_selection(args: &Args) -> BoardResult<RangeSelection> {
    // Explicit bounds take precedence over any named period.
    if args.start.is_some() || args.end.is_some() {
        return Ok(RangeSelection::Custom {
            start: parse_bound(&args.start)?,
            end: parse_bound(&args.end)?,
        });
    }
    match args.period.as_deref() {
        None | Some("all") => Ok(RangeSelection::All),
        Some("month") => Ok(RangeSelection::Month),
        Some("quarter") => Ok(RangeSelection::Quarter),
        Some(x) => whatever!("Unknown period {:?}: expected all, month or quarter", x),
    }
}

fn parse_bound(input: &Option<String>) -> BoardResult<Option<NaiveDate>> {
    match input {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .context(ParsingDateSnafu { content: s.clone() }),
    }
}

fn read_reference(path: &str) -> BoardResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}
