use clap::Parser;

/// Generates point reports for a club whose attendance and activity points
/// live in published spreadsheet sheets.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON file describing the club and its category sheets.
    /// For more information about the file format, read the documentation.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (member name or empty) If specified, the report includes the per-category
    /// point breakdown of this member.
    #[clap(short, long, value_parser)]
    pub member: Option<String>,

    /// (default all) Named reporting period: 'all', 'month' or 'quarter'.
    /// Periods are resolved against the current date when the report runs.
    #[clap(short, long, value_parser)]
    pub period: Option<String>,

    /// (date, YYYY-MM-DD) Explicit start of the reporting window. Passing --start
    /// or --end switches to a custom range and overrides --period.
    #[clap(long, value_parser)]
    pub start: Option<String>,

    /// (date, YYYY-MM-DD) Explicit end of the reporting window. See --start.
    #[clap(long, value_parser)]
    pub end: Option<String>,

    /// (default 5) Number of members in the chart series of the report.
    #[clap(long, value_parser)]
    pub top: Option<usize>,

    /// If passed as an argument, the meeting-number labels are included alongside
    /// the dates in the member detail view.
    #[clap(long, takes_value = false)]
    pub show_meeting_numbers: bool,

    /// (file path, 'stdout' or empty) Where the JSON report will be written.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference report in JSON format. If provided, ptsboard will
    /// check that the generated report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
