// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use chrono::NaiveDate;

/// One dated meeting column within a category table.
///
/// Columns keep the order in which they appear in the source header row.
/// Sorting by date only happens at presentation time.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MeetingColumn {
    /// Position of the column in the source row.
    pub index: usize,
    pub date: NaiveDate,
    /// Meeting-number label from the second header row, when present.
    pub label: Option<String>,
}

/// The point values of one member in one category, aligned with the
/// meeting columns of the table.
#[derive(PartialEq, Debug, Clone)]
pub struct MemberRow {
    /// Trimmed display name. This is the only member identity in the system.
    pub name: String,
    pub points: Vec<f64>,
    /// The pre-summed running total of the sheet, when the layout declares one.
    pub stored_total: Option<f64>,
}

/// Where the interesting cells sit in one source sheet.
///
/// The published sheets are not uniform: most carry two leading header rows
/// (dates, then meeting numbers) and two leading columns (name, running
/// total), but a few summary sheets deviate. The deviations are plain
/// configuration, not special-cased code paths.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct SheetLayout {
    /// Number of leading header rows. The first row holds the dates, the
    /// second one (if present) the meeting-number labels.
    pub header_rows: usize,
    /// First column scanned for meeting dates (0-based).
    pub first_point_column: usize,
    /// Column holding a pre-summed member total (0-based), for sheets that
    /// store one.
    pub stored_total_column: Option<usize>,
}

impl SheetLayout {
    pub const DEFAULT: SheetLayout = SheetLayout {
        header_rows: 2,
        first_point_column: 2,
        stored_total_column: None,
    };
}

impl Default for SheetLayout {
    fn default() -> Self {
        SheetLayout::DEFAULT
    }
}

/// The normalized form of one category sheet: ordered meeting columns and
/// per-member point rows.
///
/// Built once per data load and immutable afterward. Reloading replaces the
/// whole table, never a row in place.
#[derive(PartialEq, Debug, Clone)]
pub struct CategoryTable {
    pub name: String,
    pub columns: Vec<MeetingColumn>,
    /// Rows in source order. Lookups take the first row whose trimmed name
    /// matches; later duplicates are ignored.
    pub rows: Vec<MemberRow>,
    /// Whether the source layout declared a stored-total column.
    pub has_stored_totals: bool,
}

// ******** Output data structures *********

/// The points a member collected at one meeting.
#[derive(PartialEq, Debug, Clone)]
pub struct MeetingPoints {
    pub date: NaiveDate,
    pub label: Option<String>,
    pub points: f64,
}

/// One line of the ranked leaderboard. Derived, never persisted.
#[derive(PartialEq, Debug, Clone)]
pub struct LeaderboardEntry {
    pub member: String,
    pub total_points: f64,
}

/// The in-range points of one member in one category.
#[derive(PartialEq, Debug, Clone)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: f64,
    pub points: Vec<MeetingPoints>,
    /// True for categories that only carry totals in the detail view.
    pub summary_only: bool,
}

// ********* Errors **********

/// Errors of the programmatic table-building API.
///
/// Spreadsheet-shaped failure never surfaces here: the normalizer coerces
/// malformed input to excluded columns, zero points or empty tables.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TableError {
    RowWiderThanHeader {
        member: String,
        columns: usize,
        got: usize,
    },
}

impl Error for TableError {}

impl Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::RowWiderThanHeader {
                member,
                columns,
                got,
            } => write!(
                f,
                "row for {:?} has {} point values but the table has {} meeting columns",
                member, got, columns
            ),
        }
    }
}
