// Turns raw sheet rows into a normalized category table.

use log::debug;

use crate::config::{CategoryTable, MeetingColumn, MemberRow, SheetLayout};
use crate::timeline::parse_meeting_date;

/// Builds a [`CategoryTable`] from the raw rows of one source sheet.
///
/// This never fails: a header cell that is not a date is not a meeting
/// column, a data row with a blank first cell is not a member row, a cell
/// that is not a number is zero points, and a sheet with no usable content
/// is an empty table. Failures stay contained in the category they occur in.
pub fn normalize_category(name: &str, raw_rows: &[Vec<String>], layout: &SheetLayout) -> CategoryTable {
    let columns = scan_header(raw_rows, layout);
    debug!(
        "normalize_category: {:?}: {} meeting columns out of {} raw rows",
        name,
        columns.len(),
        raw_rows.len()
    );

    let data_start = layout.header_rows.min(raw_rows.len());
    let mut rows: Vec<MemberRow> = Vec::new();
    for raw in &raw_rows[data_start..] {
        let member = match raw.first() {
            Some(cell) if !cell.trim().is_empty() => cell.trim().to_string(),
            // Blank separator rows are common in the source. Not member rows.
            _ => continue,
        };
        let points: Vec<f64> = columns
            .iter()
            .map(|col| parse_points(raw.get(col.index)))
            .collect();
        let stored_total = layout
            .stored_total_column
            .and_then(|col| raw.get(col))
            .and_then(|cell| cell.trim().parse::<f64>().ok());
        rows.push(MemberRow {
            name: member,
            points,
            stored_total,
        });
    }

    CategoryTable {
        name: name.to_string(),
        columns,
        rows,
        has_stored_totals: layout.stored_total_column.is_some(),
    }
}

fn scan_header(raw_rows: &[Vec<String>], layout: &SheetLayout) -> Vec<MeetingColumn> {
    let date_row = match raw_rows.first() {
        Some(row) if layout.header_rows >= 1 => row,
        _ => return Vec::new(),
    };
    let label_row = if layout.header_rows >= 2 {
        raw_rows.get(1)
    } else {
        None
    };

    let mut columns: Vec<MeetingColumn> = Vec::new();
    for (index, cell) in date_row.iter().enumerate().skip(layout.first_point_column) {
        let date = match parse_meeting_date(cell) {
            Some(d) => d,
            // Not a date: the column is excluded, not an error.
            None => continue,
        };
        let label = label_row
            .and_then(|row| row.get(index))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        columns.push(MeetingColumn { index, date, label });
    }
    columns
}

/// Blank and non-numeric cells count as exactly zero points. Absence of a
/// point and a zero point are indistinguishable downstream.
fn parse_points(cell: Option<&String>) -> f64 {
    cell.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0)
}
