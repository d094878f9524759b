// Reading one category worksheet out of an XLSX workbook.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use crate::board::*;

/// Reads the named worksheet into raw untyped rows, the same shape the CSV
/// path produces.
pub fn read_raw_rows(path: &str, worksheet: &str) -> BoardResult<Vec<Vec<String>>> {
    debug!("read_raw_rows: path: {:?} worksheet: {:?}", path, worksheet);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningWorkbookSnafu { path })?;
    let wrange = workbook
        .worksheet_range(worksheet)
        .context(MissingWorksheetSnafu {
            path,
            name: worksheet,
        })?
        .context(OpeningWorkbookSnafu { path })?;

    let mut res: Vec<Vec<String>> = Vec::new();
    for row in wrange.rows() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(|s| s.trim().is_empty()) {
            continue;
        }
        res.push(cells);
    }
    Ok(res)
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Float(f) => format!("{}", f),
        DataType::Int(i) => format!("{}", i),
        DataType::Bool(b) => format!("{}", b),
        DataType::Empty => String::new(),
        other => format!("{:?}", other),
    }
}
