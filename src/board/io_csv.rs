// Primitives for reading raw category rows out of CSV sources.

use std::io::Read;

use csv::ReaderBuilder;
use log::debug;
use snafu::prelude::*;

use crate::board::*;

/// Reads a CSV file into raw untyped rows. Header handling is left to the
/// normalizer.
pub fn read_raw_rows_path(path: &str) -> BoardResult<Vec<Vec<String>>> {
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    collect_rows(rdr)
}

/// Same as [`read_raw_rows_path`], for an already-fetched body.
pub fn read_raw_rows<R: Read>(input: R) -> BoardResult<Vec<Vec<String>>> {
    let rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    collect_rows(rdr)
}

fn collect_rows<R: Read>(rdr: csv::Reader<R>) -> BoardResult<Vec<Vec<String>>> {
    let mut res: Vec<Vec<String>> = Vec::new();
    for record_r in rdr.into_records() {
        let record = record_r.context(CsvLineParseSnafu {})?;
        let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        // The published sheets pad with fully blank lines; drop them here
        // so that header indexing matches what the spreadsheet shows.
        if row.iter().all(|s| s.trim().is_empty()) {
            continue;
        }
        res.push(row);
    }
    debug!("collect_rows: {} rows", res.len());
    Ok(res)
}
