use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;
use std::fs;

use points_board::SheetLayout;

use crate::board::*;

/// One category sheet: where it comes from and how its cells are laid out.
/// Layout deviations between sheets are configuration, never code branches.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SheetSource {
    pub name: String,
    /// URL (fetched) or local file path.
    pub source: String,
    /// "csv" (default) or "workbook".
    pub provider: Option<String>,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
    #[serde(rename = "headerRows")]
    _header_rows: Option<JSValue>,
    #[serde(rename = "firstPointColumn")]
    _first_point_column: Option<JSValue>,
    #[serde(rename = "storedTotalColumn")]
    _stored_total_column: Option<JSValue>,
}

impl SheetSource {
    /// For workbook sources, which worksheet to read. Defaults to the
    /// category name.
    pub fn worksheet(&self) -> String {
        self.worksheet_name
            .clone()
            .unwrap_or_else(|| self.name.clone())
    }

    pub fn layout(&self) -> BoardResult<SheetLayout> {
        let header_rows = match &self._header_rows {
            None => SheetLayout::DEFAULT.header_rows,
            Some(x) => read_js_count(x)?,
        };
        let first_point_column = match &self._first_point_column {
            None => SheetLayout::DEFAULT.first_point_column,
            Some(x) => read_js_column(x)?,
        };
        let stored_total_column = match &self._stored_total_column {
            None | Some(JSValue::Null) => None,
            Some(x) => Some(read_js_column(x)?),
        };
        Ok(SheetLayout {
            header_rows,
            first_point_column,
            stored_total_column,
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(rename = "clubName")]
    pub club_name: String,
    /// The category the leaderboard reads its totals from.
    #[serde(rename = "totalSheet")]
    pub total_sheet: String,
    pub sheets: Vec<SheetSource>,
}

pub fn read_config(path: &str) -> BoardResult<BoardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: BoardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    ensure!(
        config.sheets.iter().any(|s| s.name == config.total_sheet),
        MissingTotalSheetSnafu {
            name: config.total_sheet.clone()
        }
    );
    Ok(config)
}

/// Column references follow the spreadsheet conventions: 1-based numbers or
/// Excel-style letters. Converted once here to 0-based indices, never
/// re-interpreted downstream.
fn read_js_column(x: &JSValue) -> BoardResult<usize> {
    match x {
        JSValue::Number(n) => match n.as_u64() {
            Some(i) if i >= 1 => Ok((i - 1) as usize),
            _ => ConfigColumnIndexSnafu {
                content: x.to_string(),
            }
            .fail(),
        },
        JSValue::String(s)
            if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            let mut idx: usize = 0;
            for c in s.to_ascii_lowercase().chars() {
                idx = idx * 26 + (c as usize - 'a' as usize + 1);
            }
            Ok(idx - 1)
        }
        JSValue::String(s) => match s.parse::<usize>() {
            Ok(i) if i >= 1 => Ok(i - 1),
            _ => ConfigColumnIndexSnafu {
                content: s.clone(),
            }
            .fail(),
        },
        _ => ConfigColumnIndexSnafu {
            content: x.to_string(),
        }
        .fail(),
    }
}

/// Plain counts (like the number of header rows): numbers or numeric strings.
fn read_js_count(x: &JSValue) -> BoardResult<usize> {
    match x {
        JSValue::Number(n) => match n.as_u64() {
            Some(i) => Ok(i as usize),
            None => ConfigColumnIndexSnafu {
                content: x.to_string(),
            }
            .fail(),
        },
        JSValue::String(s) => match s.parse::<usize>() {
            Ok(i) => Ok(i),
            Err(_) => ConfigColumnIndexSnafu {
                content: s.clone(),
            }
            .fail(),
        },
        _ => ConfigColumnIndexSnafu {
            content: x.to_string(),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "clubName": "Example Club",
        "totalSheet": "Total",
        "sheets": [
            {"name": "Attendance",
             "source": "https://example.com/attendance.csv"},
            {"name": "Speeches",
             "source": "speeches.csv",
             "headerRows": 1, "firstPointColumn": "C"},
            {"name": "Total",
             "source": "workbook.xlsx", "provider": "workbook",
             "worksheetName": "Totals", "storedTotalColumn": 2}
        ]
    }"#;

    fn parse(sample: &str) -> BoardConfig {
        serde_json::from_str(sample).unwrap()
    }

    #[test]
    fn reads_layouts_with_defaults() {
        let config = parse(SAMPLE);
        assert_eq!(config.club_name, "Example Club");

        let attendance = config.sheets[0].layout().unwrap();
        assert_eq!(attendance, SheetLayout::DEFAULT);

        let speeches = config.sheets[1].layout().unwrap();
        assert_eq!(speeches.header_rows, 1);
        // Column "C" is the third column.
        assert_eq!(speeches.first_point_column, 2);

        let total = config.sheets[2].layout().unwrap();
        assert_eq!(total.stored_total_column, Some(1));
        assert_eq!(config.sheets[2].worksheet(), "Totals");
        assert_eq!(config.sheets[0].worksheet(), "Attendance");
    }

    #[test]
    fn rejects_bad_column_references() {
        assert!(read_js_column(&serde_json::json!(0)).is_err());
        assert!(read_js_column(&serde_json::json!("0")).is_err());
        assert!(read_js_column(&serde_json::json!(true)).is_err());
        assert_eq!(read_js_column(&serde_json::json!(3)).unwrap(), 2);
        assert_eq!(read_js_column(&serde_json::json!("aa")).unwrap(), 26);
    }

    #[test]
    fn total_sheet_must_be_listed() {
        let config = parse(SAMPLE);
        assert!(config.sheets.iter().any(|s| s.name == config.total_sheet));
    }
}
