pub use crate::config::*;

use chrono::NaiveDate;

/// A builder for assembling a category table without going through raw
/// sheet rows. This is the entry point for embedders and tests.
///
/// ```
/// use points_board::builder::TableBuilder;
/// use chrono::NaiveDate;
///
/// let mut builder = TableBuilder::new("Attendance")
///     .column(NaiveDate::from_ymd_opt(2025, 7, 12).unwrap(), Some("12"))
///     .column(NaiveDate::from_ymd_opt(2025, 7, 26).unwrap(), None);
/// builder.member("Anna", &[5.0, 2.0])?;
/// builder.member("Bob", &[1.0])?;
///
/// let table = builder.build();
/// assert_eq!(table.rows.len(), 2);
/// # Ok::<(), points_board::TableError>(())
/// ```
pub struct TableBuilder {
    name: String,
    columns: Vec<MeetingColumn>,
    rows: Vec<MemberRow>,
    has_stored_totals: bool,
}

impl TableBuilder {
    pub fn new(name: &str) -> TableBuilder {
        TableBuilder {
            name: name.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            has_stored_totals: false,
        }
    }

    /// Declares the table as carrying pre-summed member totals, like the
    /// summary sheets of the source spreadsheet.
    pub fn with_stored_totals(mut self) -> TableBuilder {
        self.has_stored_totals = true;
        self
    }

    /// Appends a meeting column. Columns built this way are indexed by
    /// their insertion position.
    pub fn column(mut self, date: NaiveDate, label: Option<&str>) -> TableBuilder {
        self.columns.push(MeetingColumn {
            index: self.columns.len(),
            date,
            label: label.map(|s| s.to_string()),
        });
        self
    }

    /// Adds a member row. Rows shorter than the column list are padded with
    /// zeros, like the normalizer does for short sheet rows.
    pub fn member(&mut self, name: &str, points: &[f64]) -> Result<(), TableError> {
        self.push_row(name, points, None)
    }

    /// Adds a member row together with a stored total.
    pub fn member_with_total(
        &mut self,
        name: &str,
        points: &[f64],
        total: f64,
    ) -> Result<(), TableError> {
        self.push_row(name, points, Some(total))
    }

    fn push_row(
        &mut self,
        name: &str,
        points: &[f64],
        stored_total: Option<f64>,
    ) -> Result<(), TableError> {
        if points.len() > self.columns.len() {
            return Err(TableError::RowWiderThanHeader {
                member: name.to_string(),
                columns: self.columns.len(),
                got: points.len(),
            });
        }
        let mut padded = points.to_vec();
        padded.resize(self.columns.len(), 0.0);
        self.rows.push(MemberRow {
            name: name.trim().to_string(),
            points: padded,
            stored_total,
        });
        Ok(())
    }

    pub fn build(self) -> CategoryTable {
        CategoryTable {
            name: self.name,
            columns: self.columns,
            rows: self.rows,
            has_stored_totals: self.has_stored_totals,
        }
    }
}
