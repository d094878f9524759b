// Date parsing and range filtering.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parses a header cell of the form `12-Jul-25` into a calendar date.
///
/// The 2-digit year expands to the 2000s below 50 and to the 1900s from 50
/// on. Anything else (wrong token count, unknown month abbreviation,
/// 4-digit year, impossible day) is not a meeting date and yields `None`.
pub fn parse_meeting_date(cell: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = cell.trim().split('-').collect();
    let (day_s, month_s, year_s) = match parts.as_slice() {
        [d, m, y] => (*d, *m, *y),
        _ => return None,
    };
    let day: u32 = day_s.parse().ok()?;
    let month = MONTHS.iter().position(|m| *m == month_s)? as u32 + 1;
    let year_short: i32 = year_s.parse().ok()?;
    if !(0..=99).contains(&year_short) {
        return None;
    }
    let year = if year_short < 50 {
        2000 + year_short
    } else {
        1900 + year_short
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// What the user asked to look at. Named periods are resolved against the
/// current date at query time, not stored.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RangeSelection {
    All,
    /// First day of the current month through today.
    Month,
    /// First day of the current Jan/Apr/Jul/Oct quarter through today.
    Quarter,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

/// An inclusive date window. Either bound may be open.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub const ALL: DateRange = DateRange {
        start: None,
        end: None,
    };

    pub fn is_all(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Inclusive on both bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// Resolves a selection against `today`.
///
/// `today` is an argument rather than a call to the clock so that period
/// resolution stays deterministic under test. Inverted custom bounds are
/// swapped, never treated as an empty range.
pub fn resolve_range(selection: &RangeSelection, today: NaiveDate) -> DateRange {
    match selection {
        RangeSelection::All => DateRange::ALL,
        RangeSelection::Month => DateRange {
            start: Some(today.with_day(1).unwrap_or(today)),
            end: Some(today),
        },
        RangeSelection::Quarter => {
            let quarter_month = ((today.month() - 1) / 3) * 3 + 1;
            let start = today
                .with_day(1)
                .and_then(|d| d.with_month(quarter_month))
                .unwrap_or(today);
            DateRange {
                start: Some(start),
                end: Some(today),
            }
        }
        RangeSelection::Custom { start, end } => match (start, end) {
            (Some(s), Some(e)) if s > e => DateRange {
                start: Some(*e),
                end: Some(*s),
            },
            _ => DateRange {
                start: *start,
                end: *end,
            },
        },
    }
}
