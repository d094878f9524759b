// Render-ready structures. Pure mapping from the aggregation output, no
// business logic: absent totals display as zero and nothing here can fail.

use chrono::NaiveDate;

use crate::config::LeaderboardEntry;
use crate::timeline::DateRange;
use crate::Snapshot;

/// One column header of the detail table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MeetingHeader {
    pub date: NaiveDate,
    /// Meeting-number label of the first category carrying this date.
    pub label: Option<String>,
}

/// One category line of the detail table: total plus one cell per header
/// date. `None` cells mean the category has no meeting on that date.
#[derive(PartialEq, Debug, Clone)]
pub struct DetailRow {
    pub category: String,
    pub total: f64,
    pub cells: Vec<Option<f64>>,
}

/// A total-only line for the summary categories.
#[derive(PartialEq, Debug, Clone)]
pub struct SummaryRow {
    pub category: String,
    pub total: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct DetailView {
    pub member: String,
    /// Union of in-range meeting dates across the detail categories,
    /// sorted by date.
    pub header: Vec<MeetingHeader>,
    pub rows: Vec<DetailRow>,
    pub summary_rows: Vec<SummaryRow>,
    pub show_meeting_numbers: bool,
}

#[derive(PartialEq, Debug, Clone)]
pub struct LeaderboardRow {
    /// 1-based position after the descending sort.
    pub rank: usize,
    pub member: String,
    pub total_points: f64,
}

/// Parallel name/value vectors for the top-N bar chart.
#[derive(PartialEq, Debug, Clone)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// The per-member breakdown table: one row per regular category aligned on
/// a shared date header, then the summary categories as total-only rows.
pub fn detail_view(
    snapshot: &Snapshot,
    member: &str,
    range: &DateRange,
    show_meeting_numbers: bool,
) -> DetailView {
    let mut header: Vec<MeetingHeader> = Vec::new();
    for table in snapshot.categories().iter().filter(|t| !t.has_stored_totals) {
        for col in &table.columns {
            if !range.contains(col.date) {
                continue;
            }
            // First category carrying the date wins, label included.
            if !header.iter().any(|h| h.date == col.date) {
                header.push(MeetingHeader {
                    date: col.date,
                    label: col.label.clone(),
                });
            }
        }
    }
    header.sort_by_key(|h| h.date);

    let breakdown = snapshot.member_breakdown(member, range);
    let mut rows: Vec<DetailRow> = Vec::new();
    let mut summary_rows: Vec<SummaryRow> = Vec::new();
    for cat in breakdown {
        if cat.summary_only {
            summary_rows.push(SummaryRow {
                category: cat.category,
                total: cat.total,
            });
            continue;
        }
        let cells: Vec<Option<f64>> = header
            .iter()
            .map(|h| {
                cat.points
                    .iter()
                    .find(|p| p.date == h.date)
                    .map(|p| p.points)
            })
            .collect();
        rows.push(DetailRow {
            category: cat.category,
            total: cat.total,
            cells,
        });
    }

    DetailView {
        member: member.trim().to_string(),
        header,
        rows,
        summary_rows,
        show_meeting_numbers,
    }
}

/// Leaderboard rows with their 1-based rank.
pub fn leaderboard_view(entries: &[LeaderboardEntry]) -> Vec<LeaderboardRow> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| LeaderboardRow {
            rank: idx + 1,
            member: entry.member.clone(),
            total_points: entry.total_points,
        })
        .collect()
}

/// The first `n` entries as a chart series. Shorter when fewer members
/// exist.
pub fn chart_series(entries: &[LeaderboardEntry], n: usize) -> ChartSeries {
    let top = &entries[..entries.len().min(n)];
    ChartSeries {
        labels: top.iter().map(|e| e.member.clone()).collect(),
        values: top.iter().map(|e| e.total_points).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;
    use crate::Snapshot;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn snapshot() -> Snapshot {
        // Columns deliberately out of date order: presentation sorts them.
        let mut attendance = TableBuilder::new("Attendance")
            .column(d(2025, 7, 26), Some("13"))
            .column(d(2025, 7, 12), Some("12"));
        attendance.member("Alice", &[2.0, 1.0]).unwrap();

        let mut speeches = TableBuilder::new("Speeches")
            .column(d(2025, 8, 9), Some("14"))
            .column(d(2025, 7, 12), None);
        speeches.member("Alice", &[3.0, 4.0]).unwrap();

        let mut total = TableBuilder::new("Total").with_stored_totals();
        total.member_with_total("Alice", &[], 10.0).unwrap();

        Snapshot::new(
            vec![attendance.build(), speeches.build(), total.build()],
            "Total",
        )
    }

    #[test]
    fn header_is_the_sorted_union_of_in_range_dates() {
        let view = detail_view(&snapshot(), "Alice", &DateRange::ALL, true);
        let dates: Vec<NaiveDate> = view.header.iter().map(|h| h.date).collect();
        assert_eq!(
            dates,
            vec![d(2025, 7, 12), d(2025, 7, 26), d(2025, 8, 9)]
        );
        // The label of 12-Jul comes from Attendance, seen first.
        assert_eq!(view.header[0].label.as_deref(), Some("12"));
    }

    #[test]
    fn cells_align_with_the_header() {
        let view = detail_view(&snapshot(), "Alice", &DateRange::ALL, false);
        assert_eq!(view.rows.len(), 2);

        let attendance = &view.rows[0];
        assert_eq!(attendance.total, 3.0);
        assert_eq!(attendance.cells, vec![Some(1.0), Some(2.0), None]);

        let speeches = &view.rows[1];
        assert_eq!(speeches.total, 7.0);
        assert_eq!(speeches.cells, vec![Some(4.0), None, Some(3.0)]);
    }

    #[test]
    fn summary_categories_are_total_only() {
        let view = detail_view(&snapshot(), "Alice", &DateRange::ALL, false);
        assert_eq!(view.summary_rows.len(), 1);
        assert_eq!(view.summary_rows[0].category, "Total");
        assert_eq!(view.summary_rows[0].total, 10.0);
        // No detail row, and the header ignores summary sheets entirely.
        assert!(view.rows.iter().all(|r| r.category != "Total"));
    }

    #[test]
    fn range_narrows_the_header() {
        let july = DateRange {
            start: Some(d(2025, 7, 1)),
            end: Some(d(2025, 7, 31)),
        };
        let view = detail_view(&snapshot(), "Alice", &july, false);
        assert_eq!(view.header.len(), 2);
        assert_eq!(view.rows[1].total, 4.0);
    }

    #[test]
    fn unknown_member_renders_empty_cells_and_zero_totals() {
        let view = detail_view(&snapshot(), "Nobody", &DateRange::ALL, false);
        assert_eq!(view.header.len(), 3);
        assert!(view.rows.iter().all(|r| r.total == 0.0));
        assert!(view
            .rows
            .iter()
            .all(|r| r.cells.iter().all(|c| c.is_none())));
        assert_eq!(view.summary_rows[0].total, 0.0);
    }

    #[test]
    fn leaderboard_rows_are_ranked_from_one() {
        let entries = vec![
            LeaderboardEntry {
                member: "A".to_string(),
                total_points: 10.0,
            },
            LeaderboardEntry {
                member: "B".to_string(),
                total_points: 7.0,
            },
        ];
        let rows = leaderboard_view(&entries);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].member, "B");
    }

    #[test]
    fn chart_series_truncates_to_top_n() {
        let entries: Vec<LeaderboardEntry> = (0..8)
            .map(|i| LeaderboardEntry {
                member: format!("M{}", i),
                total_points: (8 - i) as f64,
            })
            .collect();
        let series = chart_series(&entries, 5);
        assert_eq!(series.labels.len(), 5);
        assert_eq!(series.labels[0], "M0");
        assert_eq!(series.values[4], 4.0);

        let series = chart_series(&entries[..3], 5);
        assert_eq!(series.labels.len(), 3);
    }
}
