mod config;
use log::{debug, warn};

pub mod builder;
pub mod manual;
pub mod normalize;
pub mod present;
pub mod timeline;

pub use crate::config::*;
use crate::timeline::DateRange;

impl CategoryTable {
    /// First row whose trimmed name matches exactly. Later duplicates are
    /// silently ignored.
    fn member_row(&self, member: &str) -> Option<&MemberRow> {
        let wanted = member.trim();
        self.rows.iter().find(|row| row.name == wanted)
    }

    /// Sum of the member's points at meetings falling in `range`.
    /// Returns 0 if the member has no row in this table.
    pub fn member_total(&self, member: &str, range: &DateRange) -> f64 {
        self.member_points(member, range)
            .iter()
            .map(|p| p.points)
            .sum()
    }

    /// The member's per-meeting points at meetings falling in `range`, in
    /// column order. Empty if the member has no row in this table.
    pub fn member_points(&self, member: &str, range: &DateRange) -> Vec<MeetingPoints> {
        let row = match self.member_row(member) {
            Some(row) => row,
            None => return Vec::new(),
        };
        let mut res: Vec<MeetingPoints> = Vec::new();
        for (idx, col) in self.columns.iter().enumerate() {
            if !range.contains(col.date) {
                continue;
            }
            res.push(MeetingPoints {
                date: col.date,
                label: col.label.clone(),
                points: row.points.get(idx).copied().unwrap_or(0.0),
            });
        }
        res
    }

    /// The total shown for this member: the stored sheet total when the
    /// table carries one and no date filter narrower than "all" is
    /// requested, otherwise the recomputed in-range sum.
    pub fn member_display_total(&self, member: &str, range: &DateRange) -> f64 {
        if self.has_stored_totals && range.is_all() {
            if let Some(total) = self.member_row(member).and_then(|row| row.stored_total) {
                return total;
            }
        }
        self.member_total(member, range)
    }
}

/// Ranked totals for every roster member against one table, descending by
/// points. The sort is stable: ties keep the roster order.
pub fn roster_totals(
    table: &CategoryTable,
    roster: &[String],
    range: &DateRange,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = roster
        .iter()
        .map(|member| LeaderboardEntry {
            member: member.clone(),
            total_points: table.member_display_total(member, range),
        })
        .collect();
    entries.sort_by(|a, b| {
        b.total_points
            .partial_cmp(&a.total_points)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

/// One full load of the club data: every category table plus the derived
/// roster.
///
/// A snapshot is immutable. Reloading means building a new snapshot and
/// dropping this one; consumers hold a reference to a single snapshot per
/// render cycle instead of reading shared mutable state.
#[derive(PartialEq, Debug, Clone)]
pub struct Snapshot {
    categories: Vec<CategoryTable>,
    roster: Vec<String>,
    total_category: String,
}

impl Snapshot {
    /// `total_category` names the table the leaderboard reads. This is a
    /// configuration choice, not a computed property.
    pub fn new(categories: Vec<CategoryTable>, total_category: &str) -> Snapshot {
        let mut roster: Vec<String> = Vec::new();
        for table in &categories {
            for row in &table.rows {
                if !roster.iter().any(|name| name == &row.name) {
                    roster.push(row.name.clone());
                }
            }
        }
        debug!(
            "Snapshot: {} categories, {} roster members",
            categories.len(),
            roster.len()
        );
        Snapshot {
            categories,
            roster,
            total_category: total_category.to_string(),
        }
    }

    pub fn categories(&self) -> &[CategoryTable] {
        &self.categories
    }

    /// Union of member names across all tables, in first-seen order.
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn category(&self, name: &str) -> Option<&CategoryTable> {
        self.categories.iter().find(|t| t.name == name)
    }

    /// The full-roster leaderboard, read from the configured total category.
    pub fn leaderboard(&self, range: &DateRange) -> Vec<LeaderboardEntry> {
        match self.category(&self.total_category) {
            Some(table) => roster_totals(table, &self.roster, range),
            None => {
                warn!(
                    "Total category {:?} is not loaded; the leaderboard is zeroed",
                    self.total_category
                );
                self.roster
                    .iter()
                    .map(|member| LeaderboardEntry {
                        member: member.clone(),
                        total_points: 0.0,
                    })
                    .collect()
            }
        }
    }

    /// Per-category totals and meeting points for one member, in category
    /// order. Categories the member never appears in contribute zero.
    pub fn member_breakdown(&self, member: &str, range: &DateRange) -> Vec<CategoryBreakdown> {
        self.categories
            .iter()
            .map(|table| CategoryBreakdown {
                category: table.name.clone(),
                total: table.member_display_total(member, range),
                points: table.member_points(member, range),
                summary_only: table.has_stored_totals,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;
    use crate::normalize::normalize_category;
    use crate::timeline::{resolve_range, RangeSelection};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn raw(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange {
            start: Some(start),
            end: Some(end),
        }
    }

    fn attendance() -> CategoryTable {
        let rows = raw(&[
            &["Member", "Total", "12-Jul-25", "26-Jul-25", "9-Aug-25"],
            &["", "", "1", "2", "3"],
            &["Alice", "10", "5", "0", "5"],
            &["Bob", "3", "1", "1", "1"],
        ]);
        normalize_category("Attendance", &rows, &SheetLayout::DEFAULT)
    }

    #[test]
    fn july_window_scenario() {
        let table = attendance();
        let july = range(d(2025, 7, 1), d(2025, 7, 31));
        assert_eq!(table.member_total("Alice", &july), 5.0);
        assert_eq!(table.member_total("Bob", &july), 2.0);
        assert_eq!(table.member_total("Alice", &DateRange::ALL), 10.0);
    }

    #[test]
    fn totals_are_additive_over_disjoint_subranges() {
        let mut builder = TableBuilder::new("Speeches")
            .column(d(2025, 7, 5), None)
            .column(d(2025, 7, 19), None)
            .column(d(2025, 8, 2), None)
            .column(d(2025, 8, 16), None);
        builder.member("Alice", &[1.0, 2.0, 4.0, 8.0]).unwrap();
        let table = builder.build();

        // Split at the 19-Jul meeting: the boundary counts exactly once.
        let full = range(d(2025, 7, 1), d(2025, 8, 31));
        let left = range(d(2025, 7, 1), d(2025, 7, 19));
        let right = range(d(2025, 7, 20), d(2025, 8, 31));
        let total = table.member_total("Alice", &full);
        assert_eq!(total, 15.0);
        assert_eq!(
            table.member_total("Alice", &left) + table.member_total("Alice", &right),
            total
        );
    }

    #[test]
    fn roster_totals_keep_first_seen_order_on_ties() {
        let mut builder = TableBuilder::new("Total").column(d(2025, 7, 12), None);
        builder.member("A", &[10.0]).unwrap();
        builder.member("B", &[10.0]).unwrap();
        builder.member("C", &[7.0]).unwrap();
        let table = builder.build();
        let roster = vec!["A".to_string(), "B".to_string(), "C".to_string()];

        let entries = roster_totals(&table, &roster, &DateRange::ALL);
        let names: Vec<&str> = entries.iter().map(|e| e.member.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(entries[0].total_points, 10.0);
        assert_eq!(entries[2].total_points, 7.0);
    }

    #[test]
    fn missing_member_is_zero_not_an_error() {
        let table = attendance();
        assert_eq!(table.member_total("Nobody", &DateRange::ALL), 0.0);
        assert!(table.member_points("Nobody", &DateRange::ALL).is_empty());
    }

    #[test]
    fn first_duplicate_row_wins() {
        let rows = raw(&[
            &["Member", "Total", "12-Jul-25"],
            &["", "", "1"],
            &["Alice", "", "5"],
            &["Alice", "", "9"],
        ]);
        let table = normalize_category("Roles", &rows, &SheetLayout::DEFAULT);
        assert_eq!(table.member_total("Alice", &DateRange::ALL), 5.0);
    }

    #[test]
    fn stored_totals_apply_only_to_the_all_range() {
        let layout = SheetLayout {
            stored_total_column: Some(1),
            ..SheetLayout::DEFAULT
        };
        let rows = raw(&[
            &["Member", "Total", "12-Jul-25", "9-Aug-25"],
            &["", "", "1", "2"],
            &["Alice", "99", "5", "3"],
        ]);
        let table = normalize_category("Total", &rows, &layout);

        assert_eq!(table.member_display_total("Alice", &DateRange::ALL), 99.0);
        let july = range(d(2025, 7, 1), d(2025, 7, 31));
        assert_eq!(table.member_display_total("Alice", &july), 5.0);
    }

    #[test]
    fn empty_category_contributes_zero() {
        let empty = normalize_category("Awards", &[], &SheetLayout::DEFAULT);
        let snapshot = Snapshot::new(vec![attendance(), empty], "Attendance");
        let breakdown = snapshot.member_breakdown("Alice", &DateRange::ALL);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[1].category, "Awards");
        assert_eq!(breakdown[1].total, 0.0);
        assert!(breakdown[1].points.is_empty());
    }

    #[test]
    fn leaderboard_reads_the_configured_total_category() {
        let snapshot = Snapshot::new(vec![attendance()], "Attendance");
        let entries = snapshot.leaderboard(&DateRange::ALL);
        assert_eq!(entries[0].member, "Alice");
        assert_eq!(entries[0].total_points, 10.0);
        assert_eq!(entries[1].member, "Bob");

        // A misconfigured total category degrades to a zeroed board.
        let snapshot = Snapshot::new(vec![attendance()], "Nope");
        let entries = snapshot.leaderboard(&DateRange::ALL);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.total_points == 0.0));
    }

    #[test]
    fn roster_is_the_first_seen_union_across_tables() {
        let mut builder = TableBuilder::new("Speeches").column(d(2025, 7, 12), None);
        builder.member("Carol", &[2.0]).unwrap();
        builder.member("Alice", &[1.0]).unwrap();
        let speeches = builder.build();

        let snapshot = Snapshot::new(vec![attendance(), speeches], "Attendance");
        assert_eq!(snapshot.roster(), ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let table = attendance();
        let snapshot = Snapshot::new(vec![table.clone()], "Attendance");
        let july = range(d(2025, 7, 1), d(2025, 7, 31));

        assert_eq!(
            table.member_points("Alice", &july),
            table.member_points("Alice", &july)
        );
        assert_eq!(snapshot.leaderboard(&july), snapshot.leaderboard(&july));

        // Period resolution is a function of the injected date only.
        assert_eq!(
            resolve_range(&RangeSelection::Quarter, d(2025, 8, 30)),
            resolve_range(&RangeSelection::Quarter, d(2025, 8, 30))
        );
    }
}
