// Assembles the JSON report out of the presentation structures.

use chrono::NaiveDate;
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

use points_board::present::{chart_series, detail_view, leaderboard_view, ChartSeries, DetailView};
use points_board::timeline::DateRange;
use points_board::Snapshot;

use crate::board::config_reader::BoardConfig;

pub const DEFAULT_TOP_N: usize = 5;

pub fn build_report(
    config: &BoardConfig,
    snapshot: &Snapshot,
    range: &DateRange,
    member: Option<&str>,
    top_n: usize,
    show_meeting_numbers: bool,
) -> JSValue {
    let entries = snapshot.leaderboard(range);

    let mut doc: JSMap<String, JSValue> = JSMap::new();
    doc.insert("club".to_string(), json!(config.club_name));
    doc.insert("range".to_string(), range_to_json(range));
    doc.insert("leaderboard".to_string(), leaderboard_to_json(&entries));
    doc.insert(
        "top".to_string(),
        chart_to_json(&chart_series(&entries, top_n)),
    );
    if let Some(member) = member {
        let view = detail_view(snapshot, member, range, show_meeting_numbers);
        doc.insert("member".to_string(), detail_to_json(&view));
    }
    JSValue::Object(doc)
}

fn range_to_json(range: &DateRange) -> JSValue {
    json!({
        "start": range.start.map(fmt_date),
        "end": range.end.map(fmt_date),
    })
}

fn leaderboard_to_json(entries: &[points_board::LeaderboardEntry]) -> JSValue {
    let rows: Vec<JSValue> = leaderboard_view(entries)
        .iter()
        .map(|row| {
            json!({
                "rank": row.rank,
                "member": row.member,
                "points": fmt_points(row.total_points),
            })
        })
        .collect();
    JSValue::Array(rows)
}

fn chart_to_json(series: &ChartSeries) -> JSValue {
    json!({
        "labels": series.labels,
        "values": series.values,
    })
}

fn detail_to_json(view: &DetailView) -> JSValue {
    let meetings: Vec<JSValue> = view
        .header
        .iter()
        .map(|h| {
            let mut m: JSMap<String, JSValue> = JSMap::new();
            m.insert("date".to_string(), json!(fmt_date(h.date)));
            if view.show_meeting_numbers {
                m.insert(
                    "meetingNumber".to_string(),
                    json!(h.label.clone().unwrap_or_default()),
                );
            }
            JSValue::Object(m)
        })
        .collect();

    let categories: Vec<JSValue> = view
        .rows
        .iter()
        .map(|row| {
            // Absent cells render as empty strings, like the source sheets.
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|c| c.map(fmt_points).unwrap_or_default())
                .collect();
            json!({
                "category": row.category,
                "total": fmt_points(row.total),
                "points": cells,
            })
        })
        .collect();

    let summaries: Vec<JSValue> = view
        .summary_rows
        .iter()
        .map(|row| {
            json!({
                "category": row.category,
                "total": fmt_points(row.total),
            })
        })
        .collect();

    json!({
        "name": view.member,
        "meetings": meetings,
        "categories": categories,
        "summaries": summaries,
    })
}

fn fmt_points(points: f64) -> String {
    format!("{:.2}", points)
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
