//! The layout of the roll-call sheet.
//!
//! The formatter only computes rows; writing them to a file is left to a
//! tabular writer.

use crate::config::*;
use crate::stats::compute_stats;

/// The name of the exported workbook.
pub const EXPORT_FILE_NAME: &str = "點名結果.xlsx";
/// The name of the single worksheet of the export.
pub const EXPORT_SHEET_NAME: &str = "點名結果";
/// The width of every column, in character units.
pub const EXPORT_COLUMN_WIDTH: u16 = 20;
/// Leave, absent, present. This is not the order of the counters.
pub const EXPORT_HEADER: [&str; 3] = ["未到", "請假", "出席"];

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ExportTable {
    /// One row per index, each taking the i-th name of the leave, absent and
    /// present lists. Shorter lists are padded with empty strings.
    pub body: Vec<[String; 3]>,
    pub stats: AttendanceStats,
}

impl ExportTable {
    pub fn header(&self) -> [&'static str; 3] {
        EXPORT_HEADER
    }

    pub fn summary_line(&self) -> String {
        let s = &self.stats;
        format!(
            "總計: 出席: {}, 請假: {}, 未到: {}, 出席率: {}%",
            s.present_count, s.absent_count, s.leave_count, s.attendance_rate_percent
        )
    }

    /// All the rows of the sheet: the header, the body, an empty separator
    /// row and the single-cell summary row.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let mut res: Vec<Vec<String>> = Vec::with_capacity(self.body.len() + 3);
        res.push(EXPORT_HEADER.iter().map(|s| s.to_string()).collect());
        for row in self.body.iter() {
            res.push(row.to_vec());
        }
        res.push(Vec::new());
        res.push(vec![self.summary_line()]);
        res
    }
}

/// Groups the entries by status, in roster order. Unset entries only show up
/// in the totals.
pub fn format_export(entries: &[RosterEntry]) -> ExportTable {
    let names_with = |st: Status| {
        entries
            .iter()
            .filter(|e| e.status == st)
            .map(|e| e.name.as_str())
            .collect::<Vec<&str>>()
    };
    let columns = [
        names_with(Status::Leave),
        names_with(Status::Absent),
        names_with(Status::Present),
    ];
    let height = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    let body = (0..height)
        .map(|i| {
            let cell = |col: &Vec<&str>| col.get(i).map(|s| s.to_string()).unwrap_or_default();
            [cell(&columns[0]), cell(&columns[1]), cell(&columns[2])]
        })
        .collect();
    ExportTable {
        body,
        stats: compute_stats(entries),
    }
}
