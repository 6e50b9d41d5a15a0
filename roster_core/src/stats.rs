use crate::config::*;

/// Formats a presence rate the way the roll-call sheet shows it.
pub fn format_rate(present: usize, total: usize) -> String {
    if total == 0 {
        // Not a NaN: an empty roster has a rate of zero.
        return "0.00".to_string();
    }
    let rate = (present as f64 / total as f64) * 100.0;
    // Halves round up: 1 of 32 is 3.13, not 3.12.
    format!("{:.2}", (rate * 100.0).round() / 100.0)
}

/// Counts the entries per status. Every entry, including the unset ones,
/// counts towards the total.
pub fn compute_stats(entries: &[RosterEntry]) -> AttendanceStats {
    let count = |st: Status| entries.iter().filter(|e| e.status == st).count();
    let present_count = count(Status::Present);
    let total_count = entries.len();
    AttendanceStats {
        present_count,
        absent_count: count(Status::Absent),
        leave_count: count(Status::Leave),
        total_count,
        attendance_rate_percent: format_rate(present_count, total_count),
    }
}
