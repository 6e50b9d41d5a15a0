// ********* Roster data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The attendance state of one person on the roster.
///
/// The display labels follow the roll-call sheet: `Absent` is shown as
/// 請假 and `Leave` as 未到.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub enum Status {
    /// No button pressed yet.
    #[default]
    Unset,
    Present,
    Absent,
    Leave,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Unset,
        Status::Present,
        Status::Absent,
        Status::Leave,
    ];

    /// The label used on the roll-call sheet.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Unset => "",
            Status::Present => "出席",
            Status::Absent => "請假",
            Status::Leave => "未到",
        }
    }

    /// The stable machine name, used in configuration files and summaries.
    pub fn code(&self) -> &'static str {
        match self {
            Status::Unset => "unset",
            Status::Present => "present",
            Status::Absent => "absent",
            Status::Leave => "leave",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Status {
    type Err = RosterErrors;

    /// Accepts the machine names (case-insensitive) or the sheet labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Status::ALL
            .iter()
            .find(|st| t.eq_ignore_ascii_case(st.code()) || (!t.is_empty() && t == st.label()))
            .copied()
            .ok_or_else(|| RosterErrors::UnknownStatus(t.to_string()))
    }
}

/// A handle on one entry of the roster.
///
/// Handles are never reused, even after the entry was removed or the roster
/// was cleared. A stale handle is rejected with `RosterErrors::UnknownEntry`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct EntryRef(pub(crate) u64);

impl EntryRef {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RosterEntry {
    pub(crate) name: String,
    pub(crate) status: Status,
    // Monotonic, also the identity of the entry.
    pub(crate) insertion_order: u64,
}

impl RosterEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn insertion_order(&self) -> u64 {
        self.insertion_order
    }

    pub fn entry_ref(&self) -> EntryRef {
        EntryRef(self.insertion_order)
    }
}

// ******** Output data structures *********

/// Aggregates over the current roster. Never stored, always recomputed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AttendanceStats {
    pub present_count: usize,
    pub absent_count: usize,
    pub leave_count: usize,
    pub total_count: usize,
    /// Percentage of present entries, always with two decimals.
    pub attendance_rate_percent: String,
}

/// The outcome of a single manual insertion.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InsertOutcome {
    Inserted(EntryRef),
    /// The name is already on the roster. Nothing was inserted, the caller
    /// must ask before calling `Roster::insert_one_forced`.
    DuplicateConfirmationRequired,
}

/// The outcome of an operation gated by a confirmation.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Confirmation<T> {
    Done(T),
    Declined,
}

/// The questions that the roster asks before a destructive or a
/// duplicating operation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Prompt {
    DuplicateName(String),
    RemoveEntry(String),
    ClearAll { count: usize },
}

impl Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prompt::DuplicateName(name) => write!(f, "名單中已存在 \"{}\"，是否仍然新增？", name),
            Prompt::RemoveEntry(_) => write!(f, "確定要刪除此筆資料嗎？"),
            Prompt::ClearAll { .. } => write!(f, "確定要清除所有名單嗎？"),
        }
    }
}

/// A yes/no decision supplied by the caller.
///
/// Any closure taking a prompt and returning a boolean is a valid decision.
pub trait Confirm {
    fn confirm(&mut self, prompt: &Prompt) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&Prompt) -> bool,
{
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        self(prompt)
    }
}

/// Errors that prevent a roster operation from completing.
///
/// The roster is left untouched when any of these is returned.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RosterErrors {
    /// The name is empty after trimming.
    EmptyName,
    /// The handle does not refer to an entry of this roster.
    UnknownEntry(EntryRef),
    UnknownStatus(String),
    /// The collation data could not be loaded.
    Collation(String),
}

impl Error for RosterErrors {}

impl Display for RosterErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterErrors::EmptyName => write!(f, "請輸入名字！"),
            RosterErrors::UnknownEntry(r) => write!(f, "unknown roster entry #{}", r.0),
            RosterErrors::UnknownStatus(s) => write!(f, "unknown status {:?}", s),
            RosterErrors::Collation(msg) => write!(f, "cannot load collation data: {}", msg),
        }
    }
}
