mod config;
pub mod export;
pub mod extract;
pub mod manual;
pub mod sort;
pub mod stats;
pub mod strokes;

use log::{debug, info};

use std::collections::HashSet;

pub use crate::config::*;
pub use crate::export::{format_export, ExportTable};
pub use crate::extract::extract_names;
pub use crate::sort::StrokeSorter;
pub use crate::stats::compute_stats;

/// The roster of one roll-call session.
///
/// The roster is the only owner of its entries. Readers get snapshots, and
/// every change goes through the methods below.
///
/// ```
/// use roster_core::{Roster, Status};
/// # use roster_core::RosterErrors;
///
/// let mut roster = Roster::new()?;
/// roster.import_text("張三,李四,王五");
/// let zhang = roster.find("張三")[0];
/// roster.set_status(zhang, Status::Present)?;
/// assert_eq!(roster.stats().attendance_rate_percent, "33.33");
/// # Ok::<(), RosterErrors>(())
/// ```
#[derive(Debug)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    // The insertion order of the next entry. Never decreases.
    next_order: u64,
    sorter: StrokeSorter,
}

impl Roster {
    pub fn new() -> Result<Roster, RosterErrors> {
        Ok(Roster {
            entries: Vec::new(),
            next_order: 1,
            sorter: StrokeSorter::new()?,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries in their current order.
    pub fn snapshot(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn get(&self, entry: EntryRef) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.insertion_order == entry.0)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// All the entries carrying exactly this name (after trimming), in roster
    /// order.
    pub fn find(&self, name: &str) -> Vec<EntryRef> {
        let name = name.trim();
        self.entries
            .iter()
            .filter(|e| e.name == name)
            .map(|e| e.entry_ref())
            .collect()
    }

    /// Case-insensitive substring search on the names. Does not change the
    /// roster. An empty query matches every entry.
    pub fn search(&self, query: &str) -> Vec<&RosterEntry> {
        let q = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name.trim().to_lowercase().contains(&q))
            .collect()
    }

    fn push(&mut self, name: String) -> EntryRef {
        let insertion_order = self.next_order;
        self.next_order += 1;
        self.entries.push(RosterEntry {
            name,
            status: Status::Unset,
            insertion_order,
        });
        EntryRef(insertion_order)
    }

    /// Appends the names that are not on the roster yet. Names already
    /// present, blank names and repeats within `names` are skipped silently.
    /// Does not sort. Returns the number of new entries.
    pub fn insert_many<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let mut seen: HashSet<String> = self.entries.iter().map(|e| e.name.clone()).collect();
        let mut added = 0;
        for n in names {
            let name = n.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if seen.contains(name) {
                debug!("insert_many: skipping duplicate {:?}", name);
                continue;
            }
            seen.insert(name.to_string());
            self.push(name.to_string());
            added += 1;
        }
        info!("insert_many: {} new entries out of {} names", added, names.len());
        added
    }

    /// Appends a single name, unless it is already on the roster. Does not
    /// sort.
    pub fn insert_one(&mut self, name: &str) -> Result<InsertOutcome, RosterErrors> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterErrors::EmptyName);
        }
        if self.contains_name(name) {
            debug!("insert_one: {:?} needs a confirmation", name);
            return Ok(InsertOutcome::DuplicateConfirmationRequired);
        }
        Ok(InsertOutcome::Inserted(self.push(name.to_string())))
    }

    /// Appends a name even if it is already on the roster. The two entries
    /// are then only told apart by their handles.
    pub fn insert_one_forced(&mut self, name: &str) -> Result<EntryRef, RosterErrors> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterErrors::EmptyName);
        }
        Ok(self.push(name.to_string()))
    }

    pub fn set_status(&mut self, entry: EntryRef, status: Status) -> Result<(), RosterErrors> {
        let e = self
            .entries
            .iter_mut()
            .find(|e| e.insertion_order == entry.0)
            .ok_or(RosterErrors::UnknownEntry(entry))?;
        e.status = status;
        Ok(())
    }

    /// Removes the entry unconditionally. Asking first is the caller's job,
    /// see `remove_confirmed`.
    pub fn remove(&mut self, entry: EntryRef) -> Result<RosterEntry, RosterErrors> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.insertion_order == entry.0)
            .ok_or(RosterErrors::UnknownEntry(entry))?;
        // Keeps the relative order of the others.
        Ok(self.entries.remove(idx))
    }

    pub fn clear(&mut self) {
        info!("clear: removing {} entries", self.entries.len());
        self.entries.clear();
    }

    /// Applies the stroke ordering to the whole roster.
    pub fn sort(&mut self) {
        self.sorter.sort(&mut self.entries);
    }

    // ******** Session operations *********

    /// Imports a raw text blob: extraction, merge without prompting, sort.
    /// Returns the number of new entries.
    pub fn import_text(&mut self, raw_text: &str) -> usize {
        let names = extract_names(raw_text);
        self.import_names(&names)
    }

    /// Merges already extracted names and sorts the roster.
    pub fn import_names<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let added = self.insert_many(names);
        self.sort();
        added
    }

    /// Adds one name typed by the user. A duplicate is only inserted if
    /// `confirm` agrees. The roster is sorted after an insertion.
    pub fn add_name<C: Confirm>(
        &mut self,
        name: &str,
        confirm: &mut C,
    ) -> Result<Confirmation<EntryRef>, RosterErrors> {
        let entry = match self.insert_one(name)? {
            InsertOutcome::Inserted(entry) => entry,
            InsertOutcome::DuplicateConfirmationRequired => {
                if !confirm.confirm(&Prompt::DuplicateName(name.trim().to_string())) {
                    return Ok(Confirmation::Declined);
                }
                self.insert_one_forced(name)?
            }
        };
        self.sort();
        Ok(Confirmation::Done(entry))
    }

    pub fn remove_confirmed<C: Confirm>(
        &mut self,
        entry: EntryRef,
        confirm: &mut C,
    ) -> Result<Confirmation<RosterEntry>, RosterErrors> {
        let name = self
            .get(entry)
            .map(|e| e.name.clone())
            .ok_or(RosterErrors::UnknownEntry(entry))?;
        if !confirm.confirm(&Prompt::RemoveEntry(name)) {
            return Ok(Confirmation::Declined);
        }
        self.remove(entry).map(Confirmation::Done)
    }

    /// Clears the roster if `confirm` agrees. Returns the number of removed
    /// entries.
    pub fn clear_confirmed<C: Confirm>(&mut self, confirm: &mut C) -> Confirmation<usize> {
        let count = self.entries.len();
        if !confirm.confirm(&Prompt::ClearAll { count }) {
            return Confirmation::Declined;
        }
        self.clear();
        Confirmation::Done(count)
    }

    pub fn stats(&self) -> AttendanceStats {
        compute_stats(&self.entries)
    }

    pub fn export(&self) -> ExportTable {
        format_export(&self.entries)
    }
}
