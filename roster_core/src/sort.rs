use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use log::debug;
use std::cmp::Ordering;

use crate::config::*;
use crate::strokes::name_strokes;

/// Orders roster entries by the stroke count of their surname.
///
/// Ties on the stroke count are broken by comparing the full names with the
/// stroke-order Chinese collation (the order of Traditional Chinese lists), and then by insertion order so that
/// intentional duplicates keep their relative position.
pub struct StrokeSorter {
    collator: Collator,
}

impl std::fmt::Debug for StrokeSorter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeSorter").finish_non_exhaustive()
    }
}

impl StrokeSorter {
    pub fn new() -> Result<StrokeSorter, RosterErrors> {
        let collator = Collator::try_new(&locale!("zh-u-co-stroke").into(), CollatorOptions::new())
            .map_err(|e| RosterErrors::Collation(format!("{:?}", e)))?;
        Ok(StrokeSorter { collator })
    }

    /// Compares two names on the sort key only (no tie-break on identity).
    pub fn compare_names(&self, a: &str, b: &str) -> Ordering {
        let (sa, sb) = (name_strokes(a), name_strokes(b));
        if sa != sb {
            return sa.cmp(&sb);
        }
        self.collator.compare(a, b)
    }

    pub fn compare(&self, a: &RosterEntry, b: &RosterEntry) -> Ordering {
        self.compare_names(&a.name, &b.name)
            .then_with(|| a.insertion_order.cmp(&b.insertion_order))
    }

    /// Sorts the entries in place. The ordering is total, so repeated sorts
    /// are no-ops.
    pub fn sort(&self, entries: &mut [RosterEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
        debug!("sort: sorted {} entries", entries.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, order: u64) -> RosterEntry {
        RosterEntry {
            name: name.to_string(),
            status: Status::Unset,
            insertion_order: order,
        }
    }

    fn names(entries: &[RosterEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn surname_strokes_first() {
        let sorter = StrokeSorter::new().unwrap();
        let mut entries = vec![entry("張三", 1), entry("李四", 2), entry("王五", 3)];
        sorter.sort(&mut entries);
        assert_eq!(names(&entries), vec!["王五", "李四", "張三"]);
    }

    #[test]
    fn unknown_ideographs_after_known_ones() {
        let sorter = StrokeSorter::new().unwrap();
        // 乙 is not in the table and weighs 20, 龔 weighs 22.
        let mut entries = vec![entry("龔一", 1), entry("乙二", 2), entry("丁三", 3)];
        sorter.sort(&mut entries);
        assert_eq!(names(&entries), vec!["丁三", "乙二", "龔一"]);
    }

    #[test]
    fn latin_names_after_ideographs() {
        let sorter = StrokeSorter::new().unwrap();
        let mut entries = vec![
            entry("bob", 1),
            entry("Anna", 2),
            entry("龍五", 3),
            entry("Amy", 4),
        ];
        sorter.sort(&mut entries);
        // 'A' (65) < 'b' (98); Amy and Anna tie on 'A' and use the collation.
        assert_eq!(names(&entries), vec!["龍五", "Amy", "Anna", "bob"]);
    }

    #[test]
    fn ideograph_ties_use_stroke_collation() {
        let sorter = StrokeSorter::new().unwrap();
        // 乙 and 丈 are both missing from the table and weigh 20.
        let mut entries = vec![entry("丈二", 1), entry("乙一", 2)];
        sorter.sort(&mut entries);
        assert_eq!(names(&entries), vec!["乙一", "丈二"]);

        let mut entries = vec![entry("張偉", 1), entry("張三", 2), entry("張一", 3)];
        sorter.sort(&mut entries);
        assert_eq!(names(&entries), vec!["張一", "張三", "張偉"]);
    }

    #[test]
    fn empty_name_first() {
        let sorter = StrokeSorter::new().unwrap();
        assert_eq!(sorter.compare_names("", "一"), Ordering::Less);
    }

    #[test]
    fn duplicates_keep_insertion_order() {
        let sorter = StrokeSorter::new().unwrap();
        let mut entries = vec![entry("張三", 7), entry("李四", 2), entry("張三", 3)];
        sorter.sort(&mut entries);
        let orders: Vec<u64> = entries.iter().map(|e| e.insertion_order()).collect();
        assert_eq!(orders, vec![2, 3, 7]);
        sorter.sort(&mut entries);
        let again: Vec<u64> = entries.iter().map(|e| e.insertion_order()).collect();
        assert_eq!(again, orders);
    }
}
