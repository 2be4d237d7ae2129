use uuid::Uuid;

use crate::entry::Entry;

/// Date-ordered sequence of entries.
///
/// Invariant: fully sorted ascending by date after every mutation, before any
/// angle is computed from an index. The sort is stable, so entries with equal
/// (or equally unparseable) dates keep their insertion order. An index into
/// the sequence is positional only and is not stable across mutations; use
/// `index_of` with the entry id to re-derive a position after sorting.
#[derive(Clone, Debug, Default)]
pub struct OrderedCollection {
    entries: Vec<Entry>,
}

impl OrderedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a loaded snapshot; sorts on construction so persisted data
    /// that predates the invariant still comes up ordered.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut collection = Self { entries };
        collection.sort();
        collection
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }

    /// Append then re-sort.
    pub fn insert(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.sort();
    }

    /// Replace the entry at `index`, then re-sort.
    /// Panics on an out-of-range index: that is a caller invariant violation,
    /// not a recoverable condition.
    pub fn update(&mut self, index: usize, entry: Entry) {
        self.entries[index] = entry;
        self.sort();
    }

    /// Delete the entry at `index`. Survivor order is preserved, so no
    /// re-sort is needed. Panics on an out-of-range index.
    pub fn remove(&mut self, index: usize) -> Entry {
        self.entries.remove(index)
    }

    /// Current position of the entry with the given id, after sorting.
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Stable ascending sort by parsed date. Never fails: unparseable dates
    /// carry the earliest possible key.
    pub fn sort(&mut self) {
        self.entries.sort_by_key(Entry::sort_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(date: &str, note: &str) -> Entry {
        Entry::new("img.jpg".to_string(), date.to_string(), note.to_string())
    }

    fn is_sorted(c: &OrderedCollection) -> bool {
        c.as_slice().windows(2).all(|w| w[0].sort_key() <= w[1].sort_key())
    }

    #[test]
    fn test_insert_sorts() {
        let mut c = OrderedCollection::new();
        c.insert(entry("2020-03-01", "mar"));
        c.insert(entry("2020-01-01", "jan"));
        c.insert(entry("2020-02-01", "feb"));
        let notes: Vec<&str> = c.as_slice().iter().map(|e| e.note.as_str()).collect();
        assert_eq!(notes, ["jan", "feb", "mar"]);
    }

    #[test]
    fn test_ties_preserve_insertion_order() {
        let mut c = OrderedCollection::new();
        c.insert(entry("2020-01-01", "first"));
        c.insert(entry("2020-01-01", "second"));
        c.insert(entry("2020-01-01", "third"));
        let notes: Vec<&str> = c.as_slice().iter().map(|e| e.note.as_str()).collect();
        assert_eq!(notes, ["first", "second", "third"]);
    }

    #[test]
    fn test_unparseable_dates_sort_earliest() {
        let mut c = OrderedCollection::new();
        c.insert(entry("2020-01-01", "dated"));
        c.insert(entry("someday", "undated"));
        assert_eq!(c.get(0).unwrap().note, "undated");
        assert_eq!(c.get(1).unwrap().note, "dated");
    }

    #[test]
    fn test_update_resorts_and_keeps_id() {
        let mut c = OrderedCollection::new();
        c.insert(entry("2020-01-01", "a"));
        c.insert(entry("2020-02-01", "b"));
        let id = c.get(0).unwrap().id;

        let moved = c.get(0).unwrap().replacing("img.jpg".into(), "2020-03-01".into(), "a".into());
        c.update(0, moved);

        assert_eq!(c.index_of(id), Some(1), "edited entry re-sorted to the end");
        assert!(is_sorted(&c));
    }

    #[test]
    fn test_remove_preserves_survivor_order() {
        let mut c = OrderedCollection::new();
        c.insert(entry("2020-01-01", "a"));
        c.insert(entry("2020-02-01", "b"));
        c.insert(entry("2020-03-01", "c"));
        let removed = c.remove(1);
        assert_eq!(removed.note, "b");
        let notes: Vec<&str> = c.as_slice().iter().map(|e| e.note.as_str()).collect();
        assert_eq!(notes, ["a", "c"]);
    }

    #[test]
    fn test_index_of_after_insert() {
        // Dates [2020-01-01, 2020-03-01]; a 2020-02-01 insert lands at 1.
        let mut c = OrderedCollection::new();
        c.insert(entry("2020-01-01", ""));
        c.insert(entry("2020-03-01", ""));
        let new = entry("2020-02-01", "");
        let id = new.id;
        c.insert(new);
        assert_eq!(c.index_of(id), Some(1));
    }

    #[test]
    fn test_index_of_missing() {
        let c = OrderedCollection::new();
        assert_eq!(c.index_of(uuid::Uuid::new_v4()), None);
    }

    #[test]
    fn test_from_entries_sorts_on_load() {
        let c = OrderedCollection::from_entries(vec![
            entry("2021-01-01", "later"),
            entry("2019-01-01", "earlier"),
        ]);
        assert_eq!(c.get(0).unwrap().note, "earlier");
    }

    proptest! {
        /// Sort invariant: after any sequence of inserts and updates with
        /// arbitrary dates, the collection is non-decreasing by date.
        #[test]
        fn prop_sorted_after_any_mutation_sequence(
            ops in prop::collection::vec((0u8..2, 0u16..200, 1u64..=12, 1u64..=28), 1..40)
        ) {
            let mut c = OrderedCollection::new();
            for (op, seed, month, day) in ops {
                let date = format!("{:04}-{:02}-{:02}", 2000 + (seed % 30), month, day);
                let e = Entry::new("x".into(), date, String::new());
                if op == 0 || c.is_empty() {
                    c.insert(e);
                } else {
                    let idx = (seed as usize) % c.len();
                    let replaced = c.get(idx).unwrap().replacing(e.url, e.date, e.note);
                    c.update(idx, replaced);
                }
                prop_assert!(is_sorted(&c));
            }
        }

        /// Stability: under inserts alone, same-date entries keep their
        /// relative insertion order after every re-sort.
        #[test]
        fn prop_ties_keep_insertion_order(
            dates in prop::collection::vec((1u64..=12, 1u64..=28), 1..40)
        ) {
            let mut c = OrderedCollection::new();
            for (i, (month, day)) in dates.into_iter().enumerate() {
                let date = format!("2020-{month:02}-{day:02}");
                c.insert(Entry::new("x".into(), date, i.to_string()));
                prop_assert!(is_sorted(&c));
                for w in c.as_slice().windows(2) {
                    if w[0].sort_key() == w[1].sort_key() {
                        let (a, b): (usize, usize) =
                            (w[0].note.parse().unwrap(), w[1].note.parse().unwrap());
                        prop_assert!(a < b, "tie broke insertion order: {a} after {b}");
                    }
                }
            }
        }
    }
}
