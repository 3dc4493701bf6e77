//! Diff of an incoming batch against existing local records

use crate::domain::Record;
use std::collections::HashMap;

/// Classification of one incoming batch
///
/// The three buckets are disjoint and together hold every incoming record.
#[derive(Debug, Clone, PartialEq)]
pub struct Sortout<R> {
    /// Keys not present locally
    pub insert: Vec<R>,
    /// Keys present locally with a different payload
    pub update: Vec<R>,
    /// Keys present locally with an identical payload
    pub ignore: Vec<R>,
}

impl<R> Default for Sortout<R> {
    fn default() -> Self {
        Self {
            insert: Vec::new(),
            update: Vec::new(),
            ignore: Vec::new(),
        }
    }
}

impl<R> Sortout<R> {
    pub fn insert_size(&self) -> usize {
        self.insert.len()
    }

    pub fn update_size(&self) -> usize {
        self.update.len()
    }

    pub fn ignore_size(&self) -> usize {
        self.ignore.len()
    }

    pub fn total(&self) -> usize {
        self.insert.len() + self.update.len() + self.ignore.len()
    }

    /// Appends another sortout's buckets to this one
    pub fn merge(&mut self, other: Sortout<R>) {
        self.insert.extend(other.insert);
        self.update.extend(other.update);
        self.ignore.extend(other.ignore);
    }

    /// Whether applying the sortout would write anything
    pub fn has_changes(&self) -> bool {
        !self.insert.is_empty() || !self.update.is_empty()
    }
}

/// Classifies `incoming` against `existing`
///
/// Within one batch a repeated key is compared with its earlier occurrence, so the first
/// occurrence of a new key lands in `insert` and later differing copies in `update`.
pub fn partition<R: Record>(existing: Vec<R>, incoming: Vec<R>) -> Sortout<R> {
    let mut index: HashMap<R::Key, R> = existing.into_iter().map(|r| (r.key(), r)).collect();
    let mut sortout = Sortout::default();

    for record in incoming {
        let key = record.key();
        match index.get(&key) {
            None => {
                index.insert(key, record.clone());
                sortout.insert.push(record);
            }
            Some(current) if current.same_content(&record) => {
                sortout.ignore.push(record);
            }
            Some(_) => {
                index.insert(key, record.clone());
                sortout.update.push(record);
            }
        }
    }

    sortout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Hearing, Measure, MeasureType};

    fn bill(number: i32, title: &str) -> Measure {
        Measure {
            measure_title: title.to_string(),
            ..Measure::new(2020, MeasureType::Hb, number)
        }
    }

    #[test]
    fn test_all_new_records_are_inserted() {
        let sortout = partition(Vec::new(), vec![bill(1, "a"), bill(2, "b"), bill(3, "c")]);
        assert_eq!(sortout.insert_size(), 3);
        assert_eq!(sortout.update_size(), 0);
        assert_eq!(sortout.ignore_size(), 0);
        assert!(sortout.has_changes());
    }

    #[test]
    fn test_mixed_batch() {
        let existing = vec![bill(1, "a"), bill(2, "b")];
        let incoming = vec![bill(1, "a"), bill(2, "changed"), bill(3, "c")];
        let sortout = partition(existing, incoming);

        assert_eq!(sortout.ignore, vec![bill(1, "a")]);
        assert_eq!(sortout.update, vec![bill(2, "changed")]);
        assert_eq!(sortout.insert, vec![bill(3, "c")]);
        assert_eq!(sortout.total(), 3);
    }

    #[test]
    fn test_last_updated_does_not_count_as_change() {
        let mut stored = bill(1, "a");
        stored.last_updated = 42;
        let sortout = partition(vec![stored], vec![bill(1, "a")]);
        assert_eq!(sortout.ignore_size(), 1);
        assert!(!sortout.has_changes());
    }

    #[test]
    fn test_unknown_types_compare_like_any_other() {
        let stored = Measure::new(2020, MeasureType::Unknown, 7);
        let sortout = partition(vec![stored.clone()], vec![stored]);
        assert_eq!(sortout.ignore_size(), 1);
    }

    #[test]
    fn test_duplicate_keys_in_batch() {
        let sortout = partition(
            Vec::new(),
            vec![bill(1, "first"), bill(1, "first"), bill(1, "second")],
        );
        assert_eq!(sortout.insert, vec![bill(1, "first")]);
        assert_eq!(sortout.ignore, vec![bill(1, "first")]);
        assert_eq!(sortout.update, vec![bill(1, "second")]);
    }

    #[test]
    fn test_hearing_room_change_is_update() {
        let stored = Hearing {
            room: "ROOM2".to_string(),
            ..Hearing::new(2020, MeasureType::Hb, 2, "HEARING_2")
        };
        let moved = Hearing {
            room: "XXX2".to_string(),
            ..stored.clone()
        };
        let sortout = partition(vec![stored], vec![moved.clone()]);
        assert_eq!(sortout.update, vec![moved]);
    }
}
