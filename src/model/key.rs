//! Key index over a table's first column

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use crate::config::EmptyKeyPolicy;
use crate::observability::log_debug;

use super::table::{CellValue, Table};

/// Maps each key to the first row that carries it.
///
/// Later rows with an already indexed key are skipped, so a lookup gives the
/// same answer as a front-to-back linear scan.
pub struct KeyIndex<'a> {
    first_rows: FxHashMap<&'a CellValue, usize>,
    duplicates: usize,
    empty_keys: EmptyKeyPolicy,
}

impl<'a> KeyIndex<'a> {
    /// Build the index in one pass over `table`
    pub fn build(table: &'a Table, empty_keys: EmptyKeyPolicy) -> Self {
        let mut first_rows =
            FxHashMap::with_capacity_and_hasher(table.row_count(), Default::default());
        let mut duplicates = 0;

        for (idx, row) in table.rows.iter().enumerate() {
            let key = row.key();
            if key.is_empty() && empty_keys == EmptyKeyPolicy::NeverMatch {
                continue;
            }

            match first_rows.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(first) => {
                    duplicates += 1;
                    log_debug!(
                        component = "key_index",
                        event = "duplicate_key_ignored",
                        key = %key,
                        first_line = table.rows[*first.get()].source_line,
                        ignored_line = row.source_line,
                    );
                }
            }
        }

        Self {
            first_rows,
            duplicates,
            empty_keys,
        }
    }

    /// Index of the first row whose key equals `key`
    pub fn lookup(&self, key: &CellValue) -> Option<usize> {
        if key.is_empty() && self.empty_keys == EmptyKeyPolicy::NeverMatch {
            return None;
        }
        self.first_rows.get(key).copied()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.first_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_rows.is_empty()
    }

    /// Rows skipped because an earlier row had the same key
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row_wins() {
        let table = Table::from(vec![vec!["A", "x"], vec!["B", "y"], vec!["A", "z"]]);
        let index = KeyIndex::build(&table, EmptyKeyPolicy::Match);

        assert_eq!(index.lookup(&"A".into()), Some(0));
        assert_eq!(index.lookup(&"B".into()), Some(1));
        assert_eq!(index.lookup(&"C".into()), None);
        assert_eq!(index.len(), 2);
        assert_eq!(index.duplicates(), 1);
    }

    #[test]
    fn test_empty_key_policies() {
        let mut table = Table::new();
        table.push(vec!["A".into()]);
        table.push(Vec::new());
        table.push(vec![CellValue::Empty, "blank".into()]);

        let matching = KeyIndex::build(&table, EmptyKeyPolicy::Match);
        assert_eq!(matching.lookup(&CellValue::Empty), Some(1));
        assert_eq!(matching.duplicates(), 1);

        let never = KeyIndex::build(&table, EmptyKeyPolicy::NeverMatch);
        assert_eq!(never.lookup(&CellValue::Empty), None);
        assert_eq!(never.len(), 1);
        assert_eq!(never.duplicates(), 0);
    }

    #[test]
    fn test_numeric_keys_across_encodings() {
        let table = Table::from(vec![vec![CellValue::Float(7.0), "seven".into()]]);
        let index = KeyIndex::build(&table, EmptyKeyPolicy::Match);

        assert_eq!(index.lookup(&CellValue::Int(7)), Some(0));
        assert_eq!(index.lookup(&"7".into()), None);
    }
}
