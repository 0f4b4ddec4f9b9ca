//! Row matching algorithm

use crate::config::EmptyKeyPolicy;
use crate::model::{KeyIndex, Row, Table};

/// Row matcher using a first-occurrence key index over the right table
pub struct RowMatcher<'a> {
    right: &'a Table,
    index: KeyIndex<'a>,
}

impl<'a> RowMatcher<'a> {
    /// Index `right` once, ahead of any lookups
    pub fn new(right: &'a Table, empty_keys: EmptyKeyPolicy) -> Self {
        Self {
            right,
            index: KeyIndex::build(right, empty_keys),
        }
    }

    /// First right row whose key equals the key of `left_row`
    pub fn find(&self, left_row: &Row) -> Option<&'a Row> {
        self.index
            .lookup(left_row.key())
            .map(|idx| &self.right.rows[idx])
    }

    /// Pair every left row with its match, in left order
    pub fn match_rows<'l>(&self, left: &'l Table) -> Vec<(&'l Row, Option<&'a Row>)> {
        left.rows.iter().map(|row| (row, self.find(row))).collect()
    }

    /// Right rows shadowed by an earlier row with the same key
    pub fn duplicate_keys(&self) -> usize {
        self.index.duplicates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_rows_keeps_left_order() {
        let left = Table::from(vec![vec!["B"], vec!["A"], vec!["Z"]]);
        let right = Table::from(vec![vec!["A", "a"], vec!["B", "b"]]);
        let matcher = RowMatcher::new(&right, EmptyKeyPolicy::Match);

        let pairs = matcher.match_rows(&left);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].1.map(|r| r.source_line), Some(2));
        assert_eq!(pairs[1].1.map(|r| r.source_line), Some(1));
        assert!(pairs[2].1.is_none());
    }
}
