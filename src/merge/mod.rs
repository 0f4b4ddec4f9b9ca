//! Left-join merge engine
//!
//! Every left row appears exactly once in the output, in input order. A left
//! row is extended with the trailing cells (everything after the key) of the
//! first right row sharing its key, or padded with empty cells when no right
//! row does.

mod row_match;

use crate::config::{MergeOptions, PaddingPolicy};
use crate::model::{CellValue, Row, Table};
use crate::observability::log_debug;

pub use row_match::RowMatcher;

/// Statistics about a merge
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub left_rows: usize,
    pub right_rows: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Right rows ignored because an earlier row had the same key
    pub duplicate_right_keys: usize,
}

impl MergeStats {
    /// Check if every left row found a partner
    pub fn all_matched(&self) -> bool {
        self.unmatched == 0
    }
}

/// Result of merging two tables
#[derive(Debug)]
pub struct MergeOutcome {
    /// One row per left row
    pub table: Table,
    pub stats: MergeStats,
}

/// Main merge engine
#[derive(Debug, Default, Clone)]
pub struct MergeEngine {
    options: MergeOptions,
}

impl MergeEngine {
    /// Create a new merge engine with options
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Left-join `left` with `right` on the first column
    pub fn merge(&self, left: &Table, right: &Table) -> MergeOutcome {
        let matcher = RowMatcher::new(right, self.options.empty_keys);
        let padding = self.padding_width(right);

        let mut stats = MergeStats {
            left_rows: left.row_count(),
            right_rows: right.row_count(),
            duplicate_right_keys: matcher.duplicate_keys(),
            ..Default::default()
        };

        let mut table = Table::with_capacity(left.row_count());
        for (left_row, right_row) in matcher.match_rows(left) {
            let cells = match right_row {
                Some(right_row) => {
                    stats.matched += 1;
                    join_cells(left_row, right_row)
                }
                None => {
                    stats.unmatched += 1;
                    pad_cells(left_row, padding)
                }
            };
            table.add_row(cells, left_row.source_line);
        }

        log_debug!(
            component = "merge",
            event = "merge_complete",
            left_rows = stats.left_rows,
            right_rows = stats.right_rows,
            matched = stats.matched,
            unmatched = stats.unmatched,
        );

        MergeOutcome { table, stats }
    }

    /// Empty cells appended to an unmatched row
    fn padding_width(&self, right: &Table) -> usize {
        match self.options.padding {
            PaddingPolicy::Single => 1,
            PaddingPolicy::RightWidth => right.max_width().saturating_sub(1),
        }
    }
}

fn join_cells(left_row: &Row, right_row: &Row) -> Vec<CellValue> {
    let trailing = right_row.cells.get(1..).unwrap_or_default();
    let mut cells = Vec::with_capacity(left_row.len() + trailing.len());
    cells.extend_from_slice(&left_row.cells);
    cells.extend_from_slice(trailing);
    cells
}

fn pad_cells(left_row: &Row, padding: usize) -> Vec<CellValue> {
    let mut cells = Vec::with_capacity(left_row.len() + padding);
    cells.extend_from_slice(&left_row.cells);
    cells.resize(left_row.len() + padding, CellValue::Empty);
    cells
}

/// Merge with default options: first-match-wins, one placeholder per
/// unmatched row, absent keys matching each other.
pub fn merge(left: &Table, right: &Table) -> Table {
    MergeEngine::default().merge(left, right).table
}
