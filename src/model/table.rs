//! Table, Row, and Cell data structures

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// The key of a row with no cells.
static ABSENT_KEY: CellValue = CellValue::Empty;

/// A cell value with type information.
///
/// Serializes untagged: `Empty` as null, dates as ISO strings.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // NaN equals itself so that Eq stays reflexive
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            // Int and Float are both "number", equal only when exactly equal
            (CellValue::Int(a), CellValue::Float(b)) => integral_value(*b) == Some(*a),
            (CellValue::Float(a), CellValue::Int(b)) => integral_value(*a) == Some(*b),
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Numbers that compare equal must hash equal, whatever their encoding.
        match self {
            CellValue::Int(i) => {
                0u8.hash(state);
                i.hash(state);
            }
            CellValue::Float(f) => match integral_value(*f) {
                Some(i) => {
                    0u8.hash(state);
                    i.hash(state);
                }
                None => {
                    1u8.hash(state);
                    if f.is_nan() {
                        f64::NAN.to_bits().hash(state);
                    } else {
                        f.to_bits().hash(state);
                    }
                }
            },
            CellValue::Empty => 2u8.hash(state),
            CellValue::Bool(b) => {
                3u8.hash(state);
                b.hash(state);
            }
            CellValue::String(s) => {
                4u8.hash(state);
                s.hash(state);
            }
            CellValue::Date(d) => {
                5u8.hash(state);
                d.hash(state);
            }
            CellValue::DateTime(dt) => {
                6u8.hash(state);
                dt.hash(state);
            }
        }
    }
}

/// The `i64` a float is exactly equal to, if any.
fn integral_value(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        let i = f as i64;
        (i as f64 == f).then_some(i)
    } else {
        None
    }
}

impl CellValue {
    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
            CellValue::Date(d) => Cow::Owned(d.to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.to_string()),
        }
    }

    /// Normalize a float that holds an integral value to `Int`
    pub fn number(f: f64) -> Self {
        match integral_value(f) {
            Some(i) => CellValue::Int(i),
            None => CellValue::Float(f),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(Cow::Owned(s))
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

/// A row in the table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values in column order, of any length
    pub cells: Vec<CellValue>,
    /// Original row number in the source (1-indexed)
    pub source_line: usize,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// The join key: the first cell, or `Empty` for a row with no cells
    pub fn key(&self) -> &CellValue {
        self.cells.first().unwrap_or(&ABSENT_KEY)
    }

    /// Number of cells in this row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered sequence of rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// All rows in source order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with room for `capacity` rows
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Append a row read from `source_line`
    pub fn add_row(&mut self, cells: Vec<CellValue>, source_line: usize) {
        self.rows.push(Row::new(cells, source_line));
    }

    /// Append a row, numbering it after the last one
    pub fn push(&mut self, cells: Vec<CellValue>) {
        let line = self.rows.len() + 1;
        self.add_row(cells, line);
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of the widest row
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }

    /// Plain cell grid, dropping source positions
    pub fn to_cells(&self) -> Vec<Vec<CellValue>> {
        self.rows.iter().map(|r| r.cells.clone()).collect()
    }
}

impl<T> From<Vec<Vec<T>>> for Table
where
    T: Into<CellValue>,
{
    fn from(rows: Vec<Vec<T>>) -> Self {
        let mut table = Table::with_capacity(rows.len());
        for row in rows {
            table.push(row.into_iter().map(Into::into).collect());
        }
        table
    }
}

impl FromIterator<Vec<CellValue>> for Table {
    fn from_iter<I: IntoIterator<Item = Vec<CellValue>>>(iter: I) -> Self {
        let mut table = Table::new();
        for cells in iter {
            table.push(cells);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHasher;

    fn hash_of(v: &CellValue) -> u64 {
        let mut hasher = FxHasher::default();
        v.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_number_equality_across_encodings() {
        assert_eq!(CellValue::Int(1), CellValue::Float(1.0));
        assert_eq!(hash_of(&CellValue::Int(1)), hash_of(&CellValue::Float(1.0)));
        assert_eq!(hash_of(&CellValue::Float(0.0)), hash_of(&CellValue::Float(-0.0)));
        assert_ne!(CellValue::Int(1), CellValue::from("1"));
        assert_ne!(CellValue::Empty, CellValue::from(""));
    }

    #[test]
    fn test_large_numbers_compare_exactly() {
        let two_53 = 1i64 << 53;
        assert_eq!(CellValue::Int(two_53), CellValue::Float(two_53 as f64));
        assert_ne!(CellValue::Int(two_53 + 1), CellValue::Float(two_53 as f64));
        assert_ne!(CellValue::Float(two_53 as f64), CellValue::Int(two_53 + 1));
        // 2^63 is past i64::MAX
        assert_ne!(CellValue::Int(i64::MAX), CellValue::Float(9_223_372_036_854_775_808.0));

        for (a, b) in [
            (CellValue::Int(two_53), CellValue::Float(two_53 as f64)),
            (CellValue::Int(-two_53), CellValue::Float(-(two_53 as f64))),
            (CellValue::Int(i64::MIN), CellValue::Float(i64::MIN as f64)),
        ] {
            assert_eq!(a, b);
            assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    #[test]
    fn test_row_key() {
        let row = Row::new(vec!["A".into(), 1i64.into()], 1);
        assert_eq!(row.key(), &CellValue::from("A"));

        let empty = Row::new(Vec::new(), 2);
        assert!(empty.key().is_empty());
    }

    #[test]
    fn test_number_normalization() {
        assert!(matches!(CellValue::number(3.0), CellValue::Int(3)));
        assert!(matches!(CellValue::number(3.5), CellValue::Float(_)));
    }

    #[test]
    fn test_table_from_rows() {
        let table = Table::from(vec![vec!["A", "B"], vec!["C"]]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.max_width(), 2);
        assert_eq!(table.rows[1].source_line, 2);
    }
}
