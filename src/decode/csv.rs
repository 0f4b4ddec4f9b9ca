//! CSV decoder

use std::borrow::Cow;

use crate::error::DecodeError;
use crate::model::{CellValue, Table};

use super::Decoder;

/// Decoder for headerless, ragged CSV
pub struct CsvDecoder;

impl Decoder for CsvDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Table, DecodeError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut table = Table::new();
        for result in csv_reader.records() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(table.row_count() + 1);

            let mut cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();
            while cells.last().is_some_and(CellValue::is_empty) {
                cells.pop();
            }

            table.add_row(cells, line);
        }

        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

/// Parse a field into a CellValue with type inference
fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return CellValue::Empty;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return CellValue::Float(f);
        }
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(date);
    }

    // Try parsing as datetime (ISO 8601)
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return CellValue::DateTime(dt);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return CellValue::DateTime(dt);
    }

    // Text is kept as written
    CellValue::String(Cow::Owned(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_value() {
        assert_eq!(parse_cell_value(""), CellValue::Empty);
        assert_eq!(parse_cell_value("TRUE"), CellValue::Bool(true));
        assert_eq!(parse_cell_value("false"), CellValue::Bool(false));
        assert!(matches!(parse_cell_value("42"), CellValue::Int(42)));
        assert!(matches!(parse_cell_value("3.25"), CellValue::Float(f) if f == 3.25));
        assert_eq!(parse_cell_value("NaN"), CellValue::from("NaN"));
        assert_eq!(
            parse_cell_value("2024-03-01"),
            CellValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(parse_cell_value(" hello"), CellValue::from(" hello"));
    }

    #[test]
    fn test_ragged_rows() {
        let table = CsvDecoder.decode(b"id,name,extra\nA,1\nB,2,x,\n\nC\n").unwrap();
        assert_eq!(
            table.to_cells(),
            vec![
                vec!["id".into(), "name".into(), "extra".into()],
                vec!["A".into(), CellValue::Int(1)],
                vec!["B".into(), CellValue::Int(2), "x".into()],
                vec!["C".into()],
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_skipped_but_delimiter_lines_are_kept() {
        let table = CsvDecoder.decode(b"A,1\n\n,,\nB,2\n").unwrap();
        assert_eq!(
            table.to_cells(),
            vec![
                vec!["A".into(), CellValue::Int(1)],
                vec![],
                vec!["B".into(), CellValue::Int(2)],
            ]
        );
        assert!(table.rows[1].key().is_empty());
    }
}
