//! JSON output format

use crate::error::EncodeError;
use crate::model::{CellValue, Table};

use super::Encoder;

/// Encoder writing an array of row arrays
pub struct JsonEncoder {
    pretty: bool,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, table: &Table) -> Result<Vec<u8>, EncodeError> {
        let rows: Vec<&[CellValue]> = table.rows.iter().map(|row| row.cells.as_slice()).collect();

        let mut bytes = if self.pretty {
            serde_json::to_vec_pretty(&rows)?
        } else {
            serde_json::to_vec(&rows)?
        };
        bytes.push(b'\n');

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_rows() {
        let table = Table::from(vec![
            vec![CellValue::from("A"), CellValue::Int(1), CellValue::from("x")],
            vec![CellValue::from("B"), CellValue::Float(2.5), CellValue::Empty],
        ]);

        let bytes = JsonEncoder::compact().encode(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "[[\"A\",1,\"x\"],[\"B\",2.5,null]]\n"
        );
    }

    #[test]
    fn test_dates_are_iso_strings() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let table = Table::from(vec![vec![
            CellValue::Date(date),
            CellValue::DateTime(date.and_hms_opt(9, 30, 0).unwrap()),
            CellValue::Bool(false),
        ]]);

        let bytes = JsonEncoder::compact().encode(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "[[\"2024-03-01\",\"2024-03-01T09:30:00\",false]]\n"
        );
    }
}
