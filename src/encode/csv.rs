//! CSV encoder

use crate::error::EncodeError;
use crate::model::Table;

use super::Encoder;

/// Encoder writing one CSV record per row, each as wide as its row
pub struct CsvEncoder;

impl Encoder for CsvEncoder {
    fn encode(&self, table: &Table) -> Result<Vec<u8>, EncodeError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        for row in &table.rows {
            writer.write_record(row.cells.iter().map(|c| c.display().into_owned()))?;
        }

        writer.into_inner().map_err(|e| EncodeError::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_ragged_output() {
        let table = Table::from(vec![
            vec![CellValue::from("A"), CellValue::Int(1), CellValue::from("x, y")],
            vec![CellValue::from("B"), CellValue::Empty],
        ]);

        let bytes = CsvEncoder.encode(&table).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "A,1,\"x, y\"\nB,\n");
    }
}
