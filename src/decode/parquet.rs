//! Parquet decoder

use std::borrow::Cow;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType as ArrowType, Date32Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType,
    TimestampNanosecondType, TimestampSecondType, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::DecodeError;
use crate::model::{CellValue, Table};

use super::Decoder;

/// Days from 0001-01-01 (CE day 1) to the Unix epoch
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Decoder for Parquet files; the first row holds the field names
pub struct ParquetDecoder;

impl Decoder for ParquetDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Table, DecodeError> {
        let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::copy_from_slice(bytes))?;
        let schema = builder.schema().clone();
        let reader = builder.build()?;

        let mut table = Table::new();
        table.push(
            schema
                .fields()
                .iter()
                .map(|field| CellValue::from(field.name().as_str()))
                .collect(),
        );

        for batch_result in reader {
            let batch = batch_result?;

            for row_idx in 0..batch.num_rows() {
                let mut cells: Vec<CellValue> = batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell_value(col, row_idx))
                    .collect();
                while cells.last().is_some_and(CellValue::is_empty) {
                    cells.pop();
                }
                table.push(cells);
            }
        }

        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "parquet" | "pq")
    }

    fn name(&self) -> &'static str {
        "parquet"
    }
}

fn extract_cell_value(array: &ArrayRef, row_idx: usize) -> CellValue {
    if array.is_null(row_idx) {
        return CellValue::Empty;
    }

    match array.data_type() {
        ArrowType::Boolean => CellValue::Bool(array.as_boolean().value(row_idx)),
        ArrowType::Int8 => CellValue::Int(array.as_primitive::<Int8Type>().value(row_idx) as i64),
        ArrowType::Int16 => CellValue::Int(array.as_primitive::<Int16Type>().value(row_idx) as i64),
        ArrowType::Int32 => CellValue::Int(array.as_primitive::<Int32Type>().value(row_idx) as i64),
        ArrowType::Int64 => CellValue::Int(array.as_primitive::<Int64Type>().value(row_idx)),
        ArrowType::UInt8 => CellValue::Int(array.as_primitive::<UInt8Type>().value(row_idx) as i64),
        ArrowType::UInt16 => {
            CellValue::Int(array.as_primitive::<UInt16Type>().value(row_idx) as i64)
        }
        ArrowType::UInt32 => {
            CellValue::Int(array.as_primitive::<UInt32Type>().value(row_idx) as i64)
        }
        ArrowType::UInt64 => {
            let v = array.as_primitive::<UInt64Type>().value(row_idx);
            i64::try_from(v)
                .map(CellValue::Int)
                .unwrap_or(CellValue::Float(v as f64))
        }
        ArrowType::Float32 => {
            CellValue::Float(array.as_primitive::<Float32Type>().value(row_idx) as f64)
        }
        ArrowType::Float64 => CellValue::Float(array.as_primitive::<Float64Type>().value(row_idx)),
        ArrowType::Utf8 => CellValue::String(Cow::Owned(
            array.as_string::<i32>().value(row_idx).to_string(),
        )),
        ArrowType::LargeUtf8 => CellValue::String(Cow::Owned(
            array.as_string::<i64>().value(row_idx).to_string(),
        )),
        ArrowType::Date32 => {
            let days = array.as_primitive::<Date32Type>().value(row_idx);
            days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
                .and_then(chrono::NaiveDate::from_num_days_from_ce_opt)
                .map(CellValue::Date)
                .unwrap_or(CellValue::Int(days as i64))
        }
        ArrowType::Timestamp(unit, _) => {
            let nanos = match unit {
                TimeUnit::Second => array
                    .as_primitive::<TimestampSecondType>()
                    .value(row_idx)
                    .checked_mul(1_000_000_000),
                TimeUnit::Millisecond => array
                    .as_primitive::<TimestampMillisecondType>()
                    .value(row_idx)
                    .checked_mul(1_000_000),
                TimeUnit::Microsecond => array
                    .as_primitive::<TimestampMicrosecondType>()
                    .value(row_idx)
                    .checked_mul(1_000),
                TimeUnit::Nanosecond => Some(
                    array
                        .as_primitive::<TimestampNanosecondType>()
                        .value(row_idx),
                ),
            };
            match nanos {
                Some(nanos) => {
                    CellValue::DateTime(chrono::DateTime::from_timestamp_nanos(nanos).naive_utc())
                }
                None => display_value(array, row_idx),
            }
        }
        _ => display_value(array, row_idx),
    }
}

/// Fallback: the value as arrow displays it
fn display_value(array: &ArrayRef, row_idx: usize) -> CellValue {
    match ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default()) {
        Ok(fmt) => CellValue::String(Cow::Owned(fmt.value(row_idx).to_string())),
        Err(_) => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_parquet(batch: &RecordBatch) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buf, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        buf
    }

    #[test]
    fn test_decode_with_header_row() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("sku", ArrowType::Utf8, false),
            Field::new("qty", ArrowType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])) as ArrayRef,
                Arc::new(Int64Array::from(vec![Some(5), None])) as ArrayRef,
            ],
        )
        .unwrap();

        let table = ParquetDecoder.decode(&write_parquet(&batch)).unwrap();
        assert_eq!(
            table.to_cells(),
            vec![
                vec!["sku".into(), "qty".into()],
                vec!["A".into(), CellValue::Int(5)],
                vec!["B".into()],
            ]
        );
    }

    #[test]
    fn test_not_parquet() {
        assert!(matches!(
            ParquetDecoder.decode(b"a,b,c"),
            Err(DecodeError::Parquet(_))
        ));
    }
}
