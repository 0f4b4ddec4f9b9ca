//! Workbook decoder (xlsx, xlsm, xlsb, xls, ods)

use std::borrow::Cow;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::DecodeError;
use crate::model::{CellValue, Table};

use super::Decoder;

/// Decoder for spreadsheet workbooks; reads the first sheet only
pub struct WorkbookDecoder;

impl Decoder for WorkbookDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Table, DecodeError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let range: Range<Data> = workbook
            .worksheet_range_at(0)
            .ok_or(DecodeError::NoSheets)??;

        Ok(range_to_table(&range))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(
            ext.to_lowercase().as_str(),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods"
        )
    }

    fn name(&self) -> &'static str {
        "workbook"
    }
}

/// Turn the used range into rows.
///
/// Rows keep their leading empty cells but lose trailing ones; a blank row
/// inside the range becomes a row with no cells.
fn range_to_table(range: &Range<Data>) -> Table {
    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

    let mut table = Table::with_capacity(range.height());
    for (offset, row) in range.rows().enumerate() {
        let mut cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        while cells.last().is_some_and(CellValue::is_empty) {
            cells.pop();
        }
        table.add_row(cells, first_line + offset);
    }
    table
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(Cow::Owned(s.clone())),
        Data::Float(f) => CellValue::number(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            // calamine ExcelDateTime - use Display to convert and parse
            let s = format!("{}", dt);
            if let Ok(datetime) =
                chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S%.f")
            {
                datetime_or_date(datetime)
            } else if let Ok(datetime) =
                chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
            {
                datetime_or_date(datetime)
            } else if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                CellValue::Date(date)
            } else {
                CellValue::String(Cow::Owned(s))
            }
        }
        Data::DateTimeIso(s) => {
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                datetime_or_date(dt)
            } else if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                CellValue::Date(d)
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::DurationIso(s) => CellValue::String(Cow::Owned(s.clone())),
        Data::Error(e) => CellValue::String(Cow::Owned(format!("#{:?}", e))),
    }
}

/// Midnight timestamps are plain dates
fn datetime_or_date(dt: chrono::NaiveDateTime) -> CellValue {
    if dt.time() == chrono::NaiveTime::MIN {
        CellValue::Date(dt.date())
    } else {
        CellValue::DateTime(dt)
    }
}
