//! Single-sheet xlsx encoder

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::config::DEFAULT_SHEET_NAME;
use crate::error::EncodeError;
use crate::model::{CellValue, Table};

use super::Encoder;

/// Rows available on one worksheet
const MAX_ROWS: usize = 1_048_576;
/// Columns available on one worksheet
const MAX_COLUMNS: usize = 16_384;

/// Encoder writing one worksheet; empty cells are left blank
pub struct XlsxEncoder {
    sheet_name: String,
}

impl XlsxEncoder {
    pub fn new() -> Self {
        Self::with_sheet_name(DEFAULT_SHEET_NAME)
    }

    pub fn with_sheet_name(name: &str) -> Self {
        Self {
            sheet_name: name.to_string(),
        }
    }
}

impl Default for XlsxEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for XlsxEncoder {
    fn encode(&self, table: &Table) -> Result<Vec<u8>, EncodeError> {
        let rows = table.row_count();
        let columns = table.max_width();
        if rows > MAX_ROWS || columns > MAX_COLUMNS {
            return Err(EncodeError::GridOverflow { rows, columns });
        }

        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.cells.iter().enumerate() {
                // Bounds were checked against the grid limits above
                let (r, c) = (row_idx as u32, col_idx as u16);
                write_cell(worksheet, r, c, cell, &date_format, &datetime_format)?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    date_format: &Format,
    datetime_format: &Format,
) -> Result<(), EncodeError> {
    match cell {
        CellValue::Empty => {}
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(f) if f.is_finite() => {
            worksheet.write_number(row, col, *f)?;
        }
        CellValue::Float(f) => {
            worksheet.write_string(row, col, f.to_string())?;
        }
        CellValue::String(s) => {
            worksheet.write_string(row, col, s.as_ref())?;
        }
        CellValue::Date(d) => {
            worksheet.write_datetime_with_format(row, col, d, date_format)?;
        }
        CellValue::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, datetime_format)?;
        }
    }
    Ok(())
}
