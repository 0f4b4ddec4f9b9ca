//! Data model for tabular data representation

mod key;
mod table;

pub use key::KeyIndex;
pub use table::{CellValue, Row, Table};
