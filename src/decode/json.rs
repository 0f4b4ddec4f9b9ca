//! JSON array decoder

use std::borrow::Cow;

use indexmap::IndexSet;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::model::{CellValue, Table};

use super::Decoder;

/// Decoder for a top-level JSON array.
///
/// An array of arrays maps onto rows directly. An array of objects becomes a
/// header row of keys, in first-seen order, followed by one row per object.
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Table, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;

        let Value::Array(items) = value else {
            return Err(DecodeError::Shape("JSON must be a top-level array".to_string()));
        };

        if items.iter().all(Value::is_array) {
            Ok(items
                .iter()
                .filter_map(Value::as_array)
                .map(|row| {
                    let mut cells: Vec<CellValue> =
                        row.iter().map(|v| json_value_to_cell(Some(v))).collect();
                    while cells.last().is_some_and(CellValue::is_empty) {
                        cells.pop();
                    }
                    cells
                })
                .collect())
        } else if items.iter().all(Value::is_object) {
            let objects: Vec<&Map<String, Value>> =
                items.iter().filter_map(Value::as_object).collect();
            Ok(objects_to_table(&objects))
        } else {
            Err(DecodeError::Shape(
                "JSON array must hold only arrays or only objects".to_string(),
            ))
        }
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "json")
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

fn objects_to_table(objects: &[&Map<String, Value>]) -> Table {
    let mut column_names: IndexSet<&str> = IndexSet::new();
    for obj in objects {
        column_names.extend(obj.keys().map(String::as_str));
    }

    let mut table = Table::with_capacity(objects.len() + 1);
    if column_names.is_empty() {
        return table;
    }

    table.push(column_names.iter().map(|&name| CellValue::from(name)).collect());
    for obj in objects {
        let mut cells: Vec<CellValue> = column_names
            .iter()
            .map(|&key| json_value_to_cell(obj.get(key)))
            .collect();
        while cells.last().is_some_and(CellValue::is_empty) {
            cells.pop();
        }
        table.push(cells);
    }
    table
}

fn json_value_to_cell(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Empty,
        Some(Value::Bool(b)) => CellValue::Bool(*b),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::number(f)
            } else {
                CellValue::String(Cow::Owned(n.to_string()))
            }
        }
        Some(Value::String(s)) => CellValue::String(Cow::Owned(s.clone())),
        // Nested structures are kept as their JSON text
        Some(nested) => CellValue::String(Cow::Owned(nested.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_of_arrays() {
        let table = JsonDecoder
            .decode(br#"[["A", 1, true], [], ["B", null, 2.5], ["C", 3, null, null], [null]]"#)
            .unwrap();
        assert_eq!(
            table.to_cells(),
            vec![
                vec!["A".into(), CellValue::Int(1), CellValue::Bool(true)],
                vec![],
                vec!["B".into(), CellValue::Empty, CellValue::Float(2.5)],
                vec!["C".into(), CellValue::Int(3)],
                vec![],
            ]
        );
    }

    #[test]
    fn test_array_of_objects() {
        let table = JsonDecoder
            .decode(br#"[{"id": "A", "qty": 3}, {"id": "B", "note": "late"}]"#)
            .unwrap();
        assert_eq!(
            table.to_cells(),
            vec![
                vec!["id".into(), "qty".into(), "note".into()],
                vec!["A".into(), CellValue::Int(3)],
                vec!["B".into(), CellValue::Empty, "late".into()],
            ]
        );
    }

    #[test]
    fn test_rejects_non_tables() {
        assert!(matches!(
            JsonDecoder.decode(br#"{"id": 1}"#),
            Err(DecodeError::Shape(_))
        ));
        assert!(matches!(
            JsonDecoder.decode(br#"[[1], {"id": 1}]"#),
            Err(DecodeError::Shape(_))
        ));
        assert!(matches!(JsonDecoder.decode(b"[1,"), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_empty_array_is_empty_table() {
        assert!(JsonDecoder.decode(b"[]").unwrap().is_empty());
    }
}
