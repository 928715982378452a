//! Structural validation of datasets before any workbook mutation
//!
//! Every failure is reported as [`Error::Structure`]; callers that need to
//! know which part of the input is wrong have to inspect it themselves.

use crate::error::{Error, Result};
use crate::table::{CellValue, SheetSpec, TabularDataset};
use indexmap::IndexMap;
use serde_json::Value;

/// Check a typed dataset.
///
/// The type system already guarantees that sheets are mappings with a row
/// sequence and a column mapping, so only emptiness and column lengths are
/// left to verify.
pub fn validate(dataset: &TabularDataset) -> Result<()> {
    if dataset.is_empty() {
        return Err(Error::Structure);
    }

    for (_, sheet) in dataset.iter() {
        let rows_len = sheet.rows.len();
        if sheet.columns.values().any(|values| values.len() != rows_len) {
            return Err(Error::Structure);
        }
    }

    Ok(())
}

/// Check a loosely-typed document and convert it into a dataset.
///
/// Checks run in this order: non-empty object, every sheet an object, every
/// sheet holding both `rows` and `columns`, `rows` an array, `columns` an
/// object, every column an array as long as `rows`.
pub fn validate_value(value: &Value) -> Result<TabularDataset> {
    let sheets = match value {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(Error::Structure),
    };

    if !sheets.values().all(Value::is_object) {
        return Err(Error::Structure);
    }

    let mut dataset = TabularDataset::new();
    for (name, sheet) in sheets {
        let sheet = sheet.as_object().ok_or(Error::Structure)?;

        let (Some(rows), Some(columns)) = (sheet.get("rows"), sheet.get("columns")) else {
            return Err(Error::Structure);
        };
        let rows = rows.as_array().ok_or(Error::Structure)?;
        let columns = columns.as_object().ok_or(Error::Structure)?;

        let mut spec = SheetSpec {
            rows: rows.iter().map(CellValue::from_json).collect(),
            columns: IndexMap::with_capacity(columns.len()),
        };
        for (header, values) in columns {
            let values = values.as_array().ok_or(Error::Structure)?;
            if values.len() != rows.len() {
                return Err(Error::Structure);
            }
            spec.columns.insert(
                header.clone(),
                values.iter().map(CellValue::from_json).collect(),
            );
        }

        dataset.insert(name.clone(), spec);
    }

    Ok(dataset)
}

/// Parse a JSON dataset document and validate it
pub fn parse_dataset_str(content: &str) -> Result<TabularDataset> {
    let value: Value = serde_json::from_str(content)?;
    validate_value(&value)
}
