//! TAP result tables
//!
//! Both catalog services answer ADQL queries through a TAP `sync` endpoint
//! with JSON output, in one of two layouts:
//!
//! - column metadata plus row arrays: `{"metadata": [{"name": ..}, ..], "data": [[..], ..]}`
//! - a list of row objects: `[{"ra": .., "dec": ..}, ..]`
//!
//! Either way the result is read into named columns. Columns whose values are
//! all numbers or nulls become [`MaskedArray`]s with nulls masked; anything
//! else is kept as text.

use std::collections::HashMap;

use serde_json::Value;

use crate::normalize::MaskedArray;
use crate::{ExoskyError, Result};

static NULL: Value = Value::Null;

/// A single result column
#[derive(Debug, Clone, PartialEq)]
pub enum TapColumn {
    Numeric(MaskedArray),
    Text(Vec<Option<String>>),
}

impl TapColumn {
    fn from_cells(cells: &[&Value]) -> Self {
        let numeric = cells.iter().all(|v| v.is_number() || v.is_null());
        if numeric {
            let values: Vec<Option<f64>> = cells.iter().map(|v| v.as_f64()).collect();
            TapColumn::Numeric(MaskedArray::from_options(&values))
        } else {
            TapColumn::Text(cells.iter().map(|v| cell_text(v)).collect())
        }
    }

    /// Value at `row` rendered as text, `None` when null or masked
    pub fn text_at(&self, row: usize) -> Option<String> {
        match self {
            TapColumn::Numeric(array) => array.get(row).map(|v| v.to_string()),
            TapColumn::Text(values) => values.get(row).cloned().flatten(),
        }
    }
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Column-oriented TAP query result
#[derive(Debug, Clone, Default)]
pub struct TapTable {
    columns: HashMap<String, TapColumn>,
    rows: usize,
}

impl TapTable {
    /// Parse either TAP JSON layout
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(obj) if obj.contains_key("metadata") => {
                let names = obj
                    .get("metadata")
                    .and_then(Value::as_array)
                    .ok_or_else(|| ExoskyError::DataError("'metadata' should be a list".into()))?
                    .iter()
                    .map(|m| {
                        m.get("name")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .ok_or_else(|| {
                                ExoskyError::DataError("Column metadata without a name".into())
                            })
                    })
                    .collect::<Result<Vec<String>>>()?;

                let rows = obj
                    .get("data")
                    .and_then(Value::as_array)
                    .ok_or_else(|| ExoskyError::DataError("Missing 'data' field".into()))?;

                let mut cells: Vec<Vec<&Value>> = vec![Vec::with_capacity(rows.len()); names.len()];
                for (i, row) in rows.iter().enumerate() {
                    let row = row.as_array().ok_or_else(|| {
                        ExoskyError::DataError(format!("Row {} is not a list", i))
                    })?;
                    if row.len() != names.len() {
                        return Err(ExoskyError::DataError(format!(
                            "Row {} has {} values, expected {}",
                            i,
                            row.len(),
                            names.len()
                        )));
                    }
                    for (column, cell) in cells.iter_mut().zip(row) {
                        column.push(cell);
                    }
                }

                Ok(Self::from_columns(names, cells, rows.len()))
            }
            Value::Array(rows) => {
                let mut names: Vec<String> = Vec::new();
                for row in rows {
                    let obj = row.as_object().ok_or_else(|| {
                        ExoskyError::DataError("Expected a list of row objects".into())
                    })?;
                    for key in obj.keys() {
                        if !names.contains(key) {
                            names.push(key.clone());
                        }
                    }
                }

                // Keys absent from a row read as null
                let cells: Vec<Vec<&Value>> = names
                    .iter()
                    .map(|name| {
                        rows.iter()
                            .map(|row| row.get(name).unwrap_or(&NULL))
                            .collect()
                    })
                    .collect();

                Ok(Self::from_columns(names, cells, rows.len()))
            }
            _ => Err(ExoskyError::DataError(
                "Unrecognised TAP JSON layout".to_string(),
            )),
        }
    }

    fn from_columns(names: Vec<String>, cells: Vec<Vec<&Value>>, rows: usize) -> Self {
        let columns = names
            .into_iter()
            .zip(cells.iter().map(|c| TapColumn::from_cells(c)))
            .collect();
        Self { columns, rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column by name, as numbers or text
    pub fn column(&self, name: &str) -> Result<&TapColumn> {
        self.columns
            .get(name)
            .ok_or_else(|| ExoskyError::DataError(format!("Missing column: {}", name)))
    }

    /// Numeric column by name
    ///
    /// With no rows to infer types from, every column named in the metadata
    /// reads as an empty numeric column.
    pub fn numeric(&self, name: &str) -> Result<&MaskedArray> {
        match self.column(name)? {
            TapColumn::Numeric(array) => Ok(array),
            TapColumn::Text(_) => Err(ExoskyError::DataError(format!(
                "Column {} is not numeric",
                name
            ))),
        }
    }
}
