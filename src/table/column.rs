//! Named, kind-tagged value sequences.

use crate::table::{ColumnKind, Value};
use serde::{Deserialize, Serialize};

/// One column of a table: a name, its cached kind, and one value per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<Value>,
}

impl Column {
    /// Build a column, classifying its kind from the name and values.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let name = name.into();
        let kind = ColumnKind::classify(&name, &values);
        Self { name, kind, values }
    }

    /// Build a column with an explicit kind, bypassing classification.
    /// Used for derived columns whose kind is fixed by the operator.
    pub fn with_kind(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-missing numeric values, in row order.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_number).collect()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }
}
