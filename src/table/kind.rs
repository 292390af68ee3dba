//! Column classification.

use crate::table::Value;
use serde::{Deserialize, Serialize};

/// Kind of a column.
///
/// Classification is deterministic and re-derivable from the table alone:
/// a name prefix wins (`c_`, `n_`, `b_`, `d_`), otherwise the values are
/// probed. The kind is computed once when a column enters a table and cached
/// on the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Categorical,
    Numerical,
    Binary,
    Date,
}

impl ColumnKind {
    /// Classify a column by name prefix, falling back to a value probe when
    /// the name carries no known prefix.
    pub fn classify(name: &str, values: &[Value]) -> Self {
        Self::from_prefix(name).unwrap_or_else(|| Self::probe(values))
    }

    /// Kind declared by the naming convention, if any.
    pub fn from_prefix(name: &str) -> Option<Self> {
        if name.starts_with("c_") {
            Some(ColumnKind::Categorical)
        } else if name.starts_with("n_") {
            Some(ColumnKind::Numerical)
        } else if name.starts_with("b_") {
            Some(ColumnKind::Binary)
        } else if name.starts_with("d_") {
            Some(ColumnKind::Date)
        } else {
            None
        }
    }

    /// Kind inferred from the first non-null value: text-like columns are
    /// categorical, numeric columns numerical, boolean columns binary. An
    /// all-null column defaults to categorical.
    pub fn probe(values: &[Value]) -> Self {
        match values.iter().find(|v| !v.is_null()) {
            Some(Value::Number(_)) => ColumnKind::Numerical,
            Some(Value::Bool(_)) => ColumnKind::Binary,
            _ => ColumnKind::Categorical,
        }
    }
}
