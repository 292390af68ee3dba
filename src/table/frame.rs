//! The table: an ordered collection of equal-length named columns.

use crate::error::{TableError, TableResult};
use crate::table::{Column, ColumnKind, Value};
use serde::{Deserialize, Serialize};

/// An in-memory labeled table.
///
/// Columns keep their insertion order; every column holds one value per row
/// and a kind cached at insertion time. Operations mutate the table in place
/// and hand back `&mut Self` inside a `Result`, so pipeline stages chain:
///
/// ```
/// # use featuresmith::table::{Table, Value};
/// let mut table = Table::new();
/// table.push_values("c_1", vec![Value::text("a"), Value::text("b")]).unwrap();
/// table.push_values("n_2", vec![Value::Number(1.0), Value::Number(2.0)]).unwrap();
/// table.engineer("c_1(:)n_2").unwrap().engineer("(^2)").unwrap();
/// assert_eq!(table.column_count(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub(crate) columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Column lookup that raises `UnknownColumn` instead of returning `None`.
    pub fn require(&self, name: &str) -> TableResult<&Column> {
        self.column(name).ok_or_else(|| TableError::UnknownColumn {
            name: name.to_string(),
        })
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Append a column. The column must be new and match the row count.
    pub fn push_column(&mut self, column: Column) -> TableResult<&mut Self> {
        if self.contains(&column.name) {
            return Err(TableError::DuplicateColumn { name: column.name });
        }
        let expected = self.row_count();
        let actual = column.len();
        if !self.columns.is_empty() && actual != expected {
            return Err(TableError::LengthMismatch {
                column: column.name,
                expected,
                actual,
            });
        }
        self.columns.push(column);
        Ok(self)
    }

    /// Classify and append a column built from raw values.
    pub fn push_values(
        &mut self,
        name: impl Into<String>,
        values: Vec<Value>,
    ) -> TableResult<&mut Self> {
        self.push_column(Column::new(name, values))
    }

    /// Cached kind of every column, in insertion order.
    pub fn classification(&self) -> Vec<(&str, ColumnKind)> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.kind))
            .collect()
    }

    /// Names of every column of `kind`, sorted lexicographically.
    pub fn columns_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        let mut names: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn categoricals(&self) -> Vec<String> {
        self.columns_of_kind(ColumnKind::Categorical)
    }

    pub fn numericals(&self) -> Vec<String> {
        self.columns_of_kind(ColumnKind::Numerical)
    }

    /// Drop every column of the given kinds.
    pub fn remove(&mut self, kinds: &[ColumnKind]) -> &mut Self {
        self.columns.retain(|c| !kinds.contains(&c.kind));
        self
    }

    /// Drop columns by name. All names must exist; a failing call drops
    /// nothing.
    pub fn drop_columns(&mut self, names: &[&str]) -> TableResult<&mut Self> {
        for name in names {
            self.require(name)?;
        }
        self.columns.retain(|c| !names.contains(&c.name.as_str()));
        Ok(self)
    }

    /// Column-wise concatenation: append every column of `other` to the
    /// right of this table. Row counts must match and names must not
    /// collide; a failing call changes nothing.
    pub fn append_right(&mut self, other: Table) -> TableResult<&mut Self> {
        if !self.columns.is_empty() {
            for column in &other.columns {
                if column.len() != self.row_count() {
                    return Err(TableError::LengthMismatch {
                        column: column.name.clone(),
                        expected: self.row_count(),
                        actual: column.len(),
                    });
                }
                if self.contains(&column.name) {
                    return Err(TableError::DuplicateColumn {
                        name: column.name.clone(),
                    });
                }
            }
        }
        self.columns.extend(other.columns);
        Ok(self)
    }

    /// Row-wise concatenation: append every row of `other` below this
    /// table. The column names and kinds must match in order.
    pub fn append_bottom(&mut self, other: Table) -> TableResult<&mut Self> {
        if self.classification() != other.classification() {
            return Err(TableError::SchemaMismatch {
                expected: self.column_names().join(", "),
                actual: other.column_names().join(", "),
            });
        }
        for (column, incoming) in self.columns.iter_mut().zip(other.columns) {
            column.values.extend(incoming.values);
        }
        Ok(self)
    }

    /// For each named column, append a `<name>_indexes` sibling holding the
    /// rank of each row's value among the column's sorted distinct non-null
    /// values; nulls stay null. Optionally drops the source columns.
    pub fn to_index(&mut self, columns: &[&str], drop_original: bool) -> TableResult<&mut Self> {
        for name in columns {
            self.require(name)?;
            let derived = format!("{}_indexes", name);
            if self.contains(&derived) {
                return Err(TableError::DuplicateColumn { name: derived });
            }
        }

        let mut derived = Vec::with_capacity(columns.len());
        for name in columns {
            let column = self.require(name)?;
            let mut levels: Vec<&Value> =
                column.values.iter().filter(|v| !v.is_null()).collect();
            levels.sort_by(|a, b| a.total_cmp(b));
            levels.dedup();

            let values = column
                .values
                .iter()
                .map(|v| {
                    if v.is_null() {
                        Value::Null
                    } else {
                        let rank = match levels.binary_search_by(|probe| probe.total_cmp(v)) {
                            Ok(rank) => rank,
                            Err(_) => unreachable!("value came from the same column"),
                        };
                        Value::Number(rank as f64)
                    }
                })
                .collect();
            derived.push(Column::new(format!("{}_indexes", name), values));
        }
        for column in derived {
            self.push_column(column)?;
        }
        if drop_original {
            self.drop_columns(columns)?;
        }
        Ok(self)
    }
}
