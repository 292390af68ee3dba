//! Missing-value imputation policies.

use crate::error::{TableError, TableResult};
use crate::table::{stats, Column, ColumnKind, Table, Value};
use log::debug;
use serde::{Deserialize, Serialize};

/// Fill policy for categorical columns: the most frequent level or a
/// literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CategoricalFill {
    Mode,
    Constant(String),
}

/// Fill policy for numerical columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NumericalFill {
    Mode,
    Mean,
    Median,
    Min,
    Max,
    Constant(f64),
}

impl Table {
    /// Replace missing entries in every categorical and numerical column
    /// using the given policies. A `None` policy leaves that bucket of
    /// columns untouched; binary and date columns are never filled.
    ///
    /// Each fill value is computed from the column's pre-imputation
    /// distribution, so one column's fill never feeds another's statistics.
    /// A statistic-based policy over a column with zero non-missing values
    /// raises `EmptyColumn`, and the failing call changes nothing.
    pub fn impute_missing(
        &mut self,
        categorical: Option<&CategoricalFill>,
        numerical: Option<&NumericalFill>,
    ) -> TableResult<&mut Self> {
        // Resolve every fill before the first write: this both keeps the
        // call atomic and guarantees the statistics come from unimputed
        // data.
        let mut fills: Vec<(usize, Value)> = Vec::new();
        for (index, column) in self.columns.iter().enumerate() {
            if column.missing_count() == 0 {
                continue;
            }
            let fill = match column.kind {
                ColumnKind::Categorical => match categorical {
                    Some(policy) => categorical_fill(column, policy)?,
                    None => continue,
                },
                ColumnKind::Numerical => match numerical {
                    Some(policy) => numerical_fill(column, policy)?,
                    None => continue,
                },
                ColumnKind::Binary | ColumnKind::Date => continue,
            };
            fills.push((index, fill));
        }

        for (index, fill) in fills {
            let column = &mut self.columns[index];
            let mut filled = 0;
            for value in &mut column.values {
                if value.is_null() {
                    *value = fill.clone();
                    filled += 1;
                }
            }
            debug!("filled {} missing entries in {}", filled, column.name);
        }
        Ok(self)
    }
}

fn categorical_fill(column: &Column, policy: &CategoricalFill) -> TableResult<Value> {
    match policy {
        CategoricalFill::Constant(literal) => Ok(Value::text(literal.clone())),
        CategoricalFill::Mode => {
            stats::value_mode(column.values.iter()).ok_or_else(|| TableError::EmptyColumn {
                column: column.name.clone(),
            })
        }
    }
}

fn numerical_fill(column: &Column, policy: &NumericalFill) -> TableResult<Value> {
    if let NumericalFill::Constant(literal) = policy {
        return Ok(Value::Number(*literal));
    }
    let numbers = column.numbers();
    let fill = match policy {
        NumericalFill::Mode => stats::numeric_mode(&numbers),
        NumericalFill::Mean => stats::mean(&numbers),
        NumericalFill::Median => stats::median(&numbers),
        NumericalFill::Min => stats::min(&numbers),
        NumericalFill::Max => stats::max(&numbers),
        NumericalFill::Constant(_) => unreachable!("handled above"),
    };
    fill.map(Value::Number).ok_or_else(|| TableError::EmptyColumn {
        column: column.name.clone(),
    })
}
