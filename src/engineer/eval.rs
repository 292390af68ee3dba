//! Evaluation of feature expressions against a table.

use crate::engineer::{FeatureExpr, FeatureOp};
use crate::error::{TableError, TableResult};
use crate::table::{Column, ColumnKind, Table, Value};
use log::debug;

impl Table {
    /// Parse `expression` and derive its column(s), appending them to the
    /// table. Returns the table for chaining.
    ///
    /// The call is atomic: the expression is validated and every derived
    /// column computed before the first one is inserted, so a failing call
    /// leaves the table unchanged. Deriving a column that already exists is
    /// a no-op, which lets pipelines repeat expressions safely.
    pub fn engineer(&mut self, expression: &str) -> TableResult<&mut Self> {
        let expr = FeatureExpr::parse(expression)?;
        if expr.is_whole_frame() {
            return self.engineer_whole_frame(expr.op);
        }
        if self.contains(&expr.output_name()) {
            return Ok(self);
        }
        let column = self.derive(&expr)?;
        self.push_column(column)
    }

    /// Apply a unary operator to every numerical column, in the classifier's
    /// lexicographic order. A table with no numerical columns is left as is.
    fn engineer_whole_frame(&mut self, op: FeatureOp) -> TableResult<&mut Self> {
        let sources = self.columns_of_kind(ColumnKind::Numerical);
        debug!(
            "engineering {} over {} numerical columns",
            op.token(),
            sources.len()
        );
        let mut derived = Vec::with_capacity(sources.len());
        for source in sources {
            let expr = FeatureExpr::unary(op, source);
            if self.contains(&expr.output_name()) {
                continue;
            }
            derived.push(self.derive(&expr)?);
        }
        for column in derived {
            self.push_column(column)?;
        }
        Ok(self)
    }

    /// Resolve operands, check kinds, and compute the derived column.
    fn derive(&self, expr: &FeatureExpr) -> TableResult<Column> {
        let mut sources = Vec::with_capacity(expr.operands.len());
        for name in &expr.operands {
            let column = self.require(name)?;
            if !expr.op.accepts(column.kind) {
                return Err(TableError::KindMismatch {
                    operator: expr.op.token().to_string(),
                    column: name.clone(),
                    kind: column.kind,
                });
            }
            sources.push(column);
        }

        let values = match expr.op {
            FeatureOp::Concat => concat_rows(&sources),
            FeatureOp::Multiply => multiply_rows(expr.op, &sources)?,
            FeatureOp::Square => map_rows(expr.op, sources[0], |x| Ok(x * x))?,
            FeatureOp::NaturalLog => map_rows(expr.op, sources[0], |x| {
                if x <= 0.0 {
                    Err(TableError::LogDomain {
                        column: sources[0].name.clone(),
                        value: x,
                    })
                } else {
                    Ok(x.ln())
                }
            })?,
        };
        Ok(Column::with_kind(
            expr.output_name(),
            expr.op.output_kind(),
            values,
        ))
    }
}

/// Per-row string concatenation, left-to-right in operand order. A null in
/// any operand makes the derived row null.
fn concat_rows(sources: &[&Column]) -> Vec<Value> {
    let rows = sources.first().map(|c| c.len()).unwrap_or(0);
    (0..rows)
        .map(|row| {
            if sources.iter().any(|c| c.values[row].is_null()) {
                return Value::Null;
            }
            let mut text = String::new();
            for column in sources {
                text.push_str(&column.values[row].to_string());
            }
            Value::Text(text)
        })
        .collect()
}

/// Per-row numeric product. A null in any operand makes the derived row
/// null; a non-null non-numeric cell in a numerical operand is an error.
fn multiply_rows(op: FeatureOp, sources: &[&Column]) -> TableResult<Vec<Value>> {
    let rows = sources.first().map(|c| c.len()).unwrap_or(0);
    (0..rows)
        .map(|row| {
            let mut product = 1.0;
            for column in sources {
                match numeric_cell(op, column, row)? {
                    Some(x) => product *= x,
                    None => return Ok(Value::Null),
                }
            }
            Ok(Value::Number(product))
        })
        .collect()
}

/// Elementwise unary map over one numerical column; nulls pass through.
fn map_rows(
    op: FeatureOp,
    source: &Column,
    f: impl Fn(f64) -> TableResult<f64>,
) -> TableResult<Vec<Value>> {
    (0..source.len())
        .map(|row| match numeric_cell(op, source, row)? {
            Some(x) => Ok(Value::Number(f(x)?)),
            None => Ok(Value::Null),
        })
        .collect()
}

fn numeric_cell(op: FeatureOp, column: &Column, row: usize) -> TableResult<Option<f64>> {
    let value = &column.values[row];
    if value.is_null() {
        return Ok(None);
    }
    match value.as_number() {
        Some(x) => Ok(Some(x)),
        // A numerical column carrying a text cell is malformed input.
        None => Err(TableError::KindMismatch {
            operator: op.token().to_string(),
            column: column.name.clone(),
            kind: column.kind,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[f64]) -> Vec<Value> {
        values.iter().map(|&x| Value::Number(x)).collect()
    }

    fn texts(values: &[&str]) -> Vec<Value> {
        values.iter().map(|&s| Value::text(s)).collect()
    }

    /// The fixture the evaluator tests share: one categorical column and
    /// three numericals.
    fn sample() -> Table {
        let mut table = Table::new();
        table.push_values("c_1", texts(&["a", "b", "c"])).unwrap();
        table.push_values("n_2", numbers(&[1.0, 2.0, 3.0])).unwrap();
        table.push_values("n_3", numbers(&[4.0, 5.0, 6.0])).unwrap();
        table.push_values("n_4", numbers(&[7.0, 8.0, 9.0])).unwrap();
        table
    }

    #[test]
    fn test_concat() {
        let mut table = Table::new();
        table.push_values("c_1", texts(&["a", "b", "c"])).unwrap();
        table.push_values("c_2", texts(&["d", "e", "f"])).unwrap();
        table.engineer("c_1(:)c_2").unwrap();
        assert_eq!(
            table.column("c_1(:)c_2").unwrap().values,
            texts(&["ad", "be", "cf"])
        );
        assert_eq!(
            table.column("c_1(:)c_2").unwrap().kind,
            ColumnKind::Categorical
        );
    }

    #[test]
    fn test_concat_three_columns() {
        let mut table = Table::new();
        table.push_values("c_1", texts(&["a", "b", "c"])).unwrap();
        table.push_values("c_2", texts(&["d", "e", "f"])).unwrap();
        table.push_values("c_3", texts(&["h", "i", "j"])).unwrap();
        table.engineer("c_3(:)c_1(:)c_2").unwrap();
        assert_eq!(
            table.column("c_3(:)c_1(:)c_2").unwrap().values,
            texts(&["had", "ibe", "jcf"])
        );
    }

    #[test]
    fn test_concat_stringifies_numbers() {
        let mut table = Table::new();
        table.push_values("c_1", texts(&["a", "b", "c"])).unwrap();
        table.push_values("c_2", numbers(&[1.0, 2.0, 3.0])).unwrap();
        table.engineer("c_1(:)c_2").unwrap();
        assert_eq!(
            table.column("c_1(:)c_2").unwrap().values,
            texts(&["a1", "b2", "c3"])
        );
    }

    #[test]
    fn test_concat_led_by_numerical_column_renames() {
        let mut table = Table::new();
        table.push_values("c_1", texts(&["a", "b", "c"])).unwrap();
        table.push_values("n_2", numbers(&[1.0, 2.0, 3.0])).unwrap();
        table.push_values("n_3", numbers(&[4.0, 5.0, 6.0])).unwrap();
        table.engineer("n_3(:)c_1(:)n_2").unwrap();
        assert_eq!(
            table.column("c_n_3(:)c_1(:)n_2").unwrap().values,
            texts(&["4a1", "5b2", "6c3"])
        );
    }

    #[test]
    fn test_multiplication() {
        let mut table = sample();
        table.engineer("n_2(*)n_3").unwrap();
        assert_eq!(
            table.column("n_2(*)n_3").unwrap().values,
            numbers(&[4.0, 10.0, 18.0])
        );
        assert_eq!(table.column("n_2(*)n_3").unwrap().kind, ColumnKind::Numerical);
    }

    #[test]
    fn test_multiplication_three_columns() {
        let mut table = sample();
        table.engineer("n_2(*)n_3(*)n_4").unwrap();
        assert_eq!(
            table.column("n_2(*)n_3(*)n_4").unwrap().values,
            numbers(&[28.0, 80.0, 162.0])
        );
    }

    #[test]
    fn test_square_named_column() {
        let mut table = sample();
        table.engineer("n_3(^2)").unwrap();
        assert_eq!(table.column_count(), 5);
        assert_eq!(
            table.column("n_3(^2)").unwrap().values,
            numbers(&[16.0, 25.0, 36.0])
        );
        // Source column is untouched.
        assert_eq!(table.column("n_3").unwrap().values, numbers(&[4.0, 5.0, 6.0]));
    }

    #[test]
    fn test_square_whole_frame() {
        let mut table = sample();
        table.engineer("(^2)").unwrap();
        assert_eq!(
            table.column_names(),
            vec!["c_1", "n_2", "n_3", "n_4", "n_2(^2)", "n_3(^2)", "n_4(^2)"]
        );
        assert_eq!(table.column("n_2(^2)").unwrap().values, numbers(&[1.0, 4.0, 9.0]));
        assert_eq!(table.column("n_3(^2)").unwrap().values, numbers(&[16.0, 25.0, 36.0]));
        assert_eq!(table.column("n_4(^2)").unwrap().values, numbers(&[49.0, 64.0, 81.0]));
        // Originals unchanged.
        assert_eq!(table.column("n_2").unwrap().values, numbers(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_log_named_column() {
        let mut table = sample();
        table.engineer("n_3(lg)").unwrap();
        assert_eq!(
            table.column("n_3(lg)").unwrap().values,
            numbers(&[4.0_f64.ln(), 5.0_f64.ln(), 6.0_f64.ln()])
        );
    }

    #[test]
    fn test_log_whole_frame() {
        let mut table = sample();
        table.engineer("(lg)").unwrap();
        assert_eq!(table.column_count(), 7);
        assert_eq!(
            table.column("n_2(lg)").unwrap().values,
            numbers(&[1.0_f64.ln(), 2.0_f64.ln(), 3.0_f64.ln()])
        );
    }

    #[test]
    fn test_whole_frame_without_numericals_is_noop() {
        let mut table = Table::new();
        table.push_values("c_1", texts(&["a", "b"])).unwrap();
        let before = table.clone();
        table.engineer("(^2)").unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_nulls_propagate() {
        let mut table = Table::new();
        table
            .push_values("c_1", vec![Value::text("a"), Value::Null])
            .unwrap();
        table
            .push_values("n_2", vec![Value::Number(2.0), Value::Number(3.0)])
            .unwrap();
        table
            .push_values("n_3", vec![Value::Number(4.0), Value::Null])
            .unwrap();

        table.engineer("c_1(:)n_2").unwrap();
        assert_eq!(
            table.column("c_1(:)n_2").unwrap().values,
            vec![Value::text("a2"), Value::Null]
        );

        table.engineer("n_2(*)n_3").unwrap();
        assert_eq!(
            table.column("n_2(*)n_3").unwrap().values,
            vec![Value::Number(8.0), Value::Null]
        );

        // The domain check skips nulls.
        table.engineer("n_3(lg)").unwrap();
        assert_eq!(
            table.column("n_3(lg)").unwrap().values,
            vec![Value::Number(4.0_f64.ln()), Value::Null]
        );
    }

    #[test]
    fn test_unknown_operator_is_syntax_error() {
        let mut table = sample();
        let err = table.engineer("n_2(+)n_3").unwrap_err();
        assert!(matches!(err, TableError::Syntax { .. }));
    }

    #[test]
    fn test_missing_operand_is_lookup_error() {
        let mut table = sample();
        let err = table.engineer("n_2(*)n_9").unwrap_err();
        assert_eq!(
            err,
            TableError::UnknownColumn {
                name: "n_9".to_string()
            }
        );
    }

    #[test]
    fn test_operator_kind_mismatch_is_type_error() {
        let mut table = sample();
        let err = table.engineer("c_1(*)n_2").unwrap_err();
        assert_eq!(
            err,
            TableError::KindMismatch {
                operator: "(*)".to_string(),
                column: "c_1".to_string(),
                kind: ColumnKind::Categorical,
            }
        );
    }

    #[test]
    fn test_log_of_non_positive_is_data_error() {
        let mut table = Table::new();
        table.push_values("n_1", numbers(&[1.0, 0.0])).unwrap();
        let err = table.engineer("n_1(lg)").unwrap_err();
        assert_eq!(
            err,
            TableError::LogDomain {
                column: "n_1".to_string(),
                value: 0.0,
            }
        );
    }

    #[test]
    fn test_failed_call_leaves_table_unchanged() {
        let mut table = Table::new();
        table.push_values("n_1", numbers(&[1.0, 2.0])).unwrap();
        table.push_values("n_2", numbers(&[3.0, -1.0])).unwrap();
        let before = table.clone();

        // n_1 derives fine, n_2 fails the domain check; nothing lands.
        assert!(table.engineer("(lg)").is_err());
        assert_eq!(table, before);

        assert!(table.engineer("n_1(*)n_9").is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_engineer_is_deterministic() {
        let first = {
            let mut table = sample();
            table.engineer("n_2(*)n_3").unwrap();
            table.column("n_2(*)n_3").unwrap().values.clone()
        };
        let second = {
            let mut table = sample();
            table.engineer("n_2(*)n_3").unwrap();
            table.column("n_2(*)n_3").unwrap().values.clone()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_repeated_expression_is_noop() {
        let mut table = sample();
        table.engineer("n_2(*)n_3").unwrap();
        let before = table.clone();
        table.engineer("n_2(*)n_3").unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_chaining() {
        let mut table = Table::new();
        table.push_values("c_1", texts(&["a", "b", "c"])).unwrap();
        table.push_values("c_2", texts(&["d", "e", "f"])).unwrap();
        table.push_values("n_2", numbers(&[1.0, 2.0, 3.0])).unwrap();
        table.push_values("n_3", numbers(&[4.0, 5.0, 6.0])).unwrap();
        table.push_values("n_4", numbers(&[7.0, 8.0, 9.0])).unwrap();

        table
            .engineer("c_1(:)c_2")
            .unwrap()
            .engineer("c_1(:)n_2")
            .unwrap()
            .engineer("n_2(*)n_3")
            .unwrap()
            .engineer("n_2(lg)")
            .unwrap()
            .engineer("n_3(^2)")
            .unwrap();

        assert_eq!(
            table.column_names(),
            vec![
                "c_1",
                "c_2",
                "n_2",
                "n_3",
                "n_4",
                "c_1(:)c_2",
                "c_1(:)n_2",
                "n_2(*)n_3",
                "n_2(lg)",
                "n_3(^2)"
            ]
        );
        assert_eq!(
            table.column("c_1(:)c_2").unwrap().values,
            texts(&["ad", "be", "cf"])
        );
        assert_eq!(
            table.column("c_1(:)n_2").unwrap().values,
            texts(&["a1", "b2", "c3"])
        );
        assert_eq!(
            table.column("n_2(*)n_3").unwrap().values,
            numbers(&[4.0, 10.0, 18.0])
        );
        assert_eq!(
            table.column("n_2(lg)").unwrap().values,
            numbers(&[1.0_f64.ln(), 2.0_f64.ln(), 3.0_f64.ln()])
        );
        assert_eq!(
            table.column("n_3(^2)").unwrap().values,
            numbers(&[16.0, 25.0, 36.0])
        );
    }
}
