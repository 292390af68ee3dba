//! Outlier suppression for numerical and categorical columns.

use crate::table::{stats, ColumnKind, Table, Value};
use log::debug;
use std::collections::HashMap;

/// Sentinel level substituted for low-frequency categorical values.
pub const OTHERS: &str = "others";

impl Table {
    /// Clamp each numerical column to `mean ± std_devs` sample standard
    /// deviations, computed over the column's non-missing values. Clamping
    /// never widens a column's `[min, max]` range. Columns with fewer than
    /// two non-missing values are left alone; nulls pass through.
    pub fn suppress_numerical_outliers(&mut self, std_devs: f64) -> &mut Self {
        for column in &mut self.columns {
            if column.kind != ColumnKind::Numerical {
                continue;
            }
            let numbers = column.numbers();
            let (Some(mean), Some(std_dev)) =
                (stats::mean(&numbers), stats::sample_std(&numbers))
            else {
                continue;
            };
            let lower = mean - std_devs * std_dev;
            let upper = mean + std_devs * std_dev;

            let mut clamped = 0;
            for value in &mut column.values {
                if let Value::Number(x) = value {
                    let bounded = x.clamp(lower, upper);
                    if bounded != *x {
                        *x = bounded;
                        clamped += 1;
                    }
                }
            }
            debug!(
                "clamped {} values in {} to [{}, {}]",
                clamped, column.name, lower, upper
            );
        }
        self
    }

    /// Rewrite low-frequency levels of each categorical column to the
    /// sentinel level `"others"`. A level's frequency is its share of the
    /// table's total rows, computed once from the pre-suppression
    /// distribution; nulls are neither counted nor rewritten.
    pub fn suppress_categorical_outliers(&mut self, min_frequency_fraction: f64) -> &mut Self {
        let rows = self.row_count();
        if rows == 0 {
            return self;
        }
        for column in &mut self.columns {
            if column.kind != ColumnKind::Categorical {
                continue;
            }
            let mut counts: HashMap<String, usize> = HashMap::new();
            for value in &column.values {
                if !value.is_null() {
                    *counts.entry(value.to_string()).or_insert(0) += 1;
                }
            }

            let mut rewritten = 0;
            for value in &mut column.values {
                if value.is_null() {
                    continue;
                }
                let frequency = counts[&value.to_string()] as f64 / rows as f64;
                if frequency < min_frequency_fraction {
                    *value = Value::text(OTHERS);
                    rewritten += 1;
                }
            }
            debug!("rewrote {} outlier values in {}", rewritten, column.name);
        }
        self
    }
}
