//! Column statistics shared by the imputer and the outlier suppressor.
//!
//! Callers pass the non-missing values; every function returns `None` when
//! the statistic is undefined for its input rather than guessing.

use crate::table::Value;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Undefined below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Median over a sorted copy; the midpoint average for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Most frequent value; ties break toward the smallest value.
pub fn numeric_mode(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let run_start = i;
        while i < sorted.len() && sorted[i] == sorted[run_start] {
            i += 1;
        }
        let run = i - run_start;
        // Strict comparison keeps the smallest value on ties.
        if best.map(|(_, count)| run > count).unwrap_or(true) {
            best = Some((sorted[run_start], run));
        }
    }
    best.map(|(value, _)| value)
}

/// Most frequent non-null value; ties break toward the smallest value under
/// `Value::total_cmp`. The winner is returned as-is, so a numeric level
/// stays numeric.
pub fn value_mode<'a>(values: impl Iterator<Item = &'a Value>) -> Option<Value> {
    let mut sorted: Vec<&Value> = values.filter(|v| !v.is_null()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut best: Option<(&Value, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let run_start = i;
        while i < sorted.len() && sorted[i] == sorted[run_start] {
            i += 1;
        }
        let run = i - run_start;
        if best.map(|(_, count)| run > count).unwrap_or(true) {
            best = Some((sorted[run_start], run));
        }
    }
    best.map(|(value, _)| value.clone())
}
