//! Deterministic enumeration of column combinations.

use crate::table::{ColumnKind, Table};

impl Table {
    /// All unordered combinations of `arity` eligible column names.
    ///
    /// The eligible list is the sorted categorical names followed by the
    /// sorted numerical names; combinations come out in lexicographic index
    /// order over that list, so the sequence is reproducible run to run.
    /// Callers use this to drive `engineer` over many column pairs or
    /// triples.
    pub fn combinations(
        &self,
        arity: usize,
        categoricals: bool,
        numericals: bool,
    ) -> Vec<Vec<String>> {
        let mut eligible = Vec::new();
        if categoricals {
            eligible.extend(self.columns_of_kind(ColumnKind::Categorical));
        }
        if numericals {
            eligible.extend(self.columns_of_kind(ColumnKind::Numerical));
        }
        combinations_of(&eligible, arity)
    }
}

/// Strictly increasing index combinations in lexicographic order.
fn combinations_of(items: &[String], arity: usize) -> Vec<Vec<String>> {
    let n = items.len();
    if arity == 0 || arity > n {
        return Vec::new();
    }
    let mut indices: Vec<usize> = (0..arity).collect();
    let mut out = vec![pick(items, &indices)];
    loop {
        // Rightmost index that can still advance.
        let Some(i) = (0..arity).rev().find(|&i| indices[i] != i + n - arity) else {
            return out;
        };
        indices[i] += 1;
        for j in i + 1..arity {
            indices[j] = indices[j - 1] + 1;
        }
        out.push(pick(items, &indices));
    }
}

fn pick(items: &[String], indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| items[i].clone()).collect()
}
