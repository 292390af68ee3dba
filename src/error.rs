//! Error types shared by all table operations.

use crate::table::ColumnKind;
use thiserror::Error;

/// Errors raised by table operations.
///
/// Four families: malformed expressions (syntax), references to absent or
/// colliding columns (lookup), operators or tables with incompatible shapes
/// (type), and statistics over columns with no usable data (data). All errors
/// are raised synchronously to the immediate caller; a failing operation
/// leaves the table unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("unsupported expression: '{expression}'")]
    Syntax { expression: String },

    #[error("column not found: {name}")]
    UnknownColumn { name: String },

    #[error("duplicate column: {name}")]
    DuplicateColumn { name: String },

    #[error("operator {operator} cannot be applied to {kind:?} column {column}")]
    KindMismatch {
        operator: String,
        column: String,
        kind: ColumnKind,
    },

    #[error("column {column} has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("tables have different schemas: expected [{expected}], got [{actual}]")]
    SchemaMismatch { expected: String, actual: String },

    #[error("column {column} has no non-missing values")]
    EmptyColumn { column: String },

    #[error("(lg) undefined for non-positive value {value} in column {column}")]
    LogDomain { column: String, value: f64 },
}

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;
