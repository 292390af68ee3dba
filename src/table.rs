//! In-memory labeled table.
//!
//! This module provides:
//! - Cell values and their total ordering
//! - Column classification (categorical / numerical / binary / date)
//! - Kind-tagged columns and shared column statistics
//! - The table itself, with lookup, classification and reshaping operations

pub mod column;
pub mod frame;
pub mod kind;
pub mod stats;
pub mod value;

pub use column::Column;
pub use frame::Table;
pub use kind::ColumnKind;
pub use value::Value;
