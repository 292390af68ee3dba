//! Feature engineering for in-memory labeled tables.
//!
//! A table is an ordered set of named, kind-tagged columns (categorical,
//! numerical, binary, date). The operations here derive new feature columns
//! from compact expression strings, enumerate column combinations for bulk
//! derivation, fill missing values by policy, and suppress numerical and
//! categorical outliers. Every operation mutates the table in place and
//! returns it for chaining.

pub mod combine;
pub mod engineer;
pub mod error;
pub mod impute;
pub mod outliers;
pub mod table;
