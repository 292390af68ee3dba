//! Feature-engineering expression evaluator.
//!
//! This module provides:
//! - The operator set of the expression grammar
//! - Parsing of expression strings into a small AST
//! - Evaluation against a table, deriving and inserting new columns
//!
//! Expressions are the stable wire format of this crate: pipelines hard-code
//! strings such as `c_1(:)c_2`, `n_2(*)n_3` or the whole-frame `(^2)`.

pub mod eval;
pub mod expr;
pub mod operator;

pub use expr::FeatureExpr;
pub use operator::FeatureOp;
