//! Feature-expression AST and parsing.

use crate::engineer::FeatureOp;
use crate::error::{TableError, TableResult};

/// Parsed form of a feature expression: one operator applied either to the
/// whole frame (no operands) or to 1-3 named operand columns.
///
/// Parsing is purely syntactic; column lookup and kind checks happen when
/// the expression is evaluated against a table. This keeps validation ahead
/// of any mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureExpr {
    pub op: FeatureOp,
    pub operands: Vec<String>,
}

impl FeatureExpr {
    /// Parse an expression string such as `c_1(:)c_2`, `n_2(*)n_3(*)n_4`,
    /// `n_3(^2)` or the whole-frame form `(lg)`.
    pub fn parse(expression: &str) -> TableResult<Self> {
        let syntax = || TableError::Syntax {
            expression: expression.to_string(),
        };

        for op in FeatureOp::ALL {
            let token = op.token();
            if expression == token {
                // Whole-frame form exists only for the unary operators.
                if op.is_unary() {
                    return Ok(Self {
                        op,
                        operands: Vec::new(),
                    });
                }
                return Err(syntax());
            }
            if !expression.contains(token) {
                continue;
            }

            let parts: Vec<&str> = expression.split(token).collect();
            if op.is_unary() {
                // Named unary form: `name(OP)` and nothing after.
                return match parts.as_slice() {
                    [name, ""] if is_operand(name) => Ok(Self::unary(op, name.to_string())),
                    _ => Err(syntax()),
                };
            }
            if (2..=3).contains(&parts.len()) && parts.iter().all(|p| is_operand(p)) {
                return Ok(Self {
                    op,
                    operands: parts.iter().map(|p| p.to_string()).collect(),
                });
            }
            return Err(syntax());
        }
        Err(syntax())
    }

    pub fn unary(op: FeatureOp, operand: String) -> Self {
        Self {
            op,
            operands: vec![operand],
        }
    }

    /// Whole-frame form: no explicit operands.
    pub fn is_whole_frame(&self) -> bool {
        self.operands.is_empty()
    }

    /// Name under which the derived column is inserted: the operand names
    /// joined with the operator token. A concat result that would not carry
    /// the categorical prefix gets a leading `c_`, so the name convention
    /// matches the derived column's kind.
    pub fn output_name(&self) -> String {
        let name = if self.op.is_unary() {
            format!("{}{}", self.operands.join(""), self.op.token())
        } else {
            self.operands.join(self.op.token())
        };
        if self.op == FeatureOp::Concat && !name.starts_with("c_") {
            format!("c_{}", name)
        } else {
            name
        }
    }
}

fn is_operand(part: &str) -> bool {
    !part.is_empty() && !part.contains('(') && !part.contains(')')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binary_forms() {
        let expr = FeatureExpr::parse("c_1(:)c_2").unwrap();
        assert_eq!(expr.op, FeatureOp::Concat);
        assert_eq!(expr.operands, vec!["c_1", "c_2"]);

        let expr = FeatureExpr::parse("n_2(*)n_3(*)n_4").unwrap();
        assert_eq!(expr.op, FeatureOp::Multiply);
        assert_eq!(expr.operands, vec!["n_2", "n_3", "n_4"]);
    }

    #[test]
    fn test_parse_unary_forms() {
        let expr = FeatureExpr::parse("n_3(^2)").unwrap();
        assert_eq!(expr.op, FeatureOp::Square);
        assert_eq!(expr.operands, vec!["n_3"]);

        let expr = FeatureExpr::parse("n_2(lg)").unwrap();
        assert_eq!(expr.op, FeatureOp::NaturalLog);
        assert_eq!(expr.operands, vec!["n_2"]);
    }

    #[test]
    fn test_parse_whole_frame_forms() {
        assert!(FeatureExpr::parse("(^2)").unwrap().is_whole_frame());
        assert!(FeatureExpr::parse("(lg)").unwrap().is_whole_frame());

        // Concat and multiply have no whole-frame meaning.
        assert!(FeatureExpr::parse("(:)").is_err());
        assert!(FeatureExpr::parse("(*)").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_expressions() {
        for bad in [
            "",
            "c_1",
            "c_1(?)c_2",
            "c_1(:)",
            "(:)c_2",
            "n_3(^2)n_4",
            "c_1(:)c_2(:)c_3(:)c_4",
            "n_2(*)n_3(lg)",
        ] {
            let err = FeatureExpr::parse(bad).unwrap_err();
            assert!(
                matches!(err, TableError::Syntax { ref expression } if expression == bad),
                "expected syntax error for {:?}, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_output_names() {
        assert_eq!(
            FeatureExpr::parse("c_1(:)c_2").unwrap().output_name(),
            "c_1(:)c_2"
        );
        assert_eq!(
            FeatureExpr::parse("n_2(*)n_3").unwrap().output_name(),
            "n_2(*)n_3"
        );
        assert_eq!(
            FeatureExpr::parse("n_3(^2)").unwrap().output_name(),
            "n_3(^2)"
        );
    }

    #[test]
    fn test_concat_output_name_gains_categorical_prefix() {
        // A concat led by a numerical column is renamed to carry the
        // categorical prefix of its derived kind.
        assert_eq!(
            FeatureExpr::parse("n_3(:)c_1(:)n_2").unwrap().output_name(),
            "c_n_3(:)c_1(:)n_2"
        );
        // Already categorical-led names are untouched.
        assert_eq!(
            FeatureExpr::parse("c_1(:)n_2").unwrap().output_name(),
            "c_1(:)n_2"
        );
    }
}
