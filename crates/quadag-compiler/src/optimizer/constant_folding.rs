//! Constant evaluator
//!
//! Computes the literal result of an operation whose operands are numeric
//! literals. Only arithmetic folds; predicates are left symbolic.

use crate::optimizer::dag::DagOp;
use quadag_core::ir::{parse_numeric_literal, render_number};

/// Constant evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantEvaluator;

impl ConstantEvaluator {
    /// Create a new constant evaluator
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `op` over literal operands.
    ///
    /// Returns the canonical literal text of the result, or `None` when an
    /// operand is not numeric, the operation does not fold, the divisor is
    /// zero, or the result is not finite.
    pub fn evaluate(&self, op: DagOp, lhs: &str, rhs: Option<&str>) -> Option<String> {
        let left = parse_numeric_literal(lhs)?;
        let right = match rhs {
            Some(text) => Some(parse_numeric_literal(text)?),
            None => None,
        };

        let value = match (op, right) {
            (DagOp::UMinus, _) => -left,
            (DagOp::Add, Some(r)) => left + r,
            (DagOp::Sub, Some(r)) => left - r,
            (DagOp::Mul, Some(r)) => left * r,
            (DagOp::Div, Some(r)) if r != 0.0 => left / r,

            // Can't fold
            _ => return None,
        };

        render_number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_arithmetic() {
        let eval = ConstantEvaluator::new();
        assert_eq!(eval.evaluate(DagOp::Add, "2", Some("3")).as_deref(), Some("5"));
        assert_eq!(eval.evaluate(DagOp::Sub, "2", Some("3")).as_deref(), Some("-1"));
        assert_eq!(eval.evaluate(DagOp::Mul, "4", Some("2.5")).as_deref(), Some("10"));
        assert_eq!(eval.evaluate(DagOp::Div, "7", Some("2")).as_deref(), Some("3.5"));
    }

    #[test]
    fn test_fold_uminus() {
        let eval = ConstantEvaluator::new();
        assert_eq!(eval.evaluate(DagOp::UMinus, "5", None).as_deref(), Some("-5"));
        assert_eq!(eval.evaluate(DagOp::UMinus, "-5", None).as_deref(), Some("5"));
        assert_eq!(eval.evaluate(DagOp::UMinus, "0", None).as_deref(), Some("0"));
    }

    #[test]
    fn test_division_by_zero_declines() {
        let eval = ConstantEvaluator::new();
        assert_eq!(eval.evaluate(DagOp::Div, "6", Some("0")), None);
        assert_eq!(eval.evaluate(DagOp::Div, "6", Some("0.0")), None);
    }

    #[test]
    fn test_non_constant_operand_declines() {
        let eval = ConstantEvaluator::new();
        assert_eq!(eval.evaluate(DagOp::Add, "x", Some("1")), None);
        assert_eq!(eval.evaluate(DagOp::Add, "1", Some("y")), None);
    }

    #[test]
    fn test_missing_second_operand_declines() {
        let eval = ConstantEvaluator::new();
        assert_eq!(eval.evaluate(DagOp::Add, "1", None), None);
    }

    #[test]
    fn test_predicates_not_folded() {
        let eval = ConstantEvaluator::new();
        assert_eq!(eval.evaluate(DagOp::Lt, "1", Some("2")), None);
        assert_eq!(eval.evaluate(DagOp::Eq, "2", Some("2")), None);
        assert_eq!(eval.evaluate(DagOp::Odd, "3", None), None);
    }

    #[test]
    fn test_overflow_declines() {
        let eval = ConstantEvaluator::new();
        assert_eq!(eval.evaluate(DagOp::Mul, "1e300", Some("1e300")), None);
    }
}
