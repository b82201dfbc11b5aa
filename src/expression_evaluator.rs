use crate::error::{ErrorKind, Result, SassError};
use crate::operator::Op;
use crate::sass::number_value::NumberValue;

/// Input to the arithmetic evaluator: operands are already resolved numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum MathToken {
    Number(NumberValue),
    Op(Op),
    Negate,
    LeftParen,
    RightParen,
}

/// Four-operator arithmetic with parentheses and unary minus. Nothing else
/// is accepted, whatever the input text looked like.
pub struct ExpressionEvaluator<'a> {
    tokens: &'a [MathToken],
    pos: usize,
    offset: usize,
}

impl<'a> ExpressionEvaluator<'a> {
    pub fn evaluate(tokens: &[MathToken], offset: usize) -> Result<NumberValue> {
        let mut evaluator = ExpressionEvaluator { tokens, pos: 0, offset };
        let result = evaluator.binary(1)?;
        if evaluator.pos != tokens.len() {
            return Err(evaluator.error(format!(
                "Unexpected {:?} after arithmetic expression",
                tokens[evaluator.pos]
            )));
        }
        debug!("Math result: {}", result);
        Ok(result)
    }

    fn error(&self, message: String) -> SassError {
        SassError::new(ErrorKind::SyntaxError, self.offset, message)
    }

    fn peek_op(&self) -> Option<Op> {
        match self.tokens.get(self.pos) {
            Some(&MathToken::Op(op)) => Some(op),
            _ => None,
        }
    }

    // Precedence climbing: folds left-associatively every operator at least
    // as strong as `min_precedence`.
    fn binary(&mut self, min_precedence: u8) -> Result<NumberValue> {
        let mut lhs = self.factor()?;
        while let Some(op) = self.peek_op() {
            if op.precedence() < min_precedence {
                break;
            }
            self.pos += 1;
            let rhs = self.binary(op.precedence() + 1)?;
            lhs = lhs.apply_math(op, rhs, self.offset)?;
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<NumberValue> {
        let token = match self.tokens.get(self.pos) {
            Some(t) => t.clone(),
            None => return Err(self.error(String::from("Expected a number, reached end of expression"))),
        };
        self.pos += 1;

        match token {
            MathToken::Number(n) => Ok(n),
            MathToken::Negate => Ok(self.factor()?.negate()),
            MathToken::LeftParen => {
                let inner = self.binary(1)?;
                match self.tokens.get(self.pos) {
                    Some(&MathToken::RightParen) => {
                        self.pos += 1;
                        Ok(inner)
                    },
                    _ => Err(self.error(String::from("Expected `)` in arithmetic expression"))),
                }
            },
            other => Err(self.error(format!("Expected a number, instead saw {:?}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: f64) -> MathToken {
        MathToken::Number(NumberValue::from_scalar(value))
    }

    fn px(value: f64) -> MathToken {
        MathToken::Number(NumberValue::with_units(value, "px"))
    }

    fn op(o: Op) -> MathToken {
        MathToken::Op(o)
    }

    #[test]
    fn it_divides_a_length() {
        let result = ExpressionEvaluator::evaluate(&[px(16.0), op(Op::Slash), n(2.0)], 0).unwrap();
        assert_eq!(result, NumberValue::with_units(8.0, "px"));
    }

    #[test]
    fn it_respects_precedence() {
        let tokens = [n(1.0), op(Op::Plus), n(2.0), op(Op::Star), n(3.0)];
        assert_eq!(ExpressionEvaluator::evaluate(&tokens, 0).unwrap().scalar, 7.0);
    }

    #[test]
    fn it_evaluates_left_to_right() {
        let tokens = [n(10.0), op(Op::Minus), n(4.0), op(Op::Minus), n(3.0)];
        assert_eq!(ExpressionEvaluator::evaluate(&tokens, 0).unwrap().scalar, 3.0);
        let tokens = [n(8.0), op(Op::Slash), n(2.0), op(Op::Slash), n(2.0)];
        assert_eq!(ExpressionEvaluator::evaluate(&tokens, 0).unwrap().scalar, 2.0);
    }

    #[test]
    fn it_evaluates_parentheses_and_negation() {
        let tokens = [
            MathToken::Negate, MathToken::LeftParen, px(1.0), op(Op::Plus), n(2.0),
            MathToken::RightParen, op(Op::Star), n(3.0),
        ];
        assert_eq!(
            ExpressionEvaluator::evaluate(&tokens, 0).unwrap(),
            NumberValue::with_units(-9.0, "px")
        );
    }

    #[test]
    fn it_reports_division_by_zero() {
        let err = ExpressionEvaluator::evaluate(&[px(1.0), op(Op::Slash), n(0.0)], 4).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Arithmetic);
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn it_reports_incompatible_units() {
        let tokens = [px(1.0), op(Op::Plus), MathToken::Number(NumberValue::with_units(1.0, "em"))];
        let err = ExpressionEvaluator::evaluate(&tokens, 0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IncompatibleUnits);
    }

    #[test]
    fn it_rejects_malformed_input() {
        assert!(ExpressionEvaluator::evaluate(&[n(1.0), op(Op::Plus)], 0).is_err());
        assert!(ExpressionEvaluator::evaluate(&[MathToken::LeftParen, n(1.0)], 0).is_err());
        assert!(ExpressionEvaluator::evaluate(&[n(1.0), n(2.0)], 0).is_err());
    }
}
