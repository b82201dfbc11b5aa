use crate::error::{ErrorKind, Result, SassError};
use crate::token::Token;

use std::fmt;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
}

impl Op {
    pub fn from_token(token: &Token) -> Option<Op> {
        let r = match *token {
            Token::Plus => Op::Plus,
            Token::Minus => Op::Minus,
            Token::Star => Op::Star,
            Token::Slash => Op::Slash,
            _ => return None,
        };
        Some(r)
    }

    /// Binding strength: `*` and `/` bind tighter than `+` and `-`.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Plus | Op::Minus => 1,
            Op::Star | Op::Slash => 2,
        }
    }

    pub fn math(self, first: f64, second: f64, offset: usize) -> Result<f64> {
        let result = match self {
            Op::Plus => first + second,
            Op::Minus => first - second,
            Op::Star => first * second,
            Op::Slash => {
                if second == 0.0 {
                    return Err(SassError::new(
                        ErrorKind::Arithmetic,
                        offset,
                        format!("Division by zero: {} / {}", first, second),
                    ));
                }
                first / second
            },
        };
        Ok(result)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Op::Plus => write!(f, "+"),
            Op::Minus => write!(f, "-"),
            Op::Star => write!(f, "*"),
            Op::Slash => write!(f, "/"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_orders_precedence() {
        assert!(Op::Star.precedence() > Op::Plus.precedence());
        assert_eq!(Op::Slash.precedence(), Op::Star.precedence());
        assert_eq!(Op::Minus.precedence(), Op::Plus.precedence());
    }

    #[test]
    fn it_refuses_to_divide_by_zero() {
        let err = Op::Slash.math(1.0, 0.0, 7).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Arithmetic);
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn it_maps_tokens() {
        assert_eq!(Op::from_token(&Token::Slash), Some(Op::Slash));
        assert_eq!(Op::from_token(&Token::Comma), None);
    }
}
