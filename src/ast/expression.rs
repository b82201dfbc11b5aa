use crate::error::Result;
use crate::operator::Op;
use crate::parser::Parser;
use crate::sass::number_value::NumberValue;
use crate::token::Token;

/// A single operand inside a property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Number(NumberValue),
    Color(String),
    Ident(String),
    Str(String),
    Uri(String),
    Function(String, Value),
    Variable { name: String, offset: usize },
    Parens(Box<Expression>),
    Negated(Box<Term>),
}

impl Term {
    fn mentions_variable(&self) -> bool {
        match *self {
            Term::Variable { .. } => true,
            Term::Parens(ref e) => e.mentions_variable(),
            Term::Negated(ref t) => t.mentions_variable(),
            _ => false,
        }
    }

    pub fn parse(parser: &mut Parser) -> Result<Term> {
        let lexeme = match parser.advance() {
            Some(l) => l,
            None => return Err(parser.unexpected_eof("a value")),
        };
        let term = match lexeme.token {
            Token::Number(n) => Term::Number(n),
            Token::Hash(h) => Term::Color(format!("#{}", h)),
            Token::Ident(i) => Term::Ident(i),
            Token::Str(s) => Term::Str(s),
            Token::Uri(u) => Term::Uri(u),
            Token::UnicodeRange(r) => Term::Ident(r),
            Token::Variable(name) => Term::Variable { name, offset: lexeme.offset },
            Token::Function(name) => {
                parser.enter()?;
                let args = Value::parse(parser)?;
                parser.skip_whitespace();
                parser.expect(Token::RightParen)?;
                parser.leave();
                Term::Function(name, args)
            },
            Token::LeftParen => {
                parser.enter()?;
                parser.skip_whitespace();
                let inner = Expression::parse(parser)?;
                parser.skip_whitespace();
                parser.expect(Token::RightParen)?;
                parser.leave();
                Term::Parens(Box::new(inner))
            },
            Token::Minus => match parser.peek() {
                Some(&Token::Variable(_)) | Some(&Token::LeftParen) => {
                    parser.enter()?;
                    let inner = Term::parse(parser)?;
                    parser.leave();
                    Term::Negated(Box::new(inner))
                },
                _ => return Err(parser.unexpected_at(&Token::Minus, lexeme.offset, "value")),
            },
            other => return Err(parser.unexpected_at(&other, lexeme.offset, "value")),
        };
        Ok(term)
    }
}

/// An operand followed by zero or more `operator operand` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub head: Term,
    pub tail: Vec<(Op, Term)>,
    pub offset: usize,
}

impl Expression {
    #[cfg(test)]
    pub fn single(head: Term, offset: usize) -> Expression {
        Expression { head, tail: vec![], offset }
    }

    pub fn mentions_variable(&self) -> bool {
        self.head.mentions_variable() || self.tail.iter().any(|&(_, ref t)| t.mentions_variable())
    }

    /// Whether this chain is arithmetic rather than CSS shorthand.
    /// `12px/1.5` stays literal; anything with a variable, parentheses or
    /// `+ - *` gets evaluated.
    pub fn needs_math(&self) -> bool {
        let grouped = |t: &Term| match *t {
            Term::Parens(_) | Term::Negated(_) => true,
            _ => false,
        };
        !self.tail.is_empty() && (
            self.mentions_variable() ||
            grouped(&self.head) ||
            self.tail.iter().any(|&(op, ref t)| op != Op::Slash || grouped(t))
        )
    }

    pub fn parse(parser: &mut Parser) -> Result<Expression> {
        let offset = parser.offset();
        let head = Term::parse(parser)?;
        let mut tail = vec![];

        loop {
            let checkpoint = parser.checkpoint();
            parser.skip_whitespace();
            let op = match parser.peek().and_then(Op::from_token) {
                Some(op) => op,
                None => {
                    parser.rewind(checkpoint);
                    break;
                },
            };
            parser.advance();
            parser.skip_whitespace();
            tail.push((op, Term::parse(parser)?));
        }

        Ok(Expression { head, tail, offset })
    }
}

fn ends_list(token: Option<&Token>) -> bool {
    match token {
        None |
        Some(&Token::Comma) |
        Some(&Token::Semicolon) |
        Some(&Token::RightBrace) |
        Some(&Token::RightParen) |
        Some(&Token::Important) => true,
        _ => false,
    }
}

/// Comma-separated groups of space-separated expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub groups: Vec<Vec<Expression>>,
}

impl Value {
    #[cfg(test)]
    pub fn single(expression: Expression) -> Value {
        Value { groups: vec![vec![expression]] }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.is_empty())
    }

    /// One space-separated list; stops before a comma.
    pub fn parse_list(parser: &mut Parser) -> Result<Vec<Expression>> {
        let mut list = vec![];
        loop {
            parser.skip_whitespace();
            if ends_list(parser.peek()) {
                return Ok(list);
            }
            list.push(Expression::parse(parser)?);
        }
    }

    /// Parses up to (not including) `;`, `}`, `)` or `!important`.
    /// May be empty, callers decide whether that is allowed.
    pub fn parse(parser: &mut Parser) -> Result<Value> {
        let mut groups = vec![];
        loop {
            let offset = parser.offset();
            let list = Value::parse_list(parser)?;
            let more = parser.peek() == Some(&Token::Comma);
            if list.is_empty() && (more || !groups.is_empty()) {
                return Err(parser.syntax_error(offset, "Expected a value before `,`"));
            }
            if !list.is_empty() {
                groups.push(list);
            }
            if !more {
                return Ok(Value { groups });
            }
            parser.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn parse_value(text: &str) -> Value {
        let mut parser = Parser::new(tokenize(text).unwrap(), 16);
        Value::parse(&mut parser).unwrap()
    }

    fn number(n: f64, unit: &str) -> Term {
        Term::Number(NumberValue::with_units(n, unit).with_raw(format!("{}{}", n, unit)))
    }

    #[test]
    fn it_parses_space_and_comma_lists() {
        let value = parse_value("2em 0, serif");
        assert_eq!(value.groups.len(), 2);
        assert_eq!(value.groups[0].len(), 2);
        assert_eq!(value.groups[0][0].head, number(2.0, "em"));
        assert_eq!(value.groups[1][0].head, Term::Ident("serif".into()));
    }

    #[test]
    fn it_parses_a_variable_with_arithmetic_suffix() {
        let value = parse_value("$margin / 2");
        let expr = &value.groups[0][0];
        assert_eq!(expr.head, Term::Variable { name: "margin".into(), offset: 0 });
        assert_eq!(expr.tail, vec![(Op::Slash, Term::Number(NumberValue::from_scalar(2.0).with_raw("2")))]);
        assert!(expr.needs_math());
    }

    #[test]
    fn it_leaves_slash_shorthand_alone() {
        let value = parse_value("12px/1.5 serif");
        assert!(!value.groups[0][0].needs_math());
        assert_eq!(value.groups[0].len(), 2);
    }

    #[test]
    fn it_parses_functions_with_arguments() {
        let value = parse_value("rgba(0, 0, 0, $alpha)");
        match value.groups[0][0].head {
            Term::Function(ref name, ref args) => {
                assert_eq!(name, "rgba");
                assert_eq!(args.groups.len(), 4);
            },
            ref other => panic!("expected a function, got {:?}", other),
        }
    }

    #[test]
    fn it_parses_parenthesized_math() {
        let value = parse_value("($a + 2) * 3");
        let expr = &value.groups[0][0];
        match expr.head {
            Term::Parens(ref inner) => assert_eq!(inner.tail.len(), 1),
            ref other => panic!("expected parens, got {:?}", other),
        }
        assert_eq!(expr.tail.len(), 1);
    }

    #[test]
    fn it_stops_before_important() {
        let mut parser = Parser::new(tokenize("red !important;").unwrap(), 16);
        let value = Value::parse(&mut parser).unwrap();
        assert_eq!(value.groups[0].len(), 1);
        assert_eq!(parser.peek(), Some(&Token::Important));
    }

    #[test]
    fn it_bounds_nested_parentheses() {
        let text = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        let mut parser = Parser::new(tokenize(&text).unwrap(), 16);
        let err = Value::parse(&mut parser).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::NestingTooDeep);
    }

    #[test]
    fn it_bounds_nested_functions() {
        let text = format!("{}1{}", "f(".repeat(20), ")".repeat(20));
        let mut parser = Parser::new(tokenize(&text).unwrap(), 16);
        let err = Value::parse(&mut parser).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::NestingTooDeep);
    }

    #[test]
    fn it_allows_nesting_within_the_bound() {
        let value = parse_value("-((1 + 2)) calc(max(1px, min(2px, 3px)))");
        assert_eq!(value.groups[0].len(), 2);
    }

    #[test]
    fn it_keeps_unicode_ranges_whole() {
        let value = parse_value("U+0000-00FF, U+0131");
        assert_eq!(value.groups[0][0].head, Term::Ident("U+0000-00FF".into()));
        assert!(value.groups[0][0].tail.is_empty());
        assert_eq!(value.groups[1][0].head, Term::Ident("U+0131".into()));
    }

    #[test]
    fn it_rejects_dangling_commas() {
        let mut parser = Parser::new(tokenize("a, , b").unwrap(), 16);
        assert!(Value::parse(&mut parser).is_err());
    }
}
