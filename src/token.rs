use crate::sass::number_value::NumberValue;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    /// `$name`, stored without the sigil.
    Variable(String),
    /// `@name`, stored without the sigil.
    AtKeyword(String),
    /// `#name`, stored without the sigil. Either an id selector or a hex color.
    Hash(String),
    Number(NumberValue),
    /// Quoted string, quotes included.
    Str(String),
    /// The whole `url(...)` text.
    Uri(String),
    /// `U+0025-00FF` and friends, kept as written.
    UnicodeRange(String),
    /// Identifier immediately followed by `(`; the paren is consumed.
    Function(String),
    Important,
    Whitespace,
    Colon,
    Semicolon,
    Comma,
    Dot,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Plus,
    Minus,
    Star,
    Slash,
    Greater,
    Tilde,
    Ampersand,
    Cdo,
    Cdc,
    Delim(char),
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        *self == Token::Whitespace
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Ident(ref s) => write!(f, "{}", s),
            Token::Variable(ref s) => write!(f, "${}", s),
            Token::AtKeyword(ref s) => write!(f, "@{}", s),
            Token::Hash(ref s) => write!(f, "#{}", s),
            Token::Number(ref n) => n.fmt(f),
            Token::Str(ref s) => write!(f, "{}", s),
            Token::Uri(ref s) => write!(f, "{}", s),
            Token::UnicodeRange(ref s) => write!(f, "{}", s),
            Token::Function(ref s) => write!(f, "{}(", s),
            Token::Important => write!(f, "!important"),
            Token::Whitespace => write!(f, " "),
            Token::Colon => write!(f, ":"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Greater => write!(f, ">"),
            Token::Tilde => write!(f, "~"),
            Token::Ampersand => write!(f, "&"),
            Token::Cdo => write!(f, "<!--"),
            Token::Cdc => write!(f, "-->"),
            Token::Delim(c) => write!(f, "{}", c),
        }
    }
}

/// A token plus the byte offset where it starts in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub offset: usize,
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.token.fmt(f)
    }
}
