use crate::error::{ErrorKind, Result, SassError};
use crate::token::{Lexeme, Token};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use std::fmt;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<attrname>[^\s*~^$|=]+)\s*(?P<operator>[*~^$|]?=)\s*(?P<attrval>[^\s\]]+)\s*$").unwrap()
});

pub fn squeeze(data: &str) -> String {
    WHITESPACE.replace_all(data, " ").trim().to_string()
}

fn compress_attr_selector(data: &str) -> String {
    let squeezed = squeeze(data);
    ATTRIBUTE.replace(&squeezed, |caps: &Captures| {
        format!("{}{}{}", &caps["attrname"], &caps["operator"], &caps["attrval"])
    }).into_owned()
}

/// Source text of a run of lexemes, whitespace collapsed.
pub fn raw_text(lexemes: &[Lexeme]) -> String {
    squeeze(&lexemes.iter().map(|l| l.to_string()).collect::<String>())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Combinator {
    Descendant,
    Child,
    Adjacent,
    Sibling,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Combinator::Descendant => write!(f, " "),
            Combinator::Child => write!(f, " > "),
            Combinator::Adjacent => write!(f, " + "),
            Combinator::Sibling => write!(f, " ~ "),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    /// Simple selectors written without whitespace between them, e.g. `td.ln:hover`.
    Compound(String),
    Combinator(Combinator),
}

/// One comma-free selector sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SassSelector {
    pub parts: Vec<SelectorPart>,
}

fn syntax_error<S: Into<String>>(offset: usize, message: S) -> SassError {
    SassError::new(ErrorKind::SyntaxError, offset, message)
}

// Text between a bracket or paren opened just before `start` and its match.
// Returns the inner text and the index just past the closing lexeme.
fn balanced(lexemes: &[Lexeme], start: usize, close: &Token, offset: usize) -> Result<(String, usize)> {
    let mut depth = 0;
    for (i, l) in lexemes.iter().enumerate().skip(start) {
        match l.token {
            Token::LeftParen | Token::Function(_) | Token::LeftBracket => depth += 1,
            Token::RightParen | Token::RightBracket if depth > 0 => depth -= 1,
            ref t if t == close => return Ok((raw_text(&lexemes[start..i]), i + 1)),
            _ => {},
        }
    }
    Err(syntax_error(offset, format!("Expected `{}` in selector", close)))
}

// Puts `parent` in place of every `&` outside brackets, parentheses and
// quotes. `None` when there is no such `&`.
fn substitute_parent(selector: &str, parent: &str) -> Option<String> {
    let mut result = String::with_capacity(selector.len() + parent.len());
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut found = false;

    for c in selector.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            },
            None => match c {
                '"' | '\'' => quote = Some(c),
                '[' | '(' => depth += 1,
                ']' | ')' => depth -= 1,
                '&' if depth == 0 => {
                    found = true;
                    result.push_str(parent);
                    continue;
                },
                _ => {},
            },
        }
        result.push(c);
    }

    if found { Some(result) } else { None }
}

impl SassSelector {
    /// Splits a selector group on top-level commas. `end_offset` is used to
    /// report an empty group.
    pub fn parse_group(lexemes: &[Lexeme], end_offset: usize) -> Result<Vec<SassSelector>> {
        let mut selectors = vec![];
        let mut depth = 0;
        let mut start = 0;

        for (i, l) in lexemes.iter().enumerate() {
            match l.token {
                Token::LeftParen | Token::Function(_) | Token::LeftBracket => depth += 1,
                Token::RightParen | Token::RightBracket => depth -= 1,
                Token::Comma if depth == 0 => {
                    selectors.push(SassSelector::parse(&lexemes[start..i], l.offset)?);
                    start = i + 1;
                },
                _ => {},
            }
        }
        selectors.push(SassSelector::parse(&lexemes[start..], end_offset)?);
        Ok(selectors)
    }

    pub fn parse(lexemes: &[Lexeme], end_offset: usize) -> Result<SassSelector> {
        let mut parts: Vec<SelectorPart> = vec![];
        let mut compound = String::new();
        let mut i = 0;

        while i < lexemes.len() {
            let offset = lexemes[i].offset;
            let combinator = match lexemes[i].token {
                Token::Whitespace => None,
                Token::Greater => Some(Combinator::Child),
                Token::Plus => Some(Combinator::Adjacent),
                Token::Tilde => Some(Combinator::Sibling),
                _ => {
                    let (simple, next) = SassSelector::simple(lexemes, i)?;
                    if compound.is_empty() {
                        if let Some(&SelectorPart::Compound(_)) = parts.last() {
                            parts.push(SelectorPart::Combinator(Combinator::Descendant));
                        }
                    }
                    compound.push_str(&simple);
                    i = next;
                    continue;
                },
            };

            if !compound.is_empty() {
                parts.push(SelectorPart::Compound(compound));
                compound = String::new();
            }
            if let Some(c) = combinator {
                if let Some(&SelectorPart::Combinator(_)) = parts.last() {
                    return Err(syntax_error(offset, "Expected a selector between combinators"));
                }
                parts.push(SelectorPart::Combinator(c));
            }
            i += 1;
        }

        if !compound.is_empty() {
            parts.push(SelectorPart::Compound(compound));
        }
        match parts.last() {
            None => Err(syntax_error(end_offset, "Expected a selector")),
            Some(&SelectorPart::Combinator(_)) => {
                Err(syntax_error(end_offset, "Expected a selector after combinator"))
            },
            Some(_) => Ok(SassSelector { parts }),
        }
    }

    // One simple selector starting at `i`; returns its text and the index after it.
    fn simple(lexemes: &[Lexeme], i: usize) -> Result<(String, usize)> {
        let lexeme = &lexemes[i];
        let next = lexemes.get(i + 1).map(|l| &l.token);

        let simple = match lexeme.token {
            Token::Ident(ref s) => (s.clone(), i + 1),
            Token::Star => (String::from("*"), i + 1),
            Token::Ampersand => (String::from("&"), i + 1),
            Token::Hash(ref h) => (format!("#{}", h), i + 1),
            Token::Dot => match next {
                Some(&Token::Ident(ref class)) => (format!(".{}", class), i + 2),
                _ => return Err(syntax_error(lexeme.offset, "Expected a class name after `.`")),
            },
            Token::Colon => {
                let (prefix, at) = match next {
                    Some(&Token::Colon) => ("::", i + 2),
                    _ => (":", i + 1),
                };
                match lexemes.get(at).map(|l| &l.token) {
                    Some(&Token::Ident(ref name)) => (format!("{}{}", prefix, name), at + 1),
                    Some(&Token::Function(ref name)) => {
                        let (args, end) = balanced(lexemes, at + 1, &Token::RightParen, lexeme.offset)?;
                        (format!("{}{}({})", prefix, name, args), end)
                    },
                    _ => return Err(syntax_error(lexeme.offset, "Expected a pseudo-class name after `:`")),
                }
            },
            Token::LeftBracket => {
                let (attr, end) = balanced(lexemes, i + 1, &Token::RightBracket, lexeme.offset)?;
                (format!("[{}]", compress_attr_selector(&attr)), end)
            },
            ref other => {
                return Err(syntax_error(
                    lexeme.offset,
                    format!("Unexpected `{}` in selector", other),
                ))
            },
        };
        Ok(simple)
    }
}

impl fmt::Display for SassSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = self.parts.iter().map(|p| match *p {
            SelectorPart::Compound(ref s) => s.clone(),
            SelectorPart::Combinator(c) => c.to_string(),
        }).collect::<String>();
        write!(f, "{}", text.trim_start())
    }
}

/// Flattens a nested group under its ancestors: every parent paired with
/// every child, parent-major. `&` in a child stands for the parent;
/// otherwise the two are joined as descendants.
pub fn distribute(parents: &[String], selectors: &[SassSelector]) -> Vec<String> {
    if parents.is_empty() {
        return selectors.iter().map(|s| s.to_string()).collect();
    }
    parents.iter().flat_map(|p| {
        selectors.iter().map(move |s| {
            let child = s.to_string();
            substitute_parent(&child, p).unwrap_or_else(|| format!("{} {}", p, child))
        })
    }).collect()
}
