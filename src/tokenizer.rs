use crate::error::{ErrorKind, Result, SassError};
use crate::sass::number_value::NumberValue;
use crate::token::{Lexeme, Token};
use crate::tokenizer_utils::*;

/// Splits stylesheet source into lexemes. Comments and runs of whitespace
/// collapse into a single `Token::Whitespace`.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    offset: usize,
    last: Option<Token>,
}

pub fn tokenize(text: &str) -> Result<Vec<Lexeme>> {
    Tokenizer::new(text).collect()
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Tokenizer<'a> {
        Tokenizer {
            text,
            bytes: text.as_bytes(),
            offset: 0,
            last: None,
        }
    }

    fn limit(&self) -> usize {
        self.bytes.len()
    }

    fn byte_at(&self, i: usize) -> Option<u8> {
        self.bytes.get(i).cloned()
    }

    fn scan_while<F: Fn(u8) -> bool>(&self, start: usize, f: F) -> usize {
        let mut i = start;
        while i < self.limit() && f(self.bytes[i]) {
            i += 1;
        }
        i
    }

    fn starts_with(&self, s: &str) -> bool {
        self.text[self.offset..].starts_with(s)
    }

    fn eat_comment(&mut self) -> Result<()> {
        let start = self.offset;
        match self.text[start + 2..].find("*/") {
            Some(pos) => {
                self.offset = start + 2 + pos + 2;
                Ok(())
            },
            None => Err(SassError::new(
                ErrorKind::TokenizerError,
                start,
                "Expected comment to end with `*/`; reached EOF instead.",
            )),
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<bool> {
        let start = self.offset;
        loop {
            self.offset = self.scan_while(self.offset, is_ascii_whitespace);
            if self.starts_with("/*") {
                self.eat_comment()?;
            } else {
                break;
            }
        }
        Ok(self.offset > start)
    }

    // A leading `-` is a sign only where a value may start, so `10px-2px`
    // still lexes as a subtraction.
    fn sign_allowed(&self) -> bool {
        match self.last {
            None |
            Some(Token::Whitespace) |
            Some(Token::Colon) |
            Some(Token::Comma) |
            Some(Token::LeftParen) |
            Some(Token::Function(_)) |
            Some(Token::Plus) |
            Some(Token::Minus) |
            Some(Token::Star) |
            Some(Token::Slash) => true,
            _ => false,
        }
    }

    fn starts_number(&self, i: usize) -> bool {
        match self.byte_at(i) {
            Some(c) if is_digit(c) => true,
            Some(b'.') => self.byte_at(i + 1).map_or(false, is_digit),
            _ => false,
        }
    }

    fn next_number(&mut self) -> Result<Token> {
        let start = self.offset;
        let mut i = start;
        if self.bytes[i] == b'-' {
            i += 1;
        }
        i = self.scan_while(i, is_digit);
        if self.byte_at(i) == Some(b'.') && self.byte_at(i + 1).map_or(false, is_digit) {
            i = self.scan_while(i + 1, is_digit);
        }
        let scalar: f64 = self.text[start..i].parse().map_err(|_| {
            SassError::new(
                ErrorKind::TokenizerError,
                start,
                format!("Invalid number `{}`", &self.text[start..i]),
            )
        })?;

        let number = if self.byte_at(i) == Some(b'%') {
            i += 1;
            NumberValue::with_units(scalar, "%")
        } else {
            let unit_end = self.scan_while(i, valid_unit_char);
            let unit = &self.text[i..unit_end];
            i = unit_end;
            if unit.is_empty() {
                NumberValue::from_scalar(scalar)
            } else {
                NumberValue::with_units(scalar, unit)
            }
        };
        self.offset = i;
        Ok(Token::Number(number.with_raw(&self.text[start..i])))
    }

    fn next_string(&mut self) -> Result<Token> {
        let start = self.offset;
        let quote = self.bytes[start];
        let mut i = start + 1;
        loop {
            i = self.scan_while(i, isnt_quote(quote));
            match self.byte_at(i) {
                Some(b'\\') => i += 2,
                Some(_) => break,
                None => {
                    return Err(SassError::new(
                        ErrorKind::TokenizerError,
                        start,
                        "Expected closing quote; reached EOF instead.",
                    ))
                },
            }
        }
        self.offset = i + 1;
        Ok(Token::Str(self.text[start..self.offset].to_string()))
    }

    fn next_uri(&mut self, start: usize) -> Result<Token> {
        let content_start = self.offset;
        let end = self.scan_while(content_start, isnt_right_paren);
        if end >= self.limit() {
            return Err(SassError::new(
                ErrorKind::TokenizerError,
                start,
                "Expected `)` to close url(; reached EOF instead.",
            ));
        }
        self.offset = end + 1;
        Ok(Token::Uri(format!("url({})", self.text[content_start..end].trim())))
    }

    fn next_ident_like(&mut self) -> Result<Token> {
        let start = self.offset;
        let end = self.scan_while(start + 1, is_name_char);
        let name = &self.text[start..end];
        self.offset = end;

        if self.byte_at(end) == Some(b'(') {
            self.offset += 1;
            if name.eq_ignore_ascii_case("url") {
                return self.next_uri(start);
            }
            return Ok(Token::Function(name.to_string()));
        }
        Ok(Token::Ident(name.to_string()))
    }

    // `$`, `@` and `#` prefixes: returns the name after the sigil, if any.
    fn sigil_name(&mut self) -> Option<String> {
        let start = self.offset + 1;
        let end = self.scan_while(start, is_name_char);
        if end == start {
            return None;
        }
        self.offset = end;
        Some(self.text[start..end].to_string())
    }

    fn next_important(&mut self) -> Option<Token> {
        let after_bang = self.scan_while(self.offset + 1, is_ascii_whitespace);
        let end = after_bang + "important".len();
        let important = self.text.get(after_bang..end)
            .map_or(false, |s| s.eq_ignore_ascii_case("important"));
        if important {
            self.offset = end;
            Some(Token::Important)
        } else {
            None
        }
    }

    // `U+0-7F`, `U+4??`: hex digits or `?`, optionally `-` and more hex.
    // At least one digit or `?` is required so `u+b` stays a selector.
    fn next_unicode_range(&mut self) -> Option<Token> {
        let start = self.offset;
        let first = start + 2;
        let mut end = self.scan_while(first, |c| c.is_ascii_hexdigit() || c == b'?');
        let marked = self.bytes[first..end].iter().any(|&c| is_digit(c) || c == b'?');
        if !marked {
            return None;
        }
        if self.byte_at(end) == Some(b'-') && self.byte_at(end + 1).map_or(false, |c| c.is_ascii_hexdigit()) {
            end = self.scan_while(end + 1, |c| c.is_ascii_hexdigit());
        }
        self.offset = end;
        Some(Token::UnicodeRange(self.text[start..end].to_string()))
    }

    fn next_token(&mut self) -> Result<Token> {
        let c = self.bytes[self.offset];
        let next = self.byte_at(self.offset + 1);

        if self.starts_with("<!--") {
            self.offset += 4;
            return Ok(Token::Cdo);
        }
        if self.starts_with("-->") {
            self.offset += 3;
            return Ok(Token::Cdc);
        }
        if self.starts_number(self.offset) ||
           (c == b'-' && self.starts_number(self.offset + 1) && self.sign_allowed()) {
            return self.next_number();
        }
        if (c == b'u' || c == b'U') && next == Some(b'+') {
            if let Some(range) = self.next_unicode_range() {
                return Ok(range);
            }
        }
        if is_name_start(c) ||
           (c == b'-' && next.map_or(false, |n| is_name_start(n) || n == b'-')) {
            return self.next_ident_like();
        }

        let single = match c {
            b'$' => match self.sigil_name() {
                Some(name) => return Ok(Token::Variable(name)),
                None => Token::Delim('$'),
            },
            b'@' => match self.sigil_name() {
                Some(name) => return Ok(Token::AtKeyword(name)),
                None => Token::Delim('@'),
            },
            b'#' => match self.sigil_name() {
                Some(name) => return Ok(Token::Hash(name)),
                None => Token::Delim('#'),
            },
            b'"' | b'\'' => return self.next_string(),
            b'!' => match self.next_important() {
                Some(t) => return Ok(t),
                None => Token::Delim('!'),
            },
            b':' => Token::Colon,
            b';' => Token::Semicolon,
            b',' => Token::Comma,
            b'.' => Token::Dot,
            b'{' => Token::LeftBrace,
            b'}' => Token::RightBrace,
            b'(' => Token::LeftParen,
            b')' => Token::RightParen,
            b'[' => Token::LeftBracket,
            b']' => Token::RightBracket,
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'>' => Token::Greater,
            b'~' => Token::Tilde,
            b'&' => Token::Ampersand,
            _ => {
                // Non-ASCII bytes are name chars, so this is a single-byte char.
                Token::Delim(c as char)
            },
        };
        self.offset += 1;
        Ok(single)
    }

    fn next_lexeme(&mut self) -> Result<Option<Lexeme>> {
        let start = self.offset;
        if self.skip_whitespace_and_comments()? {
            return Ok(Some(Lexeme { token: Token::Whitespace, offset: start }));
        }
        if self.offset >= self.limit() {
            return Ok(None);
        }
        let token = self.next_token()?;
        Ok(Some(Lexeme { token, offset: start }))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Lexeme>;

    fn next(&mut self) -> Option<Result<Lexeme>> {
        match self.next_lexeme() {
            Ok(Some(lexeme)) => {
                self.last = Some(lexeme.token.clone());
                Some(Ok(lexeme))
            },
            Ok(None) => None,
            Err(e) => {
                self.offset = self.limit();
                Some(Err(e))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token> {
        tokenize(text).unwrap().into_iter().map(|l| l.token).collect()
    }

    #[test]
    fn it_returns_nothing_for_empty_string() {
        assert_eq!(tokens(""), vec![]);
    }

    #[test]
    fn it_tokenizes_a_declaration() {
        assert_eq!(tokens("margin-left: 10px;"), vec![
            Token::Ident("margin-left".into()),
            Token::Colon,
            Token::Whitespace,
            Token::Number(NumberValue::with_units(10.0, "px").with_raw("10px")),
            Token::Semicolon,
        ]);
    }

    #[test]
    fn it_strips_comments_into_whitespace() {
        assert_eq!(tokens("a/* hi */b"), vec![
            Token::Ident("a".into()),
            Token::Whitespace,
            Token::Ident("b".into()),
        ]);
    }

    #[test]
    fn it_tokenizes_variables_and_math() {
        assert_eq!(tokens("$margin / 2"), vec![
            Token::Variable("margin".into()),
            Token::Whitespace,
            Token::Slash,
            Token::Whitespace,
            Token::Number(NumberValue::from_scalar(2.0).with_raw("2")),
        ]);
    }

    #[test]
    fn it_tells_signs_from_subtraction() {
        assert_eq!(tokens("-5px 10px-2px"), vec![
            Token::Number(NumberValue::with_units(-5.0, "px").with_raw("-5px")),
            Token::Whitespace,
            Token::Number(NumberValue::with_units(10.0, "px").with_raw("10px")),
            Token::Minus,
            Token::Number(NumberValue::with_units(2.0, "px").with_raw("2px")),
        ]);
    }

    #[test]
    fn it_tokenizes_percentages_and_fractions() {
        assert_eq!(tokens("50% .5em"), vec![
            Token::Number(NumberValue::with_units(50.0, "%").with_raw("50%")),
            Token::Whitespace,
            Token::Number(NumberValue::with_units(0.5, "em").with_raw(".5em")),
        ]);
    }

    #[test]
    fn it_tokenizes_selectors() {
        assert_eq!(tokens("#data td.ln:hover"), vec![
            Token::Hash("data".into()),
            Token::Whitespace,
            Token::Ident("td".into()),
            Token::Dot,
            Token::Ident("ln".into()),
            Token::Colon,
            Token::Ident("hover".into()),
        ]);
    }

    #[test]
    fn it_tokenizes_urls_strings_and_functions() {
        assert_eq!(tokens("url( a.png ) \"x\" rgb("), vec![
            Token::Uri("url(a.png)".into()),
            Token::Whitespace,
            Token::Str("\"x\"".into()),
            Token::Whitespace,
            Token::Function("rgb".into()),
        ]);
    }

    #[test]
    fn it_tokenizes_directives() {
        assert_eq!(tokens("@font-face <!-- --> ! important"), vec![
            Token::AtKeyword("font-face".into()),
            Token::Whitespace,
            Token::Cdo,
            Token::Whitespace,
            Token::Cdc,
            Token::Whitespace,
            Token::Important,
        ]);
    }

    #[test]
    fn it_tokenizes_unicode_ranges() {
        assert_eq!(tokens("U+0000-00FF, u+4??"), vec![
            Token::UnicodeRange("U+0000-00FF".into()),
            Token::Comma,
            Token::Whitespace,
            Token::UnicodeRange("u+4??".into()),
        ]);
        assert_eq!(tokens("u+b"), vec![
            Token::Ident("u".into()),
            Token::Plus,
            Token::Ident("b".into()),
        ]);
    }

    #[test]
    fn it_leaves_non_ascii_after_a_bang_alone() {
        assert_eq!(tokens("!ééééé"), vec![
            Token::Delim('!'),
            Token::Ident("ééééé".into()),
        ]);
    }

    #[test]
    fn it_keeps_escaped_quotes_in_strings() {
        assert_eq!(tokens(r#""a\"b""#), vec![Token::Str(r#""a\"b""#.into())]);
    }

    #[test]
    fn it_errors_on_unterminated_comment() {
        let err = tokenize("a { /* never ends").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenizerError);
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn it_errors_on_unterminated_string() {
        let err = tokenize("content: \"oops").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenizerError);
        assert_eq!(err.offset, 9);
    }

    #[test]
    fn it_records_offsets() {
        let lexemes = tokenize("a {").unwrap();
        assert_eq!(lexemes[2], Lexeme { token: Token::LeftBrace, offset: 2 });
    }
}
