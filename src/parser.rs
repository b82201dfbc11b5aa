use crate::ast::expression::Value;
use crate::ast::node::{Declaration, Node};
use crate::ast::root::Root;
use crate::error::{ErrorKind, Result, SassError};
use crate::sass::mixin::{SassMixin, SassMixinCall};
use crate::sass::parameters::{SassArgument, SassParameter};
use crate::sass::rule::SassRule;
use crate::sass::selector::{raw_text, SassSelector};
use crate::sass::variable::SassVariable;
use crate::token::{Lexeme, Token};

/// Recursive-descent parser over a lexeme stream. Iterating yields one
/// top-level stylesheet item at a time; after a syntax error the offending
/// item is skipped and parsing resumes with the next one.
#[derive(Debug)]
pub struct Parser {
    lexemes: Vec<Lexeme>,
    pos: usize,
    end_offset: usize,
    depth: usize,
    max_depth: usize,
}

impl Iterator for Parser {
    type Item = Result<Root>;

    fn next(&mut self) -> Option<Result<Root>> {
        self.skip_trivia();
        if self.pos >= self.lexemes.len() {
            return None;
        }

        let start = self.pos;
        self.depth = 0;
        match self.parse_root() {
            Ok(root) => Some(Ok(root)),
            Err(e) => {
                if e.is_fatal() {
                    self.pos = self.lexemes.len();
                } else {
                    debug!("Skipping item at {} after {}", self.lexemes[start].offset, e);
                    self.pos = start;
                    self.skip_item();
                }
                Some(Err(e))
            },
        }
    }
}

impl Parser {
    pub fn new(lexemes: Vec<Lexeme>, max_depth: usize) -> Parser {
        let end_offset = lexemes.last().map_or(0, |l| l.offset + l.to_string().len());
        Parser {
            lexemes,
            pos: 0,
            end_offset,
            depth: 0,
            max_depth,
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.lexemes.get(self.pos).map(|l| &l.token)
    }

    pub fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.pos).cloned();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    pub fn checkpoint(&self) -> usize {
        self.pos
    }

    pub fn rewind(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Source offset of the next lexeme, or of the end of input.
    pub fn offset(&self) -> usize {
        self.lexemes.get(self.pos).map_or(self.end_offset, |l| l.offset)
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, Token::is_whitespace) {
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(&Token::Whitespace) |
                Some(&Token::Semicolon) |
                Some(&Token::Cdo) |
                Some(&Token::Cdc) => self.pos += 1,
                _ => return,
            }
        }
    }

    fn significant_token(&self, from: usize) -> Option<&Token> {
        self.lexemes[from.min(self.lexemes.len())..]
            .iter()
            .map(|l| &l.token)
            .find(|t| !t.is_whitespace())
    }

    pub fn syntax_error<S: Into<String>>(&self, offset: usize, message: S) -> SassError {
        SassError::new(ErrorKind::SyntaxError, offset, message)
    }

    pub fn unexpected_at(&self, token: &Token, offset: usize, context: &str) -> SassError {
        self.syntax_error(offset, format!("Unexpected `{}` in {}", token, context))
    }

    pub fn unexpected_eof(&self, expected: &str) -> SassError {
        SassError::new(
            ErrorKind::UnexpectedEof,
            self.end_offset,
            format!("Expected {}; reached EOF instead.", expected),
        )
    }

    pub fn expect(&mut self, expected: Token) -> Result<Lexeme> {
        match self.advance() {
            Some(ref l) if l.token == expected => Ok(l.clone()),
            Some(l) => Err(self.syntax_error(
                l.offset,
                format!("Expected to see `{}`, instead saw `{}`.", expected, l.token),
            )),
            None => Err(self.unexpected_eof(&format!("`{}`", expected))),
        }
    }

    pub(crate) fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(SassError::new(
                ErrorKind::NestingTooDeep,
                self.offset(),
                format!("Nesting too deep: more than {} levels", self.max_depth),
            ));
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    // Consumes the rest of a broken top-level item: up to a `;` outside any
    // block, or up to the `}` that closes its block.
    fn skip_item(&mut self) {
        let mut depth = 0;
        while let Some(lexeme) = self.advance() {
            match lexeme.token {
                Token::LeftBrace => depth += 1,
                Token::RightBrace => {
                    if depth <= 1 {
                        return;
                    }
                    depth -= 1;
                },
                Token::Semicolon if depth == 0 => return,
                _ => {},
            }
        }
    }

    // Everything up to (not including) the `{` opening a block.
    fn prelude(&mut self) -> Result<Vec<Lexeme>> {
        let mut lexemes = vec![];
        let mut depth = 0;
        loop {
            match self.peek() {
                None => return Err(self.unexpected_eof("`{`")),
                Some(&Token::LeftBrace) if depth == 0 => return Ok(lexemes),
                Some(&Token::LeftParen) | Some(&Token::Function(_)) | Some(&Token::LeftBracket) => depth += 1,
                Some(&Token::RightParen) | Some(&Token::RightBracket) => depth -= 1,
                Some(&Token::Semicolon) | Some(&Token::RightBrace) | Some(&Token::LeftBrace) => {
                    let offset = self.offset();
                    return Err(self.syntax_error(offset, "Expected `{` to open a block"));
                },
                _ => {},
            }
            if let Some(l) = self.advance() {
                lexemes.push(l);
            }
        }
    }

    // `;` ends a statement; so does the `}` of the enclosing block or EOF.
    fn end_statement(&mut self) -> Result<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(&Token::Semicolon) => {
                self.pos += 1;
                Ok(())
            },
            Some(&Token::RightBrace) | None => Ok(()),
            Some(other) => Err(self.unexpected_at(other, self.offset(), "statement")),
        }
    }

    fn starts_nested_rule(&self) -> bool {
        let mut depth = 0i32;
        for lexeme in &self.lexemes[self.pos..] {
            match lexeme.token {
                Token::LeftParen | Token::Function(_) | Token::LeftBracket => depth += 1,
                Token::RightParen | Token::RightBracket => depth -= 1,
                Token::LeftBrace if depth == 0 => return true,
                Token::Semicolon | Token::RightBrace if depth == 0 => return false,
                _ => {},
            }
        }
        false
    }

    fn parse_root(&mut self) -> Result<Root> {
        let keyword = match self.peek() {
            Some(&Token::AtKeyword(ref k)) => k.to_ascii_lowercase(),
            Some(&Token::Variable(_)) => return Ok(Root::Variable(self.parse_variable()?)),
            _ => return Ok(Root::Rule(self.parse_rule()?)),
        };

        match &keyword[..] {
            "charset" | "import" => self.parse_verbatim(),
            "mixin" => Ok(Root::Mixin(self.parse_mixin()?)),
            "media" => self.parse_media(),
            "page" | "font-face" => self.parse_at_block(&keyword),
            "include" => Err(self.syntax_error(
                self.offset(),
                "`@include` is only allowed inside a ruleset or mixin body",
            )),
            other => Err(self.syntax_error(self.offset(), format!("Unknown directive `@{}`", other))),
        }
    }

    fn parse_verbatim(&mut self) -> Result<Root> {
        let mut lexemes = vec![];
        while let Some(lexeme) = self.advance() {
            match lexeme.token {
                Token::Semicolon => break,
                Token::LeftBrace | Token::RightBrace => {
                    return Err(self.unexpected_at(&lexeme.token, lexeme.offset, "directive"));
                },
                _ => lexemes.push(lexeme),
            }
        }
        Ok(Root::Verbatim(format!("{};", raw_text(&lexemes))))
    }

    fn parse_variable(&mut self) -> Result<SassVariable> {
        let lexeme = self.advance().ok_or_else(|| self.unexpected_eof("a variable"))?;
        let name = match lexeme.token {
            Token::Variable(name) => name,
            other => return Err(self.unexpected_at(&other, lexeme.offset, "variable assignment")),
        };
        self.skip_whitespace();
        self.expect(Token::Colon)?;

        let value_offset = self.offset();
        let value = Value::parse(self)?;
        if value.is_empty() {
            return Err(self.syntax_error(value_offset, format!("Expected a value for `${}`", name)));
        }
        self.skip_whitespace();
        if self.peek() == Some(&Token::Important) {
            self.pos += 1;
        }
        self.end_statement()?;

        Ok(SassVariable { name, value, offset: lexeme.offset })
    }

    fn parse_declaration(&mut self) -> Result<Declaration> {
        let lexeme = self.advance().ok_or_else(|| self.unexpected_eof("a property"))?;
        let name = match lexeme.token {
            Token::Ident(name) => name,
            other => return Err(self.unexpected_at(&other, lexeme.offset, "property name")),
        };
        self.skip_whitespace();
        self.expect(Token::Colon)?;

        let value_offset = self.offset();
        let value = Value::parse(self)?;
        if value.is_empty() {
            return Err(self.syntax_error(value_offset, format!("Expected a value for `{}`", name)));
        }
        self.skip_whitespace();
        let important = self.peek() == Some(&Token::Important);
        if important {
            self.pos += 1;
        }
        self.end_statement()?;

        Ok(Declaration { name, value, important, offset: lexeme.offset })
    }

    fn parse_rule(&mut self) -> Result<SassRule> {
        let offset = self.offset();
        let prelude = self.prelude()?;
        let selectors = SassSelector::parse_group(&prelude, self.offset())?;
        self.expect(Token::LeftBrace)?;

        let mut rule = SassRule::new(selectors, offset);
        rule.children = self.parse_body()?;
        Ok(rule)
    }

    // Ruleset and mixin bodies; consumes the closing `}`.
    fn parse_body(&mut self) -> Result<Vec<Node>> {
        self.enter()?;
        let mut children = vec![];

        loop {
            self.skip_trivia();
            let child = match self.peek() {
                None => return Err(self.unexpected_eof("rule body ending in `}`")),
                Some(&Token::RightBrace) => {
                    self.pos += 1;
                    break;
                },
                Some(&Token::Variable(_)) => Node::Variable(self.parse_variable()?),
                Some(&Token::AtKeyword(ref k)) if k == "include" => Node::MixinCall(self.parse_include()?),
                Some(&Token::AtKeyword(ref k)) => {
                    return Err(self.syntax_error(
                        self.offset(),
                        format!("`@{}` is not allowed inside a ruleset", k),
                    ))
                },
                Some(_) if self.starts_nested_rule() => Node::Rule(self.parse_rule()?),
                Some(_) => Node::Property(self.parse_declaration()?),
            };
            children.push(child);
        }

        self.leave();
        Ok(children)
    }

    // Name of a mixin definition or include, and whether a `(` follows.
    fn parse_mixin_name(&mut self) -> Result<(String, bool)> {
        self.skip_whitespace();
        let lexeme = self.advance().ok_or_else(|| self.unexpected_eof("a mixin name"))?;
        match lexeme.token {
            Token::Function(name) => Ok((name, true)),
            Token::Ident(name) => {
                let checkpoint = self.pos;
                self.skip_whitespace();
                if self.peek() == Some(&Token::LeftParen) {
                    self.pos += 1;
                    Ok((name, true))
                } else {
                    self.pos = checkpoint;
                    Ok((name, false))
                }
            },
            other => Err(self.unexpected_at(&other, lexeme.offset, "mixin name")),
        }
    }

    fn parse_mixin(&mut self) -> Result<SassMixin> {
        let offset = self.offset();
        self.pos += 1;
        let (name, has_parameters) = self.parse_mixin_name()?;
        let parameters = if has_parameters { self.parse_parameters()? } else { vec![] };
        self.skip_whitespace();
        self.expect(Token::LeftBrace)?;
        let children = self.parse_body()?;

        Ok(SassMixin { name, parameters, children, offset })
    }

    // After the `(`; consumes the `)`.
    fn parse_parameters(&mut self) -> Result<Vec<SassParameter>> {
        let mut parameters = vec![];
        loop {
            self.skip_whitespace();
            let lexeme = self.advance().ok_or_else(|| self.unexpected_eof("`)`"))?;
            let name = match lexeme.token {
                Token::RightParen if parameters.is_empty() => return Ok(parameters),
                Token::Variable(name) => name,
                other => return Err(self.unexpected_at(&other, lexeme.offset, "mixin parameters")),
            };

            self.skip_whitespace();
            let default = if self.peek() == Some(&Token::Colon) {
                self.pos += 1;
                let offset = self.offset();
                let list = Value::parse_list(self)?;
                if list.is_empty() {
                    return Err(self.syntax_error(offset, format!("Expected a default for `${}`", name)));
                }
                Some(Value { groups: vec![list] })
            } else {
                None
            };
            parameters.push(SassParameter { name, default });

            self.skip_whitespace();
            let separator = self.advance().ok_or_else(|| self.unexpected_eof("`)`"))?;
            match separator.token {
                Token::Comma => {},
                Token::RightParen => return Ok(parameters),
                other => return Err(self.unexpected_at(&other, separator.offset, "mixin parameters")),
            }
        }
    }

    fn parse_include(&mut self) -> Result<SassMixinCall> {
        let offset = self.offset();
        self.pos += 1;
        let (name, has_arguments) = self.parse_mixin_name()?;
        let arguments = if has_arguments { self.parse_arguments()? } else { vec![] };
        self.end_statement()?;

        Ok(SassMixinCall { name, arguments, offset })
    }

    // After the `(`; consumes the `)`.
    fn parse_arguments(&mut self) -> Result<Vec<SassArgument>> {
        let mut arguments = vec![];
        loop {
            self.skip_whitespace();
            if self.peek() == Some(&Token::RightParen) && arguments.is_empty() {
                self.pos += 1;
                return Ok(arguments);
            }

            let offset = self.offset();
            let named = match self.peek() {
                Some(&Token::Variable(ref n)) if self.significant_token(self.pos + 1) == Some(&Token::Colon) => {
                    Some(n.clone())
                },
                _ => None,
            };
            if named.is_some() {
                self.pos += 1;
                self.skip_whitespace();
                self.expect(Token::Colon)?;
            }

            let list = Value::parse_list(self)?;
            if list.is_empty() {
                return Err(self.syntax_error(offset, "Expected a mixin argument"));
            }
            arguments.push(SassArgument { name: named, value: Value { groups: vec![list] }, offset });

            self.skip_whitespace();
            let separator = self.advance().ok_or_else(|| self.unexpected_eof("`)`"))?;
            match separator.token {
                Token::Comma => {},
                Token::RightParen => return Ok(arguments),
                other => return Err(self.unexpected_at(&other, separator.offset, "mixin arguments")),
            }
        }
    }

    fn parse_media(&mut self) -> Result<Root> {
        let offset = self.offset();
        self.pos += 1;
        let query = raw_text(&self.prelude()?);
        if query.is_empty() {
            return Err(self.syntax_error(offset, "Expected a media query"));
        }
        self.expect(Token::LeftBrace)?;
        self.enter()?;

        let mut children = vec![];
        loop {
            self.skip_trivia();
            let child = match self.peek() {
                None => return Err(self.unexpected_eof("media block ending in `}`")),
                Some(&Token::RightBrace) => {
                    self.pos += 1;
                    break;
                },
                Some(&Token::Variable(_)) => Root::Variable(self.parse_variable()?),
                Some(&Token::AtKeyword(ref k)) if k == "mixin" => Root::Mixin(self.parse_mixin()?),
                Some(&Token::AtKeyword(ref k)) if k == "media" => self.parse_media()?,
                Some(&Token::AtKeyword(ref k)) => {
                    return Err(self.syntax_error(
                        self.offset(),
                        format!("`@{}` is not allowed inside `@media`", k),
                    ))
                },
                Some(_) => Root::Rule(self.parse_rule()?),
            };
            children.push(child);
        }

        self.leave();
        Ok(Root::Media { query, children })
    }

    fn parse_at_block(&mut self, keyword: &str) -> Result<Root> {
        self.pos += 1;
        let prelude = raw_text(&self.prelude()?);
        let name = if prelude.is_empty() {
            format!("@{}", keyword)
        } else {
            format!("@{} {}", keyword, prelude)
        };
        self.expect(Token::LeftBrace)?;

        let mut declarations = vec![];
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(self.unexpected_eof("`}`")),
                Some(&Token::RightBrace) => {
                    self.pos += 1;
                    break;
                },
                Some(_) => declarations.push(self.parse_declaration()?),
            }
        }
        Ok(Root::AtBlock { name, declarations })
    }
}
