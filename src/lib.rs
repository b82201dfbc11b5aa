#[macro_use]
extern crate log;

mod ast;
mod context;
mod error;
mod expression_evaluator;
mod operator;
mod output;
mod parser;
mod sass;
mod substituter;
mod token;
mod tokenizer;
mod tokenizer_utils;

use crate::parser::Parser;
use crate::substituter::Substituter;

pub use crate::error::{ErrorKind, Result, SassError};
pub use crate::sass::output_style::SassOutputStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub style: SassOutputStyle,
    /// Bound on nested rulesets, `@media` blocks, include expansions and
    /// parenthesized or function values.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            style: SassOutputStyle::default(),
            max_depth: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub css: String,
    /// Problems that were skipped over: dropped declarations and items,
    /// unresolved variables, unknown mixins.
    pub diagnostics: Vec<SassError>,
}

pub fn compile(input: &str, style: &str) -> Result<String> {
    let options = Options {
        style: style.parse()?,
        ..Options::default()
    };
    Ok(compile_with_options(input, &options)?.css)
}

pub fn compile_with_options(input: &str, options: &Options) -> Result<Compiled> {
    let lexemes = tokenizer::tokenize(input)?;
    debug!("{} lexemes", lexemes.len());

    let mut substituter = Substituter::new(options.max_depth);
    let mut nodes = vec![];
    for item in Parser::new(lexemes, options.max_depth) {
        match item {
            Ok(root) => nodes.extend(substituter.root(root)?),
            Err(e) => {
                if e.is_fatal() {
                    return Err(e);
                }
                substituter.record(e);
            },
        }
    }

    Ok(Compiled {
        css: output::render(&nodes, options.style),
        diagnostics: substituter.into_diagnostics(),
    })
}
