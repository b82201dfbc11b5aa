use crate::ast::node::Declaration;
use crate::sass::mixin::SassMixin;
use crate::sass::rule::SassRule;
use crate::sass::variable::SassVariable;

#[derive(Debug, Clone, PartialEq)]
pub enum Root {
    /// `@charset` and `@import`, re-emitted as written.
    Verbatim(String),
    Variable(SassVariable),
    Mixin(SassMixin),
    Rule(SassRule),
    Media {
        query: String,
        children: Vec<Root>,
    },
    /// `@page` and `@font-face`: a prelude plus plain declarations.
    AtBlock {
        name: String,
        declarations: Vec<Declaration>,
    },
}
