use crate::ast::expression::Value;
use crate::sass::mixin::SassMixinCall;
use crate::sass::rule::SassRule;
use crate::sass::variable::SassVariable;

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: Value,
    pub important: bool,
    pub offset: usize,
}

/// One item of a ruleset or mixin body, kept unevaluated until the
/// enclosing rule or include is expanded.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Property(Declaration),
    Rule(SassRule),
    Variable(SassVariable),
    MixinCall(SassMixinCall),
}
