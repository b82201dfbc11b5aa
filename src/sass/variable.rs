use crate::ast::expression::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct SassVariable {
    pub name: String,
    pub value: Value,
    pub offset: usize,
}
