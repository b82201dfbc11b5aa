use crate::ast::node::Node;
use crate::sass::selector::SassSelector;

#[derive(Clone, Debug, PartialEq)]
pub struct SassRule {
    pub selectors: Vec<SassSelector>,
    pub children: Vec<Node>,
    pub offset: usize,
}

impl SassRule {
    pub fn new(selectors: Vec<SassSelector>, offset: usize) -> SassRule {
        SassRule {
            selectors,
            children: Vec::new(),
            offset,
        }
    }
}
