use crate::ast::node::Node;
use crate::sass::parameters::{SassArgument, SassParameter};

use std::collections::HashMap;
use std::rc::Rc;

/// A mixin body is stored unevaluated and walked again for every include.
#[derive(Clone, Debug, PartialEq)]
pub struct SassMixin {
    pub name: String,
    pub parameters: Vec<SassParameter>,
    pub children: Vec<Node>,
    pub offset: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SassMixinCall {
    pub name: String,
    pub arguments: Vec<SassArgument>,
    pub offset: usize,
}

#[derive(Debug, Default)]
pub struct MixinRegistry {
    mixins: HashMap<String, Rc<SassMixin>>,
}

impl MixinRegistry {
    pub fn new() -> MixinRegistry {
        MixinRegistry::default()
    }

    /// Define-once: returns false and keeps the first definition when the
    /// name is already taken.
    pub fn define(&mut self, mixin: SassMixin) -> bool {
        if self.mixins.contains_key(&mixin.name) {
            return false;
        }
        self.mixins.insert(mixin.name.clone(), Rc::new(mixin));
        true
    }

    pub fn get(&self, name: &str) -> Option<Rc<SassMixin>> {
        self.mixins.get(name).cloned()
    }
}
