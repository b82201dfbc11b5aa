use crate::sass::value_part::ValuePart;

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Bound(ValuePart),
    /// A mixin parameter nobody supplied: look it up where the include was written.
    Caller,
}

/// Variable bindings for a single include expansion, chained to the frame of
/// the code that wrote the include. Frames are owned by one expansion and
/// never shared between siblings.
#[derive(Debug)]
pub struct Frame<'p> {
    bindings: HashMap<String, Binding>,
    parent: Option<&'p Frame<'p>>,
}

impl Frame<'static> {
    /// The frame for code outside any mixin; assignments there are global.
    pub fn root() -> Frame<'static> {
        Frame {
            bindings: HashMap::new(),
            parent: None,
        }
    }
}

impl<'p> Frame<'p> {
    pub fn chained(parent: &'p Frame<'p>) -> Frame<'p> {
        Frame {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn bind_local(&mut self, name: &str, value: ValuePart) {
        self.bindings.insert(name.to_string(), Binding::Bound(value));
    }

    pub fn bind_caller(&mut self, name: &str) {
        self.bindings.insert(name.to_string(), Binding::Caller);
    }

    fn lookup(&self, name: &str) -> Option<&ValuePart> {
        match self.bindings.get(name) {
            Some(&Binding::Bound(ref v)) => Some(v),
            Some(&Binding::Caller) | None => self.parent.and_then(|p| p.lookup(name)),
        }
    }
}

/// Global variable bindings. Define-once: the first assignment wins.
#[derive(Debug, Default)]
pub struct Context {
    variables: HashMap<String, ValuePart>,
}

impl Context {
    pub fn new() -> Context {
        Context::default()
    }

    /// Returns false when `name` was already bound and the new value was dropped.
    pub fn define_global(&mut self, name: &str, value: ValuePart) -> bool {
        if self.variables.contains_key(name) {
            return false;
        }
        self.variables.insert(name.to_string(), value);
        true
    }

    /// Innermost frame first, then its callers, then the globals.
    /// `None` means the name is unbound everywhere.
    pub fn resolve(&self, frame: &Frame, name: &str) -> Option<ValuePart> {
        frame.lookup(name)
             .or_else(|| self.variables.get(name))
             .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> ValuePart {
        ValuePart::String(text.into())
    }

    #[test]
    fn it_keeps_the_first_global_definition() {
        let mut context = Context::new();
        assert!(context.define_global("c", s("red")));
        assert!(!context.define_global("c", s("blue")));
        assert_eq!(context.resolve(&Frame::root(), "c"), Some(s("red")));
    }

    #[test]
    fn it_prefers_local_bindings_over_globals() {
        let mut context = Context::new();
        context.define_global("pacman", s("magenta"));
        let root = Frame::root();
        let mut frame = Frame::chained(&root);
        frame.bind_local("pacman", s("#444"));
        assert_eq!(context.resolve(&frame, "pacman"), Some(s("#444")));
        assert_eq!(context.resolve(&root, "pacman"), Some(s("magenta")));
    }

    #[test]
    fn it_sends_caller_bindings_to_the_enclosing_scope() {
        let mut context = Context::new();
        context.define_global("dist", s("1px"));
        let root = Frame::root();
        let mut outer = Frame::chained(&root);
        outer.bind_local("dist", s("2px"));
        let mut inner = Frame::chained(&outer);
        inner.bind_caller("dist");
        assert_eq!(context.resolve(&inner, "dist"), Some(s("2px")));

        let mut top = Frame::chained(&root);
        top.bind_caller("dist");
        assert_eq!(context.resolve(&top, "dist"), Some(s("1px")));
    }

    #[test]
    fn it_isolates_sibling_frames() {
        let context = Context::new();
        let root = Frame::root();
        let mut first = Frame::chained(&root);
        first.bind_local("x", s("a"));
        let second = Frame::chained(&root);
        assert_eq!(context.resolve(&second, "x"), None);
        assert_eq!(context.resolve(&first, "x"), Some(s("a")));
    }

    #[test]
    fn it_overwrites_within_a_frame() {
        let context = Context::new();
        let root = Frame::root();
        let mut frame = Frame::chained(&root);
        frame.bind_local("x", s("a"));
        frame.bind_local("x", s("b"));
        assert_eq!(context.resolve(&frame, "x"), Some(s("b")));
        assert!(!frame.is_root());
        assert!(root.is_root());
    }
}
