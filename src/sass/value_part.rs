use crate::sass::number_value::NumberValue;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListSeparator {
    Space,
    Comma,
}

/// An evaluated value, ready to print or to bind to a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum ValuePart {
    Number(NumberValue),
    String(String),
    List(Vec<ValuePart>, ListSeparator),
}

impl ValuePart {
    /// Collapses single-element lists so `$x: 16px` binds a plain number.
    pub fn list(mut items: Vec<ValuePart>, separator: ListSeparator) -> ValuePart {
        if items.len() == 1 {
            items.remove(0)
        } else {
            ValuePart::List(items, separator)
        }
    }
}

impl fmt::Display for ValuePart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ValuePart::Number(ref num) => num.fmt(f),
            ValuePart::String(ref s) => write!(f, "{}", s),
            ValuePart::List(ref list, separator) => {
                let joiner = match separator {
                    ListSeparator::Space => " ",
                    ListSeparator::Comma => ", ",
                };
                write!(f, "{}", list.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(joiner))
            },
        }
    }
}
