use crate::error::{ErrorKind, Result, SassError};

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SassOutputStyle {
    /// `a { color: red; margin: 0; }`, one rule per paragraph.
    Compact,
    /// One declaration per line.
    Expanded,
    /// No optional whitespace at all.
    Compressed,
}

impl Default for SassOutputStyle {
    fn default() -> SassOutputStyle {
        SassOutputStyle::Compact
    }
}

impl FromStr for SassOutputStyle {
    type Err = SassError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compact"    => Ok(SassOutputStyle::Compact),
            "expanded"   => Ok(SassOutputStyle::Expanded),
            "compressed" => Ok(SassOutputStyle::Compressed),
            style        => Err(SassError {
                offset: 0,
                kind: ErrorKind::InvalidOutputStyle,
                message: format!("Unknown output style {:?}. Please specify one of compact, expanded, or compressed.", style),
            }),
        }
    }
}

impl SassOutputStyle {
    pub fn rule_separator(&self) -> &'static str {
        match *self {
            SassOutputStyle::Compressed => "",
            _ => "\n\n",
        }
    }

    pub fn selector_separator(&self) -> &'static str {
        match *self {
            SassOutputStyle::Compressed => ",",
            _ => ", ",
        }
    }

    pub fn open_brace(&self) -> &'static str {
        match *self {
            SassOutputStyle::Compact => " { ",
            SassOutputStyle::Expanded => " {\n  ",
            SassOutputStyle::Compressed => "{",
        }
    }

    pub fn property_separator(&self) -> &'static str {
        match *self {
            SassOutputStyle::Compact => " ",
            SassOutputStyle::Expanded => "\n  ",
            SassOutputStyle::Compressed => ";",
        }
    }

    pub fn close_brace(&self) -> &'static str {
        match *self {
            SassOutputStyle::Compact => " }",
            SassOutputStyle::Expanded => "\n}",
            SassOutputStyle::Compressed => "}",
        }
    }

    pub fn property(&self, name: &str, value: &str, important: bool) -> String {
        match *self {
            SassOutputStyle::Compressed => {
                format!("{}:{}{}", name, value, if important { "!important" } else { "" })
            },
            _ => format!("{}: {}{};", name, value, if important { " !important" } else { "" }),
        }
    }

    /// Opening of an `@media` block; the children follow on their own lines.
    pub fn media_open(&self, query: &str) -> String {
        match *self {
            SassOutputStyle::Compressed => format!("@media {}{{", query),
            _ => format!("@media {} {{\n", query),
        }
    }

    pub fn media_close(&self) -> &'static str {
        match *self {
            SassOutputStyle::Compressed => "}",
            _ => "\n}",
        }
    }

    pub fn media_indent(&self) -> &'static str {
        match *self {
            SassOutputStyle::Expanded => "  ",
            _ => "",
        }
    }
}
