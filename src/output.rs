use crate::sass::output_style::SassOutputStyle;

use indexmap::IndexSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssDeclaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

/// A flattened rule: nothing left to resolve, only to print.
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub selectors: Vec<String>,
    pub declarations: Vec<CssDeclaration>,
}

impl CssRule {
    /// Drops repeated declarations, keeping each at its first position.
    pub fn new(selectors: Vec<String>, declarations: Vec<CssDeclaration>) -> CssRule {
        let unique: IndexSet<CssDeclaration> = declarations.into_iter().collect();
        CssRule {
            selectors,
            declarations: unique.into_iter().collect(),
        }
    }

    pub fn render(&self, style: SassOutputStyle) -> String {
        let properties = self.declarations.iter()
            .map(|d| style.property(&d.name, &d.value, d.important))
            .collect::<Vec<_>>()
            .join(style.property_separator());

        format!(
            "{}{}{}{}",
            self.selectors.join(style.selector_separator()),
            style.open_brace(),
            properties,
            style.close_brace(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CssNode {
    Rule(CssRule),
    Media {
        query: String,
        children: Vec<CssNode>,
    },
    Verbatim(String),
}

impl CssNode {
    pub fn render(&self, style: SassOutputStyle) -> String {
        match *self {
            CssNode::Rule(ref rule) => rule.render(style),
            CssNode::Verbatim(ref text) => text.clone(),
            CssNode::Media { ref query, ref children } => {
                let indent = style.media_indent();
                let inner = render_nodes(children, style)
                    .lines()
                    .map(|l| if l.is_empty() { String::new() } else { format!("{}{}", indent, l) })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{}{}{}", style.media_open(query), inner, style.media_close())
            },
        }
    }
}

fn render_nodes(nodes: &[CssNode], style: SassOutputStyle) -> String {
    nodes.iter()
         .map(|n| n.render(style))
         .collect::<Vec<_>>()
         .join(style.rule_separator())
}

pub fn render(nodes: &[CssNode], style: SassOutputStyle) -> String {
    let mut output = render_nodes(nodes, style);
    if !output.is_empty() {
        output.push('\n');
    }
    output
}
