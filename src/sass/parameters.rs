use crate::ast::expression::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct SassParameter {
    pub name: String,
    pub default: Option<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SassArgument {
    pub name: Option<String>,
    pub value: Value,
    pub offset: usize,
}

/// Where a parameter's value comes from for one include.
#[derive(Clone, Debug, PartialEq)]
pub enum Supplied<'a> {
    Argument(&'a Value),
    Default(&'a Value),
    /// Nothing supplied: the name resolves through the caller's scope.
    Caller,
}

/// Positional arguments bind first, then named ones, then defaults.
pub fn collate_args_parameters<'a>(
    parameters: &'a [SassParameter],
    arguments: &'a [SassArgument],
) -> Vec<(&'a str, Supplied<'a>)> {
    let mut positional = arguments.iter().filter(|a| a.name.is_none());

    let collated = parameters.iter().map(|p| {
        let named = arguments.iter().find(|a| a.name.as_ref() == Some(&p.name));
        let supplied = match (positional.next(), named, p.default.as_ref()) {
            (Some(a), _, _) | (None, Some(a), _) => Supplied::Argument(&a.value),
            (None, None, Some(d)) => Supplied::Default(d),
            (None, None, None) => Supplied::Caller,
        };
        (&p.name[..], supplied)
    }).collect();

    for extra in positional {
        debug!("Ignoring surplus mixin argument at {}", extra.offset);
    }
    collated
}
