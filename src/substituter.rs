use crate::ast::expression::{Expression, Term, Value};
use crate::ast::node::{Declaration, Node};
use crate::ast::root::Root;
use crate::context::{Context, Frame};
use crate::error::{ErrorKind, Result, SassError};
use crate::expression_evaluator::{ExpressionEvaluator, MathToken};
use crate::operator::Op;
use crate::output::{CssDeclaration, CssNode, CssRule};
use crate::sass::mixin::{MixinRegistry, SassMixinCall};
use crate::sass::parameters::{collate_args_parameters, Supplied};
use crate::sass::rule::SassRule;
use crate::sass::selector::distribute;
use crate::sass::value_part::{ListSeparator, ValuePart};
use crate::sass::variable::SassVariable;

/// Evaluates parsed stylesheet items one at a time, in source order,
/// against the globals and mixins defined so far.
#[derive(Debug)]
pub struct Substituter {
    context: Context,
    mixins: MixinRegistry,
    diagnostics: Vec<SassError>,
    depth: usize,
    max_depth: usize,
}

impl Substituter {
    pub fn new(max_depth: usize) -> Substituter {
        Substituter {
            context: Context::new(),
            mixins: MixinRegistry::new(),
            diagnostics: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Keeps a non-fatal problem around for the caller and carries on.
    pub fn record(&mut self, err: SassError) {
        warn!("{}", err);
        self.diagnostics.push(err);
    }

    pub fn into_diagnostics(self) -> Vec<SassError> {
        self.diagnostics
    }

    /// Only fatal errors come back as `Err`; everything else is recorded.
    pub fn root(&mut self, root: Root) -> Result<Vec<CssNode>> {
        self.depth = 0;
        let mut frame = Frame::root();
        self.root_in(root, &mut frame)
    }

    fn root_in(&mut self, root: Root, frame: &mut Frame) -> Result<Vec<CssNode>> {
        match root {
            Root::Verbatim(text) => Ok(vec![CssNode::Verbatim(text)]),
            Root::Variable(variable) => {
                self.assign(&variable, frame);
                Ok(vec![])
            },
            Root::Mixin(mixin) => {
                let (name, offset) = (mixin.name.clone(), mixin.offset);
                if !self.mixins.define(mixin) {
                    debug!("Ignoring redefinition of mixin `{}` at {}", name, offset);
                }
                Ok(vec![])
            },
            Root::Rule(rule) => self.rule(&rule, &[], frame),
            Root::Media { query, children } => {
                self.enter(0)?;
                let mut nodes = vec![];
                for child in children {
                    nodes.extend(self.root_in(child, frame)?);
                }
                self.leave();
                if nodes.is_empty() {
                    return Ok(vec![]);
                }
                Ok(vec![CssNode::Media { query, children: nodes }])
            },
            Root::AtBlock { name, declarations } => {
                let declarations = declarations.iter()
                    .filter_map(|d| self.declaration(d, frame))
                    .collect::<Vec<_>>();
                if declarations.is_empty() {
                    return Ok(vec![]);
                }
                Ok(vec![CssNode::Rule(CssRule::new(vec![name], declarations))])
            },
        }
    }

    fn enter(&mut self, offset: usize) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(SassError::new(
                ErrorKind::NestingTooDeep,
                offset,
                format!("Nesting too deep: more than {} levels", self.max_depth),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // Outside any include the assignment is global and define-once;
    // inside one it belongs to that expansion alone.
    fn assign(&mut self, variable: &SassVariable, frame: &mut Frame) {
        let value = match self.eval_value(&variable.value, frame) {
            Ok(v) => v,
            Err(e) => return self.record(e),
        };
        debug!("${} = {}", variable.name, value);

        if !frame.is_root() {
            frame.bind_local(&variable.name, value);
        } else if !self.context.define_global(&variable.name, value) {
            debug!("Ignoring redefinition of ${} at {}", variable.name, variable.offset);
        }
    }

    fn declaration(&mut self, declaration: &Declaration, frame: &Frame) -> Option<CssDeclaration> {
        match self.eval_value(&declaration.value, frame) {
            Ok(value) => Some(CssDeclaration {
                name: declaration.name.clone(),
                value: value.to_string(),
                important: declaration.important,
            }),
            Err(e) => {
                debug!("Dropping `{}` at {}", declaration.name, declaration.offset);
                self.record(e);
                None
            },
        }
    }

    /// A rule's own declarations come first, then everything nested in it.
    fn rule(&mut self, rule: &SassRule, parents: &[String], frame: &mut Frame) -> Result<Vec<CssNode>> {
        self.enter(rule.offset)?;
        let selectors = distribute(parents, &rule.selectors);
        let mut declarations = vec![];
        let mut nested = vec![];
        self.body(&rule.children, &selectors, frame, &mut declarations, &mut nested)?;
        self.leave();

        let mut nodes = Vec::with_capacity(nested.len() + 1);
        if !declarations.is_empty() {
            nodes.push(CssNode::Rule(CssRule::new(selectors, declarations)));
        }
        nodes.extend(nested);
        Ok(nodes)
    }

    fn body(
        &mut self,
        children: &[Node],
        selectors: &[String],
        frame: &mut Frame,
        declarations: &mut Vec<CssDeclaration>,
        nested: &mut Vec<CssNode>,
    ) -> Result<()> {
        for child in children {
            match *child {
                Node::Property(ref d) => declarations.extend(self.declaration(d, frame)),
                Node::Rule(ref r) => nested.extend(self.rule(r, selectors, frame)?),
                Node::Variable(ref v) => self.assign(v, frame),
                Node::MixinCall(ref call) => self.include(call, selectors, frame, declarations, nested)?,
            }
        }
        Ok(())
    }

    // Splices the mixin body into the caller, evaluated in a fresh frame
    // chained to the caller's.
    fn include(
        &mut self,
        call: &SassMixinCall,
        selectors: &[String],
        frame: &Frame,
        declarations: &mut Vec<CssDeclaration>,
        nested: &mut Vec<CssNode>,
    ) -> Result<()> {
        let mixin = match self.mixins.get(&call.name) {
            Some(mixin) => mixin,
            None => {
                self.record(SassError::new(
                    ErrorKind::UnknownMixin,
                    call.offset,
                    format!("Cannot find mixin named `{}`", call.name),
                ));
                return Ok(());
            },
        };
        self.enter(call.offset)?;
        debug!("Expanding `{}` at {}", mixin.name, call.offset);

        let mut inner = Frame::chained(frame);
        for (name, supplied) in collate_args_parameters(&mixin.parameters, &call.arguments) {
            let value = match supplied {
                Supplied::Argument(v) => self.eval_value(v, frame),
                Supplied::Default(v) => self.eval_value(v, &inner),
                Supplied::Caller => {
                    inner.bind_caller(name);
                    continue;
                },
            };
            match value {
                Ok(v) => inner.bind_local(name, v),
                Err(e) => {
                    self.record(e);
                    inner.bind_caller(name);
                },
            }
        }

        self.body(&mixin.children, selectors, &mut inner, declarations, nested)?;
        self.leave();
        Ok(())
    }

    fn eval_value(&mut self, value: &Value, frame: &Frame) -> Result<ValuePart> {
        let mut groups = Vec::with_capacity(value.groups.len());
        for group in &value.groups {
            let mut items = Vec::with_capacity(group.len());
            for expression in group {
                items.push(self.eval_expression(expression, frame, true)?);
            }
            groups.push(ValuePart::list(items, ListSeparator::Space));
        }
        Ok(ValuePart::list(groups, ListSeparator::Comma))
    }

    // `math` is off inside function arguments, where `calc(100% - $x)`
    // must keep its operators.
    fn eval_expression(&mut self, expression: &Expression, frame: &Frame, math: bool) -> Result<ValuePart> {
        if math && expression.needs_math() {
            let mut tokens = vec![];
            self.math_tokens(&expression.head, frame, &mut tokens)?;
            for &(op, ref term) in &expression.tail {
                tokens.push(MathToken::Op(op));
                self.math_tokens(term, frame, &mut tokens)?;
            }
            return Ok(ValuePart::Number(ExpressionEvaluator::evaluate(&tokens, expression.offset)?));
        }

        let head = self.eval_term(&expression.head, frame, math)?;
        if expression.tail.is_empty() {
            return Ok(head);
        }
        let mut text = head.to_string();
        for &(op, ref term) in &expression.tail {
            let operand = self.eval_term(term, frame, math)?;
            match op {
                Op::Slash => text.push_str(&format!("/{}", operand)),
                _ => text.push_str(&format!(" {} {}", op, operand)),
            }
        }
        Ok(ValuePart::String(text))
    }

    fn eval_term(&mut self, term: &Term, frame: &Frame, math: bool) -> Result<ValuePart> {
        let part = match *term {
            Term::Number(ref n) => ValuePart::Number(n.clone()),
            Term::Color(ref s) | Term::Ident(ref s) | Term::Str(ref s) | Term::Uri(ref s) => {
                ValuePart::String(s.clone())
            },
            Term::Function(ref name, ref args) => {
                let mut rendered = Vec::with_capacity(args.groups.len());
                for group in &args.groups {
                    let mut items = Vec::with_capacity(group.len());
                    for expression in group {
                        items.push(self.eval_expression(expression, frame, false)?.to_string());
                    }
                    rendered.push(items.join(" "));
                }
                ValuePart::String(format!("{}({})", name, rendered.join(", ")))
            },
            Term::Variable { ref name, offset } => match self.context.resolve(frame, name) {
                Some(value) => value,
                None => {
                    self.record(SassError::new(
                        ErrorKind::UnresolvedVariable,
                        offset,
                        format!("Undefined variable `${}`", name),
                    ));
                    ValuePart::String(format!("${}", name))
                },
            },
            Term::Parens(_) | Term::Negated(_) if math => {
                let mut tokens = vec![];
                self.math_tokens(term, frame, &mut tokens)?;
                ValuePart::Number(ExpressionEvaluator::evaluate(&tokens, 0)?)
            },
            Term::Parens(ref inner) => {
                ValuePart::String(format!("({})", self.eval_expression(inner, frame, false)?))
            },
            Term::Negated(ref inner) => {
                ValuePart::String(format!("-{}", self.eval_term(inner, frame, false)?))
            },
        };
        Ok(part)
    }

    // Flattens a term into arithmetic input. Anything that is not a number
    // after substitution makes the whole expression fail.
    fn math_tokens(&self, term: &Term, frame: &Frame, tokens: &mut Vec<MathToken>) -> Result<()> {
        match *term {
            Term::Number(ref n) => tokens.push(MathToken::Number(n.clone())),
            Term::Variable { ref name, offset } => match self.context.resolve(frame, name) {
                Some(ValuePart::Number(n)) => tokens.push(MathToken::Number(n)),
                Some(other) => {
                    return Err(SassError::new(
                        ErrorKind::NotANumber,
                        offset,
                        format!("`${}` is `{}`, not a number", name, other),
                    ))
                },
                None => {
                    return Err(SassError::new(
                        ErrorKind::UnresolvedVariable,
                        offset,
                        format!("Undefined variable `${}` in arithmetic", name),
                    ))
                },
            },
            Term::Parens(ref inner) => {
                tokens.push(MathToken::LeftParen);
                self.math_tokens(&inner.head, frame, tokens)?;
                for &(op, ref t) in &inner.tail {
                    tokens.push(MathToken::Op(op));
                    self.math_tokens(t, frame, tokens)?;
                }
                tokens.push(MathToken::RightParen);
            },
            Term::Negated(ref inner) => {
                tokens.push(MathToken::Negate);
                self.math_tokens(inner, frame, tokens)?;
            },
            ref other => {
                return Err(SassError::new(
                    ErrorKind::NotANumber,
                    0,
                    format!("{:?} cannot take part in arithmetic", other),
                ))
            },
        }
        Ok(())
    }
}
