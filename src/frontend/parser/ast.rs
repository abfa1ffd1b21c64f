//! Abstract Syntax Tree types
//!
//! Every operator is represented as a call with a reserved function name
//! (see [`super::operators`]), so the tree has only a handful of node kinds.

use crate::backends::dev::repl::format::node::{ExprNode, Literal, NodeKind};
use crate::util::span::Span;

/// Node id, unique within one parsed expression and assigned from 1
pub type ExprId = i64;

/// Expression node
///
/// Equality compares structure only; ids and spans are ignored so that a
/// re-parsed tree compares equal to the original.
#[derive(Debug, Clone)]
pub struct Expr {
    pub id: ExprId,
    pub span: Span,
    pub kind: ExprKind,
}

impl PartialEq for Expr {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.kind == other.kind
    }
}

impl Expr {
    /// Create a node
    pub fn new(
        id: ExprId,
        kind: ExprKind,
        span: Span,
    ) -> Self {
        Self { id, span, kind }
    }

    /// Whether this is a global call to `function`
    pub fn is_call_to(
        &self,
        function: &str,
    ) -> bool {
        matches!(&self.kind, ExprKind::Call { target: None, function: f, .. } if f == function)
    }

    /// Pre-order walk over this node and every descendant
    pub fn walk<'a>(
        &'a self,
        visit: &mut impl FnMut(&'a Expr),
    ) {
        visit(self);
        match &self.kind {
            ExprKind::Ident(_) | ExprKind::Literal(_) => {}
            ExprKind::Select { operand, .. } => operand.walk(visit),
            ExprKind::Call { target, args, .. } => {
                if let Some(target) = target {
                    target.walk(visit);
                }
                for arg in args {
                    arg.walk(visit);
                }
            }
            ExprKind::List(elements) => {
                for element in elements {
                    element.walk(visit);
                }
            }
            ExprKind::Map(entries) => {
                for entry in entries {
                    entry.key.walk(visit);
                    entry.value.walk(visit);
                }
            }
            ExprKind::Comprehension(comprehension) => {
                comprehension.range.walk(visit);
                comprehension.body.walk(visit);
            }
        }
    }
}

/// Node kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Variable reference
    Ident(String),
    /// `operand.field`; `test_only` is the `has(operand.field)` presence test
    Select {
        operand: Box<Expr>,
        field: String,
        test_only: bool,
    },
    /// Literal constant
    Literal(Constant),
    /// Global call `f(args)` or receiver call `target.f(args)`
    Call {
        target: Option<Box<Expr>>,
        function: String,
        args: Vec<Expr>,
    },
    /// `[a, b]`
    List(Vec<Expr>),
    /// `{k: v}`
    Map(Vec<MapEntry>),
    /// Expanded `all` / `exists` / `exists_one` / `map` / `filter` macro
    Comprehension(Box<Comprehension>),
}

/// One `key: value` pair of a map literal
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: Expr,
    pub value: Expr,
}

/// Literal constant
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Double(f64),
    String(String),
}

impl Constant {
    /// View through the formatter's literal type
    pub fn as_literal(&self) -> Literal<'_> {
        match self {
            Constant::Null => Literal::Null,
            Constant::Bool(b) => Literal::Bool(*b),
            Constant::Int(n) => Literal::Int(*n),
            Constant::Uint(n) => Literal::Uint(*n),
            Constant::Double(d) => Literal::Double(*d),
            Constant::String(s) => Literal::String(s),
        }
    }
}

/// Comprehension produced by macro expansion
#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
    pub kind: MacroKind,
    /// Iteration variable
    pub var: String,
    /// List or map being iterated
    pub range: Expr,
    /// Predicate (`all`, `exists`, `exists_one`, `filter`) or transform (`map`)
    pub body: Expr,
}

/// Receiver-style macros that expand into comprehensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroKind {
    All,
    Exists,
    ExistsOne,
    Map,
    Filter,
}

impl MacroKind {
    /// Look up a macro by its call name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(MacroKind::All),
            "exists" => Some(MacroKind::Exists),
            "exists_one" => Some(MacroKind::ExistsOne),
            "map" => Some(MacroKind::Map),
            "filter" => Some(MacroKind::Filter),
            _ => None,
        }
    }

    /// Call name of the macro
    pub fn name(self) -> &'static str {
        match self {
            MacroKind::All => "all",
            MacroKind::Exists => "exists",
            MacroKind::ExistsOne => "exists_one",
            MacroKind::Map => "map",
            MacroKind::Filter => "filter",
        }
    }

    /// Whether the body is a boolean predicate
    pub fn is_predicate(self) -> bool {
        !matches!(self, MacroKind::Map)
    }
}

impl ExprNode for Expr {
    fn id(&self) -> i64 {
        self.id
    }

    fn kind(&self) -> NodeKind<'_, Self> {
        match &self.kind {
            ExprKind::Ident(name) => NodeKind::Ident(name.as_str()),
            ExprKind::Select {
                operand,
                field,
                test_only,
            } => NodeKind::Select {
                operand: operand.as_ref(),
                field: field.as_str(),
                test_only: *test_only,
            },
            ExprKind::Literal(constant) => NodeKind::Literal(constant.as_literal()),
            ExprKind::Call {
                target,
                function,
                args,
            } => NodeKind::Call {
                target: target.as_deref(),
                function: function.as_str(),
                args: args.as_slice(),
            },
            ExprKind::List(elements) => NodeKind::List(elements.as_slice()),
            ExprKind::Map(entries) => {
                NodeKind::Map(entries.iter().map(|e| (&e.key, &e.value)).collect())
            }
            ExprKind::Comprehension(comprehension) => NodeKind::Comprehension {
                macro_name: comprehension.kind.name(),
                var: comprehension.var.as_str(),
                range: &comprehension.range,
                body: &comprehension.body,
            },
        }
    }
}
