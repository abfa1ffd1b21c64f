//! Expression tree visitor contract
//!
//! The formatter and the session only see parsed expressions through
//! [`ExprNode`], never through the parser's own types.

use std::fmt::Display;

/// Literal constant as seen by the formatter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Double(f64),
    String(&'a str),
}

impl Literal<'_> {
    /// Type tag used by the tree format
    pub fn type_tag(&self) -> &'static str {
        match self {
            Literal::Bool(_) => "bool",
            Literal::Double(_) => "double",
            Literal::Int(_) => "int64",
            Literal::Uint(_) => "uint64",
            Literal::String(_) => "string",
            Literal::Null => "unknown",
        }
    }

    /// Printed value, unquoted
    pub fn value_text(&self) -> String {
        match self {
            Literal::Null => "null".to_string(),
            Literal::Bool(b) => b.to_string(),
            Literal::Int(n) => n.to_string(),
            Literal::Uint(n) => n.to_string(),
            Literal::Double(d) => d.to_string(),
            Literal::String(s) => s.to_string(),
        }
    }
}

/// Kind of an expression node with borrowed children
#[derive(Debug)]
pub enum NodeKind<'a, N> {
    Ident(&'a str),
    Select {
        operand: &'a N,
        field: &'a str,
        test_only: bool,
    },
    Literal(Literal<'a>),
    Call {
        target: Option<&'a N>,
        function: &'a str,
        args: &'a [N],
    },
    List(&'a [N]),
    Map(Vec<(&'a N, &'a N)>),
    Comprehension {
        macro_name: &'static str,
        var: &'a str,
        range: &'a N,
        body: &'a N,
    },
}

/// Read-only view of an expression tree
///
/// `Display` must print canonical source text that parses back to an
/// equivalent tree.
pub trait ExprNode: Display + Sized {
    /// Node id, unique within one tree
    fn id(&self) -> i64;

    /// Node kind and children
    fn kind(&self) -> NodeKind<'_, Self>;
}
