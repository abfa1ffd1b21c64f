//! 重载解析器
//!
//! Function declarations and overload selection. A call resolves against
//! every overload whose arity, call style and parameter types accept the
//! argument types. Several matches are allowed when arguments are `dyn`;
//! the result type is then the join of the candidates' results.

use super::types::Type;
use crate::frontend::parser::operators::*;

/// One signature of a function
#[derive(Debug, Clone, PartialEq)]
pub struct OverloadDecl {
    /// Stable overload id, e.g. `add_int64`
    pub id: String,
    /// Parameter types; for receiver-style overloads the receiver comes first
    pub params: Vec<Type>,
    pub result: Type,
    /// Called as `target.f(args)` rather than `f(args)`
    pub receiver_style: bool,
}

/// A named function with its overloads
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub overloads: Vec<OverloadDecl>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overloads: Vec::new(),
        }
    }

    /// Add a global overload `name(params) -> result`
    pub fn global(
        mut self,
        id: impl Into<String>,
        params: Vec<Type>,
        result: Type,
    ) -> Self {
        self.overloads.push(OverloadDecl {
            id: id.into(),
            params,
            result,
            receiver_style: false,
        });
        self
    }

    /// Add a receiver overload `params[0].name(params[1..]) -> result`
    pub fn member(
        mut self,
        id: impl Into<String>,
        params: Vec<Type>,
        result: Type,
    ) -> Self {
        self.overloads.push(OverloadDecl {
            id: id.into(),
            params,
            result,
            receiver_style: true,
        });
        self
    }

    /// Resolve a call; `args` includes the receiver for receiver-style calls
    pub fn resolve(
        &self,
        args: &[Type],
        receiver_style: bool,
    ) -> Option<Type> {
        let mut matched = self.overloads.iter().filter(|o| {
            o.receiver_style == receiver_style
                && o.params.len() == args.len()
                && o.params
                    .iter()
                    .zip(args)
                    .all(|(param, arg)| param.is_assignable_from(arg))
        });

        let first = matched.next()?;
        Some(matched.fold(first.result.clone(), |acc, o| acc.join(&o.result)))
    }

    /// Fold another declaration of the same name into this one
    pub fn merge(
        &mut self,
        other: FunctionDecl,
    ) {
        for overload in other.overloads {
            if !self.overloads.iter().any(|o| o.id == overload.id) {
                self.overloads.push(overload);
            }
        }
    }
}

fn arithmetic(
    function: &str,
    stem: &str,
    with_double: bool,
) -> FunctionDecl {
    let mut decl = FunctionDecl::new(function)
        .global(format!("{}_int64", stem), vec![Type::Int, Type::Int], Type::Int)
        .global(format!("{}_uint64", stem), vec![Type::Uint, Type::Uint], Type::Uint);
    if with_double {
        decl = decl.global(
            format!("{}_double", stem),
            vec![Type::Double, Type::Double],
            Type::Double,
        );
    }
    decl
}

fn ordering(
    function: &str,
    stem: &str,
) -> FunctionDecl {
    [
        ("bool", Type::Bool),
        ("int64", Type::Int),
        ("uint64", Type::Uint),
        ("double", Type::Double),
        ("string", Type::String),
    ]
    .into_iter()
    .fold(FunctionDecl::new(function), |decl, (suffix, ty)| {
        decl.global(format!("{}_{}", stem, suffix), vec![ty.clone(), ty], Type::Bool)
    })
}

fn conversion(
    function: &str,
    target: Type,
    from: &[(&str, Type)],
) -> FunctionDecl {
    from.iter().fold(FunctionDecl::new(function), |decl, (suffix, ty)| {
        decl.global(
            format!("{}_to_{}", suffix, function),
            vec![ty.clone()],
            target.clone(),
        )
    })
}

fn string_predicate(
    function: &str,
    stem: &str,
) -> FunctionDecl {
    FunctionDecl::new(function).member(
        format!("{}_string", stem),
        vec![Type::String, Type::String],
        Type::Bool,
    )
}

/// Declarations of the built-in functions and operators
///
/// Equality, `in`, indexing, the conditional and list concatenation are
/// typed structurally by the checker and are not listed here.
pub fn standard_declarations() -> Vec<FunctionDecl> {
    let any_list = Type::list(Type::Dyn);
    let any_map = Type::map(Type::Dyn, Type::Dyn);
    let numeric_sources = [
        ("int64", Type::Int),
        ("uint64", Type::Uint),
        ("double", Type::Double),
        ("string", Type::String),
    ];

    vec![
        arithmetic(ADD, "add", true)
            .global("add_string", vec![Type::String, Type::String], Type::String),
        arithmetic(SUBTRACT, "subtract", true),
        arithmetic(MULTIPLY, "multiply", true),
        arithmetic(DIVIDE, "divide", true),
        arithmetic(MODULO, "modulo", false),
        FunctionDecl::new(NEGATE)
            .global("negate_int64", vec![Type::Int], Type::Int)
            .global("negate_double", vec![Type::Double], Type::Double),
        FunctionDecl::new(LOGICAL_NOT).global("logical_not", vec![Type::Bool], Type::Bool),
        FunctionDecl::new(LOGICAL_AND).global("logical_and", vec![Type::Bool, Type::Bool], Type::Bool),
        FunctionDecl::new(LOGICAL_OR).global("logical_or", vec![Type::Bool, Type::Bool], Type::Bool),
        ordering(LESS, "less"),
        ordering(LESS_EQUALS, "less_equals"),
        ordering(GREATER, "greater"),
        ordering(GREATER_EQUALS, "greater_equals"),
        FunctionDecl::new("size")
            .global("size_string", vec![Type::String], Type::Int)
            .global("size_list", vec![any_list.clone()], Type::Int)
            .global("size_map", vec![any_map.clone()], Type::Int)
            .member("string_size", vec![Type::String], Type::Int)
            .member("list_size", vec![any_list], Type::Int)
            .member("map_size", vec![any_map], Type::Int),
        string_predicate("contains", "contains"),
        string_predicate("startsWith", "starts_with"),
        string_predicate("endsWith", "ends_with"),
        conversion("int", Type::Int, &numeric_sources),
        conversion("uint", Type::Uint, &numeric_sources),
        conversion("double", Type::Double, &numeric_sources),
        conversion(
            "string",
            Type::String,
            &[
                ("int64", Type::Int),
                ("uint64", Type::Uint),
                ("double", Type::Double),
                ("string", Type::String),
                ("bool", Type::Bool),
            ],
        ),
        conversion("bool", Type::Bool, &[("bool", Type::Bool), ("string", Type::String)]),
    ]
}
