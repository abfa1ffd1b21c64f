//! Interpreter backend for expression evaluation
//!
//! This module implements a tree-walking interpreter. A [`Program`] pairs a
//! parsed expression with the function bindings it may call; building it
//! verifies that every called function has an implementation, so evaluation
//! never discovers a missing function halfway through.

pub mod bindings;
pub mod builtins;
pub mod evaluator;
pub mod value;


use indexmap::IndexMap;

pub use bindings::{FunctionBindings, FunctionHandler};
pub use evaluator::Evaluator;
pub use value::{MapKey, Value};

use crate::backends::{EvalResult, ProgramError};
use crate::frontend::parser::ast::{Expr, ExprKind};

/// Variable values visible to an evaluation
#[derive(Debug, Clone, Default)]
pub struct Activation {
    variables: IndexMap<String, Value>,
}

impl Activation {
    /// Activation with no variables
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable
    pub fn with_variable(
        mut self,
        name: impl Into<String>,
        value: Value,
    ) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Value> {
        self.variables.get(name)
    }
}

/// An expression ready for evaluation
#[derive(Debug, Clone)]
pub struct Program {
    expr: Expr,
    bindings: FunctionBindings,
}

impl Program {
    /// Build a program, checking that every call has an implementation
    pub fn new(
        expr: Expr,
        bindings: FunctionBindings,
    ) -> Result<Self, ProgramError> {
        let mut missing = None;
        expr.walk(&mut |node| {
            if let ExprKind::Call { function, .. } = &node.kind {
                if missing.is_none() && !bindings.has(function) && !builtins::is_builtin(function) {
                    missing = Some(function.clone());
                }
            }
        });
        if let Some(name) = missing {
            return Err(ProgramError::UnknownFunction { name });
        }

        Ok(Self { expr, bindings })
    }

    /// Evaluate against `activation`
    pub fn eval(
        &self,
        activation: &Activation,
    ) -> EvalResult<Value> {
        tracing::debug!("evaluating {}", self.expr);
        Evaluator::new(&self.bindings, activation).eval(&self.expr)
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}
