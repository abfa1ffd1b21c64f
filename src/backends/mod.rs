//! Backend layer for expression execution
//!
//! This module provides the evaluation side of the pipeline:
//! - Interpreter: tree-walking evaluation of checked expressions
//! - Dev: the interactive REPL built on top of it
//!
//! # Architecture
//!
//! ```text
//! Ast (from frontend)
//!         |
//!         v
//!     Program  <-- FunctionBindings
//!         |
//!         v
//!       Value
//! ```

pub mod dev;
pub mod interpreter;

use thiserror::Error;

/// Result type for evaluation
pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Identifier with no value in the activation
    #[error("no such attribute: {0}")]
    NoSuchAttribute(String),
    /// Missing map key or field
    #[error("no such key: {0}")]
    NoSuchKey(String),
    /// List index outside the list
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),
    /// No overload accepts the runtime argument types
    #[error("no matching overload for '{function}' applied to '({args})'")]
    NoMatchingOverload { function: String, args: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulus by zero")]
    ModulusByZero,
    /// Arithmetic result does not fit the operand type
    #[error("{0} overflow")]
    Overflow(&'static str),
    /// Failed type conversion
    #[error("type conversion error: {0}")]
    Conversion(String),
    /// Any other evaluation failure
    #[error("{0}")]
    Message(String),
    /// Raised by `quit()`; stops evaluation and ends the session
    #[error("quit requested")]
    Quit,
}

/// Errors building a program from a checked expression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgramError {
    /// A call names a function with no built-in or bound implementation
    #[error("no implementation for function '{name}'")]
    UnknownFunction { name: String },
}
