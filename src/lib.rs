//! cel-repl
//!
//! An interactive shell for a subset of the Common Expression Language whose
//! history can be inspected from inside the language itself.
//!
//! # Example
//!
//! ```text
//! (1)> [1, 2, 3].map(x, x * 2)
//! (2)> [2, 4, 6]
//! (2)> inspect('tree')
//! (3)> (comprehension: map x)
//!         (list)
//!                 (const<int64>: 1)
//! ...
//! ```
//!
//! # Layout
//!
//! - [`frontend`]: lexer, parser (with macros), type checker and [`frontend::Env`]
//! - [`backends::interpreter`]: tree-walking evaluator
//! - [`backends::dev::repl`]: history, formatter, introspection functions, loop
//! - [`util`]: spans, diagnostics, configuration, logging

#![doc(html_root_url = "https://docs.rs/cel-repl")]
#![warn(rust_2018_idioms)]

pub mod backends;
pub mod frontend;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use backends::dev::repl::{Repl, ReplError, Step};
pub use backends::interpreter::Value;
pub use frontend::{Ast, Env, EnvOptions};

use tracing::debug;

use crate::backends::interpreter::{Activation, FunctionBindings};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Program name, as shown in the banner
pub const NAME: &str = "cel-repl";

/// Compile, check and evaluate one expression with the standard environment
///
/// # Example
///
/// ```
/// use cel_repl::{eval, Value};
///
/// assert_eq!(eval("[1, 2, 3].filter(x, x > 1).size()").unwrap(), Value::Int(2));
/// ```
pub fn eval(source: &str) -> Result<Value> {
    debug!("eval called");
    let env = Env::default();

    let (ast, issues) = env.compile(source);
    let ast = match ast {
        Some(ast) if !issues.has_errors() => ast,
        _ => anyhow::bail!("{}", issues),
    };

    let (checked, issues) = env.check(&ast);
    let checked = match checked {
        Some(checked) if !issues.has_errors() => checked,
        _ => anyhow::bail!("{}", issues),
    };

    let program = env.program(&checked, &FunctionBindings::new())?;
    let value = program.eval(&Activation::new())?;
    Ok(value)
}
