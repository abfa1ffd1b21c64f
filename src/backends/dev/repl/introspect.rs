//! Introspection functions
//!
//! Functions an expression can call to look at the REPL session itself:
//!
//! - `quit()` ends the session
//! - `inspect()` / `inspect(format)` render the previous line
//! - `inspect(n)` / `inspect(n, format)` render line `n`
//! - `inspect_int(n)` / `inspect_int(n, format)` are aliases of the two above
//!
//! Each function needs a checker declaration and an interpreter binding;
//! [`declarations`] and [`bindings`] produce matching sets.

use crate::backends::dev::repl::format::OutputFormat;
use crate::backends::dev::repl::session::Session;
use crate::backends::interpreter::{builtins, FunctionBindings, Value};
use crate::backends::{EvalError, EvalResult};
use crate::frontend::typecheck::{FunctionDecl, Type};

pub const QUIT: &str = "quit";
pub const INSPECT: &str = "inspect";
pub const INSPECT_INT: &str = "inspect_int";

/// Checker declarations for the introspection functions
pub fn declarations() -> Vec<FunctionDecl> {
    vec![
        FunctionDecl::new(QUIT).global("quit", vec![], Type::Null),
        FunctionDecl::new(INSPECT)
            .global("inspect", vec![], Type::String)
            .global("inspect_string", vec![Type::String], Type::String)
            .global("inspect_int", vec![Type::Int], Type::String)
            .global("inspect_int_string", vec![Type::Int, Type::String], Type::String),
        FunctionDecl::new(INSPECT_INT)
            .global("inspect_int_alias", vec![Type::Int], Type::String)
            .global("inspect_int_string_alias", vec![Type::Int, Type::String], Type::String),
    ]
}

/// Interpreter bindings closed over `session`
pub fn bindings(session: &Session) -> FunctionBindings {
    let mut bindings = FunctionBindings::new();

    bindings.register(QUIT, |args| match args {
        [] => Err(EvalError::Quit),
        _ => Err(builtins::no_overload(QUIT, args)),
    });

    let inspect_session = session.clone();
    bindings.register(INSPECT, move |args| inspect(&inspect_session, INSPECT, args));

    let inspect_int_session = session.clone();
    bindings.register(INSPECT_INT, move |args| match args {
        [Value::Int(_)] | [Value::Int(_), Value::String(_)] => {
            inspect(&inspect_int_session, INSPECT_INT, args)
        }
        _ => Err(builtins::no_overload(INSPECT_INT, args)),
    });

    bindings
}

fn inspect(
    session: &Session,
    function: &str,
    args: &[Value],
) -> EvalResult<Value> {
    let text = match args {
        [] => session.inspect_previous(&OutputFormat::DEFAULT),
        [Value::String(tag)] => session.inspect_previous(&OutputFormat::from_tag(tag)),
        [Value::Int(n)] => session.inspect_at(*n, &OutputFormat::DEFAULT),
        [Value::Int(n), Value::String(tag)] => session.inspect_at(*n, &OutputFormat::from_tag(tag)),
        _ => return Err(builtins::no_overload(function, args)),
    };
    Ok(Value::String(text))
}
