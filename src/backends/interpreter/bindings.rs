//! Function bindings
//!
//! `FunctionBindings` maps function names to host implementations, letting
//! an embedder add functions the expression can call. Bindings take
//! precedence over built-ins of the same name.
//!
//! # Example
//!
//! ```ignore
//! let mut bindings = FunctionBindings::new();
//! bindings.register("twice", |args| match args {
//!     [Value::Int(n)] => Ok(Value::Int(n * 2)),
//!     _ => Err(EvalError::Message("twice expects an int".into())),
//! });
//! ```

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::backends::interpreter::value::Value;
use crate::backends::EvalResult;

/// Host implementation of a function; receiver-style calls get the receiver
/// as the first argument
pub type FunctionHandler = Rc<dyn Fn(&[Value]) -> EvalResult<Value>>;

/// Registry of host function implementations
#[derive(Clone, Default)]
pub struct FunctionBindings {
    handlers: IndexMap<String, FunctionHandler>,
}

impl fmt::Debug for FunctionBindings {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("FunctionBindings")
            .field("functions", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FunctionBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous binding
    pub fn register(
        &mut self,
        name: &str,
        handler: impl Fn(&[Value]) -> EvalResult<Value> + 'static,
    ) {
        self.handlers.insert(name.to_string(), Rc::new(handler));
    }

    /// Look up a handler by name
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&FunctionHandler> {
        self.handlers.get(name)
    }

    pub fn has(
        &self,
        name: &str,
    ) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Names of all bound functions, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Add every binding of `other`, replacing same-named ones
    pub fn extend(
        &mut self,
        other: &FunctionBindings,
    ) {
        for (name, handler) in &other.handlers {
            self.handlers.insert(name.clone(), Rc::clone(handler));
        }
    }
}
