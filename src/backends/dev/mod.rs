//! Development tools for cel-repl
//!
//! This module provides the interactive side of the crate:
//! - REPL: line-by-line evaluation with history introspection

pub mod repl;

pub use repl::{Repl, ReplError, Step};
