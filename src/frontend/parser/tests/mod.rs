//! Parser tests module
//!
//! - basic: literals, operators, precedence, member access
//! - macros: `has` and comprehension expansion
//! - unparse: canonical source rendering
//! - errors: syntax error reporting
//! - fuzz: property-based round trips

mod errors;

use crate::frontend::parser::{parse_source, Expr};

/// Parse with macros enabled, panicking on error
pub(super) fn parse_ok(source: &str) -> Expr {
    match parse_source(source, true) {
        Ok(expr) => expr,
        Err(e) => panic!("failed to parse {:?}: {}", source, e),
    }
}
