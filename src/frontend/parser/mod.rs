//! Parser module
//!
//! This module implements a Pratt parser for CEL expressions.
//! The parser transforms tokens into an Abstract Syntax Tree (AST),
//! expanding macros on the way when they are enabled.

pub mod ast;
pub mod macros;
pub mod operators;
pub mod parser_state;
mod pratt;
pub mod unparse;

#[cfg(test)]
mod tests;

pub use ast::*;
pub use parser_state::{ParseError, ParserState, MAX_DEPTH};
pub use unparse::quote;

use crate::frontend::lexer::tokens::*;

/// Parse a token stream into a single expression
///
/// # Arguments
/// * `tokens` - Token stream from the lexer, ending with `Eof`
/// * `macros` - Whether `has` and the comprehension macros are expanded
///
/// # Returns
/// Parsed expression or the first parse error
pub fn parse(
    tokens: &[Token],
    macros: bool,
) -> Result<Expr, ParseError> {
    let mut state = ParserState::new(tokens, macros);
    let expr = state.parse_expr();

    if let Some(error) = state.first_error().cloned() {
        tracing::debug!("parse failed: {}", error);
        return Err(error);
    }

    match expr {
        Some(expr) if state.at_end() => Ok(expr),
        _ => Err(ParseError::UnexpectedToken {
            found: state.current_kind(),
            span: state.span(),
        }),
    }
}

/// Lex and parse `source` in one step
pub fn parse_source(
    source: &str,
    macros: bool,
) -> Result<Expr, ParseError> {
    let tokens = crate::frontend::lexer::tokenize(source)
        .map_err(|e| ParseError::message(e.to_string(), e.span()))?;
    parse(&tokens, macros)
}
