//! Macro expansion at parse time
//!
//! `has(a.b)` becomes a presence-test select, and the receiver macros
//! `all`, `exists`, `exists_one`, `map` and `filter` become comprehension
//! nodes. With macros disabled every call is kept as written.

use crate::frontend::parser::ast::*;
use crate::frontend::parser::{ParseError, ParserState};
use crate::util::span::Span;

/// Build a global call `name(args)`, expanding `has`
pub fn global_call(
    state: &mut ParserState<'_>,
    name: String,
    mut args: Vec<Expr>,
    span: Span,
) -> Option<Expr> {
    if !state.macros_enabled() || name != "has" || args.len() != 1 {
        return Some(state.call(None, &name, args, span));
    }

    let arg = args.remove(0);
    match arg.kind {
        ExprKind::Select {
            operand,
            field,
            test_only: false,
        } => Some(state.node(
            ExprKind::Select {
                operand,
                field,
                test_only: true,
            },
            span,
        )),
        _ => {
            state.error(ParseError::message("invalid argument to has() macro", arg.span));
            None
        }
    }
}

/// Build a receiver call `target.name(args)`, expanding comprehension macros
pub fn receiver_call(
    state: &mut ParserState<'_>,
    target: Expr,
    name: String,
    mut args: Vec<Expr>,
    span: Span,
) -> Option<Expr> {
    let kind = match MacroKind::from_name(&name) {
        Some(kind) if state.macros_enabled() && args.len() == 2 => kind,
        _ => return Some(state.call(Some(target), &name, args, span)),
    };

    let body = args.pop()?;
    let var_expr = args.pop()?;
    let ExprKind::Ident(var) = var_expr.kind else {
        state.error(ParseError::message(
            "argument must be a simple name",
            var_expr.span,
        ));
        return None;
    };

    tracing::trace!("expanding {} macro over '{}'", kind.name(), var);
    Some(state.node(
        ExprKind::Comprehension(Box::new(Comprehension {
            kind,
            var,
            range: target,
            body,
        })),
        span,
    ))
}
