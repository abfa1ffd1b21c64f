//! Canonical source rendering of expressions
//!
//! The output is valid source text which parses back to an equal tree.
//! Parentheses are emitted only where precedence requires them.

use std::fmt::{self, Write as _};

use crate::frontend::parser::ast::*;
use crate::frontend::parser::operators::*;

/// Binding power of the outermost construct of `expr`
fn precedence(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Call {
            target: None,
            function,
            args,
        } => {
            if function == CONDITIONAL && args.len() == 3 {
                BP_CONDITIONAL
            } else if args.len() == 2 {
                binary_precedence(function).unwrap_or(BP_MEMBER)
            } else if args.len() == 1 && unary_symbol(function).is_some() {
                BP_UNARY
            } else {
                BP_MEMBER
            }
        }
        ExprKind::Literal(Constant::Int(n)) if *n < 0 => BP_UNARY,
        ExprKind::Literal(Constant::Double(d)) if d.is_sign_negative() => BP_UNARY,
        _ => BP_MEMBER,
    }
}

/// Write `expr`, parenthesized when its precedence is below `min`
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    expr: &Expr,
    min: u8,
) -> fmt::Result {
    if precedence(expr) < min {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

fn write_comma_separated<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a Expr>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) => f.write_str(name),
            ExprKind::Literal(constant) => write!(f, "{}", constant),
            ExprKind::Select {
                operand,
                field,
                test_only,
            } => {
                if *test_only {
                    f.write_str("has(")?;
                }
                write_operand(f, operand, BP_MEMBER)?;
                write!(f, ".{}", field)?;
                if *test_only {
                    f.write_char(')')?;
                }
                Ok(())
            }
            ExprKind::Call {
                target,
                function,
                args,
            } => fmt_call(f, target.as_deref(), function, args),
            ExprKind::List(elements) => {
                f.write_char('[')?;
                write_comma_separated(f, elements)?;
                f.write_char(']')
            }
            ExprKind::Map(entries) => {
                f.write_char('{')?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", entry.key, entry.value)?;
                }
                f.write_char('}')
            }
            ExprKind::Comprehension(comprehension) => {
                write_operand(f, &comprehension.range, BP_MEMBER)?;
                write!(
                    f,
                    ".{}({}, {})",
                    comprehension.kind.name(),
                    comprehension.var,
                    comprehension.body
                )
            }
        }
    }
}

fn fmt_call(
    f: &mut fmt::Formatter<'_>,
    target: Option<&Expr>,
    function: &str,
    args: &[Expr],
) -> fmt::Result {
    if let Some(target) = target {
        write_operand(f, target, BP_MEMBER)?;
        write!(f, ".{}(", function)?;
        write_comma_separated(f, args)?;
        return f.write_char(')');
    }

    match args {
        [left, right] => {
            if let (Some(symbol), Some(bp)) = (binary_symbol(function), binary_precedence(function)) {
                write_operand(f, left, bp)?;
                write!(f, " {} ", symbol)?;
                return write_operand(f, right, bp + 1);
            }
            if function == INDEX {
                write_operand(f, left, BP_MEMBER)?;
                return write!(f, "[{}]", right);
            }
        }
        [operand] => {
            if let Some(symbol) = unary_symbol(function) {
                f.write_str(symbol)?;
                return write_operand(f, operand, BP_UNARY);
            }
        }
        [condition, then_branch, else_branch] if function == CONDITIONAL => {
            write_operand(f, condition, BP_LOGICAL_OR)?;
            f.write_str(" ? ")?;
            write_operand(f, then_branch, BP_LOGICAL_OR)?;
            return write!(f, " : {}", else_branch);
        }
        _ => {}
    }

    write!(f, "{}(", function)?;
    write_comma_separated(f, args)?;
    f.write_char(')')
}

impl fmt::Display for Constant {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Constant::Null => f.write_str("null"),
            Constant::Bool(b) => write!(f, "{}", b),
            Constant::Int(n) => write!(f, "{}", n),
            Constant::Uint(n) => write!(f, "{}u", n),
            Constant::Double(d) => write!(f, "{:?}", d),
            Constant::String(s) => f.write_str(&quote(s)),
        }
    }
}

/// Double-quoted string literal with escapes
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && (c as u32) <= 0xff => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
