//! Operator function names and precedence
//!
//! Operators are parsed into calls whose function name encodes the operator
//! shape, e.g. `a + b` becomes `_+_(a, b)` and `!a` becomes `!_(a)`.

use crate::frontend::lexer::TokenKind;

pub const ADD: &str = "_+_";
pub const SUBTRACT: &str = "_-_";
pub const MULTIPLY: &str = "_*_";
pub const DIVIDE: &str = "_/_";
pub const MODULO: &str = "_%_";
pub const EQUALS: &str = "_==_";
pub const NOT_EQUALS: &str = "_!=_";
pub const LESS: &str = "_<_";
pub const LESS_EQUALS: &str = "_<=_";
pub const GREATER: &str = "_>_";
pub const GREATER_EQUALS: &str = "_>=_";
pub const LOGICAL_AND: &str = "_&&_";
pub const LOGICAL_OR: &str = "_||_";
pub const LOGICAL_NOT: &str = "!_";
pub const NEGATE: &str = "-_";
pub const INDEX: &str = "_[_]";
pub const CONDITIONAL: &str = "_?_:_";
pub const IN: &str = "@in";

/// Binding power levels, lowest first
pub const BP_LOWEST: u8 = 0;
pub const BP_CONDITIONAL: u8 = 1;
pub const BP_LOGICAL_OR: u8 = 2;
pub const BP_LOGICAL_AND: u8 = 3;
pub const BP_RELATION: u8 = 4;
pub const BP_ADD: u8 = 5;
pub const BP_MUL: u8 = 6;
pub const BP_UNARY: u8 = 7;
pub const BP_MEMBER: u8 = 8;

/// Operator function and binding power for an infix token
pub fn binary_operator(kind: &TokenKind) -> Option<(&'static str, u8)> {
    let op = match kind {
        TokenKind::Or => (LOGICAL_OR, BP_LOGICAL_OR),
        TokenKind::And => (LOGICAL_AND, BP_LOGICAL_AND),
        TokenKind::EqEq => (EQUALS, BP_RELATION),
        TokenKind::Neq => (NOT_EQUALS, BP_RELATION),
        TokenKind::Lt => (LESS, BP_RELATION),
        TokenKind::Le => (LESS_EQUALS, BP_RELATION),
        TokenKind::Gt => (GREATER, BP_RELATION),
        TokenKind::Ge => (GREATER_EQUALS, BP_RELATION),
        TokenKind::KwIn => (IN, BP_RELATION),
        TokenKind::Plus => (ADD, BP_ADD),
        TokenKind::Minus => (SUBTRACT, BP_ADD),
        TokenKind::Star => (MULTIPLY, BP_MUL),
        TokenKind::Slash => (DIVIDE, BP_MUL),
        TokenKind::Percent => (MODULO, BP_MUL),
        _ => return None,
    };
    Some(op)
}

/// Source symbol of a binary operator function
pub fn binary_symbol(function: &str) -> Option<&'static str> {
    let symbol = match function {
        ADD => "+",
        SUBTRACT => "-",
        MULTIPLY => "*",
        DIVIDE => "/",
        MODULO => "%",
        EQUALS => "==",
        NOT_EQUALS => "!=",
        LESS => "<",
        LESS_EQUALS => "<=",
        GREATER => ">",
        GREATER_EQUALS => ">=",
        LOGICAL_AND => "&&",
        LOGICAL_OR => "||",
        IN => "in",
        _ => return None,
    };
    Some(symbol)
}

/// Binding power of a binary operator function
pub fn binary_precedence(function: &str) -> Option<u8> {
    let bp = match function {
        LOGICAL_OR => BP_LOGICAL_OR,
        LOGICAL_AND => BP_LOGICAL_AND,
        EQUALS | NOT_EQUALS | LESS | LESS_EQUALS | GREATER | GREATER_EQUALS | IN => BP_RELATION,
        ADD | SUBTRACT => BP_ADD,
        MULTIPLY | DIVIDE | MODULO => BP_MUL,
        _ => return None,
    };
    Some(bp)
}

/// Source symbol of a unary operator function
pub fn unary_symbol(function: &str) -> Option<&'static str> {
    match function {
        LOGICAL_NOT => Some("!"),
        NEGATE => Some("-"),
        _ => None,
    }
}

/// Whether `function` is one of the reserved operator names
pub fn is_operator(function: &str) -> bool {
    binary_symbol(function).is_some()
        || unary_symbol(function).is_some()
        || function == INDEX
        || function == CONDITIONAL
}

/// Human-readable name of an operator function, for diagnostics
pub fn display_name(function: &str) -> &str {
    if let Some(symbol) = binary_symbol(function) {
        return symbol;
    }
    match function {
        LOGICAL_NOT => "!",
        NEGATE => "-",
        INDEX => "[]",
        CONDITIONAL => "?:",
        other => other,
    }
}
