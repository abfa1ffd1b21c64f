//! 类型检查器模块
//!
//! 实现表达式的类型检查，支持：
//! - 标识符和函数声明解析
//! - 函数重载选择
//! - 推导式变量作用域
//! - 完整的错误收集

use indexmap::IndexMap;

use crate::frontend::parser::ast::Expr;

pub mod check;
pub mod errors;
pub mod overload;
pub mod types;

#[cfg(test)]
mod tests;

pub use check::TypeChecker;
pub use errors::{TypeError, TypeResult};
pub use overload::{standard_declarations, FunctionDecl, OverloadDecl};
pub use types::Type;

/// Check `expr` against declared functions and variables
pub fn check_expr(
    expr: &Expr,
    functions: &IndexMap<String, FunctionDecl>,
    variables: &IndexMap<String, Type>,
) -> Result<Type, Vec<TypeError>> {
    TypeChecker::new(functions, variables).check(expr)
}
