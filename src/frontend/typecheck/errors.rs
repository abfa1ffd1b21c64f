//! 错误收集和报告
//!
//! 定义类型检查过程中的所有错误类型

use super::types::Type;
use crate::util::span::Span;
use thiserror::Error;

/// 类型错误
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeError {
    /// 未声明的标识符或函数
    #[error("undeclared reference to '{name}'")]
    UndeclaredReference { name: String, span: Span },

    /// 无匹配重载
    #[error("found no matching overload for '{function}' applied to '({})'", format_types(.args))]
    NoMatchingOverload {
        function: String,
        args: Vec<Type>,
        span: Span,
    },

    /// 类型不匹配
    #[error("expected type '{expected}' but found '{found}'")]
    Mismatch {
        expected: Type,
        found: Type,
        span: Span,
    },

    /// 字段选择只支持 map 和 dyn
    #[error("type '{ty}' does not support field selection")]
    FieldSelection { ty: Type, span: Span },

    /// 推导式的范围必须是 list 或 map
    #[error("expression of type '{ty}' cannot be the range of a comprehension")]
    ComprehensionRange { ty: Type, span: Span },

    /// map 键类型不支持
    #[error("unsupported map key type: {ty}")]
    MapKey { ty: Type, span: Span },
}

impl TypeError {
    pub fn span(&self) -> Span {
        match self {
            TypeError::UndeclaredReference { span, .. }
            | TypeError::NoMatchingOverload { span, .. }
            | TypeError::Mismatch { span, .. }
            | TypeError::FieldSelection { span, .. }
            | TypeError::ComprehensionRange { span, .. }
            | TypeError::MapKey { span, .. } => *span,
        }
    }
}

/// 类型检查结果
pub type TypeResult<T> = Result<T, TypeError>;

/// Comma separated type list, as used in overload messages
pub fn format_types(types: &[Type]) -> String {
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
