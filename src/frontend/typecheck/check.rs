//! 表达式类型检查
//!
//! Bottom-up type inference over one expression. Errors are collected
//! rather than returned early; a failed sub-expression is typed `dyn` so
//! checking continues and reports every independent problem.

use indexmap::IndexMap;

use super::errors::TypeError;
use super::overload::FunctionDecl;
use super::types::Type;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::operators::*;
use crate::util::span::Span;

/// 类型检查器
#[derive(Debug)]
pub struct TypeChecker<'a> {
    functions: &'a IndexMap<String, FunctionDecl>,
    variables: &'a IndexMap<String, Type>,
    /// Comprehension variables, innermost last
    scopes: Vec<(String, Type)>,
    errors: Vec<TypeError>,
}

impl<'a> TypeChecker<'a> {
    /// 创建新的类型检查器
    pub fn new(
        functions: &'a IndexMap<String, FunctionDecl>,
        variables: &'a IndexMap<String, Type>,
    ) -> Self {
        Self {
            functions,
            variables,
            scopes: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Type of `expr`, or every error found
    pub fn check(
        mut self,
        expr: &Expr,
    ) -> Result<Type, Vec<TypeError>> {
        let ty = self.infer(expr);
        if self.errors.is_empty() {
            Ok(ty)
        } else {
            Err(self.errors)
        }
    }

    /// 添加错误
    fn add_error(
        &mut self,
        error: TypeError,
    ) -> Type {
        tracing::trace!("type error: {}", error);
        self.errors.push(error);
        Type::Dyn
    }

    fn infer(
        &mut self,
        expr: &Expr,
    ) -> Type {
        match &expr.kind {
            ExprKind::Literal(constant) => literal_type(constant),
            ExprKind::Ident(name) => self.infer_ident(name, expr.span),
            ExprKind::Select {
                operand,
                field: _,
                test_only,
            } => {
                let operand_ty = self.infer(operand);
                let field_ty = match operand_ty {
                    Type::Map(key, value) if key.is_assignable_from(&Type::String) => *value,
                    Type::Dyn => Type::Dyn,
                    ty => {
                        return self.add_error(TypeError::FieldSelection {
                            ty,
                            span: expr.span,
                        })
                    }
                };
                if *test_only {
                    Type::Bool
                } else {
                    field_ty
                }
            }
            ExprKind::Call {
                target,
                function,
                args,
            } => self.infer_call(target.as_deref(), function, args, expr.span),
            ExprKind::List(elements) => {
                let types: Vec<Type> = elements.iter().map(|e| self.infer(e)).collect();
                Type::list(Type::join_all(&types))
            }
            ExprKind::Map(entries) => {
                let mut keys = Vec::with_capacity(entries.len());
                let mut values = Vec::with_capacity(entries.len());
                for entry in entries {
                    let key_ty = self.infer(&entry.key);
                    if !key_ty.is_valid_map_key() {
                        self.add_error(TypeError::MapKey {
                            ty: key_ty.clone(),
                            span: entry.key.span,
                        });
                    }
                    keys.push(key_ty);
                    values.push(self.infer(&entry.value));
                }
                Type::map(Type::join_all(&keys), Type::join_all(&values))
            }
            ExprKind::Comprehension(comprehension) => self.infer_comprehension(comprehension),
        }
    }

    fn infer_ident(
        &mut self,
        name: &str,
        span: Span,
    ) -> Type {
        if let Some((_, ty)) = self.scopes.iter().rev().find(|(n, _)| n == name) {
            return ty.clone();
        }
        if let Some(ty) = self.variables.get(name) {
            return ty.clone();
        }
        self.add_error(TypeError::UndeclaredReference {
            name: name.to_string(),
            span,
        })
    }

    fn infer_call(
        &mut self,
        target: Option<&Expr>,
        function: &str,
        args: &[Expr],
        span: Span,
    ) -> Type {
        let mut arg_types = Vec::with_capacity(args.len() + 1);
        if let Some(target) = target {
            arg_types.push(self.infer(target));
        }
        for arg in args {
            arg_types.push(self.infer(arg));
        }

        if target.is_none() {
            if let Some(ty) = structural_call(function, &arg_types) {
                return ty;
            }
            if matches!(function, CONDITIONAL | INDEX | IN | EQUALS | NOT_EQUALS) {
                return self.no_overload(function, arg_types, span);
            }
        }

        let Some(decl) = self.functions.get(function) else {
            return self.add_error(TypeError::UndeclaredReference {
                name: function.to_string(),
                span,
            });
        };

        match decl.resolve(&arg_types, target.is_some()) {
            Some(ty) => ty,
            None => self.no_overload(function, arg_types, span),
        }
    }

    fn no_overload(
        &mut self,
        function: &str,
        args: Vec<Type>,
        span: Span,
    ) -> Type {
        self.add_error(TypeError::NoMatchingOverload {
            function: function.to_string(),
            args,
            span,
        })
    }

    fn infer_comprehension(
        &mut self,
        comprehension: &Comprehension,
    ) -> Type {
        let range_ty = self.infer(&comprehension.range);
        let var_ty = match &range_ty {
            Type::List(elem) => (**elem).clone(),
            Type::Map(key, _) => (**key).clone(),
            Type::Dyn => Type::Dyn,
            other => self.add_error(TypeError::ComprehensionRange {
                ty: other.clone(),
                span: comprehension.range.span,
            }),
        };

        self.scopes.push((comprehension.var.clone(), var_ty.clone()));
        let body_ty = self.infer(&comprehension.body);
        self.scopes.pop();

        if comprehension.kind.is_predicate() && !Type::Bool.is_assignable_from(&body_ty) {
            self.add_error(TypeError::Mismatch {
                expected: Type::Bool,
                found: body_ty.clone(),
                span: comprehension.body.span,
            });
        }

        match comprehension.kind {
            MacroKind::All | MacroKind::Exists | MacroKind::ExistsOne => Type::Bool,
            MacroKind::Map => Type::list(body_ty),
            MacroKind::Filter => Type::list(var_ty),
        }
    }
}

fn literal_type(constant: &Constant) -> Type {
    match constant {
        Constant::Null => Type::Null,
        Constant::Bool(_) => Type::Bool,
        Constant::Int(_) => Type::Int,
        Constant::Uint(_) => Type::Uint,
        Constant::Double(_) => Type::Double,
        Constant::String(_) => Type::String,
    }
}

/// Operators typed by the shape of their operands rather than declarations
fn structural_call(
    function: &str,
    args: &[Type],
) -> Option<Type> {
    match (function, args) {
        (CONDITIONAL, [cond, then_ty, else_ty]) if Type::Bool.is_assignable_from(cond) => {
            Some(then_ty.join(else_ty))
        }
        (INDEX, [Type::List(elem), index]) if Type::Int.is_assignable_from(index) => {
            Some((**elem).clone())
        }
        (INDEX, [Type::Map(key, value), index]) if key.is_assignable_from(index) => {
            Some((**value).clone())
        }
        (INDEX, [Type::Dyn, _]) => Some(Type::Dyn),
        (IN, [elem, Type::List(list_elem)]) if list_elem.is_assignable_from(elem) => {
            Some(Type::Bool)
        }
        (IN, [key, Type::Map(map_key, _)]) if map_key.is_assignable_from(key) => Some(Type::Bool),
        (IN, [_, Type::Dyn]) => Some(Type::Bool),
        (EQUALS | NOT_EQUALS, [left, right])
            if left.is_assignable_from(right) || *left == Type::Null || *right == Type::Null =>
        {
            Some(Type::Bool)
        }
        (ADD, [Type::List(a), Type::List(b)]) => Some(Type::list(a.join(b))),
        _ => None,
    }
}
