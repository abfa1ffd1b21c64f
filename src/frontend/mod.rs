//! Frontend compilation pipeline
//!
//! This module contains the lexer, parser and type checker, tied together
//! by [`Env`]: `compile` parses (expanding macros), `check` type-checks
//! against the declared functions, and `program` hands a checked tree to
//! the interpreter together with its function bindings.

use std::rc::Rc;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::backends::interpreter::{FunctionBindings, Program};
use crate::backends::ProgramError;
use crate::util::diagnostic::{Diagnostic, Issues};
use crate::util::span::SourceFile;

pub mod lexer;
pub mod parser;
pub mod typecheck;

use parser::ast::Expr;
use typecheck::{FunctionDecl, Type};

/// Name given to REPL input in diagnostics
pub const INPUT_NAME: &str = "<input>";

/// Environment options, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvOptions {
    /// Expand `has` and the comprehension macros while parsing
    pub macros: bool,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self { macros: true }
    }
}

/// Declaration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    #[error("overload '{id}' of function '{name}' is already declared with a different signature")]
    OverloadConflict { name: String, id: String },

    #[error("function '{0}' declared without overloads")]
    EmptyDeclaration(String),

    #[error("variable '{name}' is already declared as {existing}")]
    VariableConflict { name: String, existing: Type },
}

/// A parsed, possibly checked, expression with its source
#[derive(Debug, Clone)]
pub struct Ast {
    expr: Expr,
    source: Rc<SourceFile>,
    result_type: Option<Type>,
}

impl Ast {
    /// Expression tree
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Source the expression was parsed from
    pub fn source(&self) -> &Rc<SourceFile> {
        &self.source
    }

    /// Result type, once checked
    pub fn result_type(&self) -> Option<&Type> {
        self.result_type.as_ref()
    }

    pub fn is_checked(&self) -> bool {
        self.result_type.is_some()
    }
}

/// Compilation environment: options and declarations
#[derive(Debug, Clone)]
pub struct Env {
    options: EnvOptions,
    functions: IndexMap<String, FunctionDecl>,
    variables: IndexMap<String, Type>,
}

impl Default for Env {
    fn default() -> Self {
        Self::new(EnvOptions::default())
    }
}

impl Env {
    /// Create an environment with the standard function declarations
    pub fn new(options: EnvOptions) -> Self {
        let functions = typecheck::standard_declarations()
            .into_iter()
            .map(|decl| (decl.name.clone(), decl))
            .collect();
        Self {
            options,
            functions,
            variables: IndexMap::new(),
        }
    }

    pub fn options(&self) -> EnvOptions {
        self.options
    }

    /// Declare a function, adding overloads to any existing declaration
    ///
    /// Re-declaring an identical overload is a no-op; re-using an overload id
    /// with a different signature is an error.
    pub fn declare(
        &mut self,
        decl: FunctionDecl,
    ) -> Result<(), EnvError> {
        if decl.overloads.is_empty() {
            return Err(EnvError::EmptyDeclaration(decl.name));
        }

        if let Some(existing) = self.functions.get_mut(&decl.name) {
            for overload in &decl.overloads {
                let conflict = existing
                    .overloads
                    .iter()
                    .any(|o| o.id == overload.id && o != overload);
                if conflict {
                    return Err(EnvError::OverloadConflict {
                        name: decl.name.clone(),
                        id: overload.id.clone(),
                    });
                }
            }
            debug!("extending declaration of '{}'", decl.name);
            existing.merge(decl);
        } else {
            debug!("declaring function '{}'", decl.name);
            self.functions.insert(decl.name.clone(), decl);
        }
        Ok(())
    }

    /// Declare a variable for the checker
    pub fn declare_variable(
        &mut self,
        name: impl Into<String>,
        ty: Type,
    ) -> Result<(), EnvError> {
        let name = name.into();
        match self.variables.get(&name) {
            Some(existing) if *existing != ty => Err(EnvError::VariableConflict {
                name,
                existing: existing.clone(),
            }),
            _ => {
                self.variables.insert(name, ty);
                Ok(())
            }
        }
    }

    /// Look up a function declaration
    pub fn function(
        &self,
        name: &str,
    ) -> Option<&FunctionDecl> {
        self.functions.get(name)
    }

    /// Names of all declared functions, operators included
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Parse `text`; the tree is absent whenever issues were reported
    pub fn compile(
        &self,
        text: &str,
    ) -> (Option<Ast>, Issues) {
        debug!("compiling {} bytes", text.len());
        let source = Rc::new(SourceFile::new(INPUT_NAME, text));
        let mut issues = Issues::new(Rc::clone(&source));

        match parser::parse_source(text, self.options.macros) {
            Ok(expr) => {
                debug!("parsed expression with root id {}", expr.id);
                let ast = Ast {
                    expr,
                    source,
                    result_type: None,
                };
                (Some(ast), issues)
            }
            Err(e) => {
                issues.push(Diagnostic::error(e.to_string(), Some(e.span())));
                (None, issues)
            }
        }
    }

    /// Type-check a parsed tree, returning a copy annotated with its type
    pub fn check(
        &self,
        ast: &Ast,
    ) -> (Option<Ast>, Issues) {
        let mut issues = Issues::new(Rc::clone(&ast.source));

        match typecheck::check_expr(&ast.expr, &self.functions, &self.variables) {
            Ok(ty) => {
                debug!("checked expression as {}", ty);
                let checked = Ast {
                    result_type: Some(ty),
                    ..ast.clone()
                };
                (Some(checked), issues)
            }
            Err(errors) => {
                debug!("type check reported {} errors", errors.len());
                for error in errors {
                    issues.push(Diagnostic::error(error.to_string(), Some(error.span())));
                }
                (None, issues)
            }
        }
    }

    /// Build an executable program for `ast`
    pub fn program(
        &self,
        ast: &Ast,
        bindings: &FunctionBindings,
    ) -> Result<Program, ProgramError> {
        Program::new(ast.expr.clone(), bindings.clone())
    }
}
