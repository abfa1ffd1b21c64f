//! Tree-walking evaluator

use indexmap::IndexMap;

use crate::backends::interpreter::builtins;
use crate::backends::interpreter::value::{MapKey, Value};
use crate::backends::interpreter::{Activation, FunctionBindings};
use crate::backends::{EvalError, EvalResult};
use crate::frontend::parser::ast::*;
use crate::frontend::parser::operators::*;

/// Evaluation state for one program run
pub struct Evaluator<'a> {
    bindings: &'a FunctionBindings,
    activation: &'a Activation,
    /// Comprehension variables, innermost last
    scopes: Vec<(String, Value)>,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        bindings: &'a FunctionBindings,
        activation: &'a Activation,
    ) -> Self {
        Self {
            bindings,
            activation,
            scopes: Vec::new(),
        }
    }

    pub fn eval(
        &mut self,
        expr: &Expr,
    ) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::Literal(constant) => Ok(Value::from(constant)),
            ExprKind::Ident(name) => self.lookup(name),
            ExprKind::Select {
                operand,
                field,
                test_only,
            } => {
                let entries = match self.eval(operand)? {
                    Value::Map(entries) => entries,
                    other => {
                        return Err(EvalError::Message(format!(
                            "type '{}' does not support field selection",
                            other.type_name()
                        )))
                    }
                };
                let key = MapKey::String(field.clone());
                if *test_only {
                    return Ok(Value::Bool(entries.contains_key(&key)));
                }
                entries
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| EvalError::NoSuchKey(field.clone()))
            }
            ExprKind::Call {
                target,
                function,
                args,
            } => self.eval_call(target.as_deref(), function, args),
            ExprKind::List(elements) => elements
                .iter()
                .map(|e| self.eval(e))
                .collect::<EvalResult<Vec<_>>>()
                .map(Value::List),
            ExprKind::Map(entries) => {
                let mut map = IndexMap::with_capacity(entries.len());
                for entry in entries {
                    let key = self.eval(&entry.key)?;
                    let value = self.eval(&entry.value)?;
                    let Some(map_key) = key.to_key() else {
                        return Err(EvalError::Message(format!(
                            "unsupported map key type: {}",
                            key.type_name()
                        )));
                    };
                    if map.insert(map_key, value).is_some() {
                        return Err(EvalError::Message(format!("repeated map key: {}", key)));
                    }
                }
                Ok(Value::Map(map))
            }
            ExprKind::Comprehension(comprehension) => self.eval_comprehension(comprehension),
        }
    }

    fn lookup(
        &self,
        name: &str,
    ) -> EvalResult<Value> {
        if let Some((_, value)) = self.scopes.iter().rev().find(|(n, _)| n == name) {
            return Ok(value.clone());
        }
        self.activation
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::NoSuchAttribute(name.to_string()))
    }

    fn eval_call(
        &mut self,
        target: Option<&Expr>,
        function: &str,
        args: &[Expr],
    ) -> EvalResult<Value> {
        if target.is_none() {
            match (function, args) {
                (LOGICAL_AND, [left, right]) => return self.eval_logic(function, left, right, false),
                (LOGICAL_OR, [left, right]) => return self.eval_logic(function, left, right, true),
                (CONDITIONAL, [condition, then_branch, else_branch]) => {
                    return match self.eval(condition)? {
                        Value::Bool(true) => self.eval(then_branch),
                        Value::Bool(false) => self.eval(else_branch),
                        other => Err(builtins::no_overload(function, &[other])),
                    };
                }
                _ => {}
            }
        }

        let mut values = Vec::with_capacity(args.len() + 1);
        if let Some(target) = target {
            values.push(self.eval(target)?);
        }
        for arg in args {
            values.push(self.eval(arg)?);
        }

        if let Some(handler) = self.bindings.get(function) {
            tracing::trace!("calling bound function '{}'", function);
            return handler(&values);
        }
        builtins::call(function, &values)
    }

    /// `&&` (absorbing `false`) and `||` (absorbing `true`)
    ///
    /// An error on one side is discarded when the other side alone decides
    /// the result; `quit()` always propagates.
    fn eval_logic(
        &mut self,
        function: &str,
        left: &Expr,
        right: &Expr,
        absorbing: bool,
    ) -> EvalResult<Value> {
        let left = self.eval(left);
        if decides(&left, absorbing) {
            return left;
        }

        let right = self.eval(right);
        if decides(&right, absorbing) {
            return right;
        }

        match (left?, right?) {
            (Value::Bool(_), Value::Bool(_)) => Ok(Value::Bool(!absorbing)),
            (l, r) => Err(builtins::no_overload(function, &[l, r])),
        }
    }

    fn eval_comprehension(
        &mut self,
        comprehension: &Comprehension,
    ) -> EvalResult<Value> {
        let items = match self.eval(&comprehension.range)? {
            Value::List(items) => items,
            Value::Map(entries) => entries.into_keys().map(Value::from).collect(),
            other => {
                return Err(EvalError::Message(format!(
                    "expression of type '{}' cannot be the range of a comprehension",
                    other.type_name()
                )))
            }
        };

        let kind = comprehension.kind;
        let mut results = Vec::new();
        let mut hits = 0usize;
        // First error in all()/exists(), kept in case no element decides
        let mut deferred: Option<EvalError> = None;

        for item in items {
            self.scopes.push((comprehension.var.clone(), item.clone()));
            let outcome = self.eval(&comprehension.body);
            self.scopes.pop();

            if kind == MacroKind::Map {
                results.push(outcome?);
                continue;
            }

            let decided = match outcome {
                Ok(Value::Bool(b)) => b,
                Err(EvalError::Quit) => return Err(EvalError::Quit),
                Err(err) if matches!(kind, MacroKind::All | MacroKind::Exists) => {
                    deferred.get_or_insert(err);
                    continue;
                }
                Err(err) => return Err(err),
                Ok(other) => {
                    return Err(builtins::no_overload(kind.name(), &[other]));
                }
            };

            match kind {
                MacroKind::All if !decided => return Ok(Value::Bool(false)),
                MacroKind::Exists if decided => return Ok(Value::Bool(true)),
                MacroKind::ExistsOne if decided => hits += 1,
                MacroKind::Filter if decided => results.push(item),
                _ => {}
            }
        }

        if let Some(err) = deferred {
            return Err(err);
        }

        Ok(match kind {
            MacroKind::All => Value::Bool(true),
            MacroKind::Exists => Value::Bool(false),
            MacroKind::ExistsOne => Value::Bool(hits == 1),
            MacroKind::Map | MacroKind::Filter => Value::List(results),
        })
    }
}

/// Whether one operand of `&&`/`||` settles the result on its own
fn decides(
    result: &EvalResult<Value>,
    absorbing: bool,
) -> bool {
    match result {
        Err(EvalError::Quit) => true,
        Ok(Value::Bool(b)) => *b == absorbing,
        _ => false,
    }
}
