//! Built-in operators and functions
//!
//! Every built-in takes already evaluated arguments; receiver-style calls
//! pass the receiver as the first argument. The short-circuiting operators
//! and the conditional are handled by the evaluator, not here.

use std::cmp::Ordering;

use crate::backends::interpreter::value::{numeric_cmp, Value};
use crate::backends::{EvalError, EvalResult};
use crate::frontend::parser::operators::*;
use crate::frontend::parser::quote;

const FUNCTIONS: &[&str] = &[
    "size",
    "contains",
    "startsWith",
    "endsWith",
    "int",
    "uint",
    "double",
    "string",
    "bool",
];

/// Whether `function` has a built-in implementation
pub fn is_builtin(function: &str) -> bool {
    is_operator(function) || FUNCTIONS.contains(&function)
}

/// Error for arguments no overload accepts
pub fn no_overload(
    function: &str,
    args: &[Value],
) -> EvalError {
    EvalError::NoMatchingOverload {
        function: function.to_string(),
        args: args
            .iter()
            .map(Value::type_name)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Call a built-in; `NoMatchingOverload` when it does not accept `args`
pub fn call(
    function: &str,
    args: &[Value],
) -> EvalResult<Value> {
    match (function, args) {
        (ADD, [a, b]) => add(a, b),
        (SUBTRACT, [a, b]) => arithmetic(function, a, b, i64::checked_sub, u64::checked_sub, |x, y| x - y),
        (MULTIPLY, [a, b]) => arithmetic(function, a, b, i64::checked_mul, u64::checked_mul, |x, y| x * y),
        (DIVIDE, [a, b]) => divide(a, b),
        (MODULO, [a, b]) => modulo(a, b),
        (NEGATE, [Value::Int(n)]) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or(EvalError::Overflow("integer")),
        (NEGATE, [Value::Double(d)]) => Ok(Value::Double(-d)),
        (LOGICAL_NOT, [Value::Bool(b)]) => Ok(Value::Bool(!b)),
        (EQUALS, [a, b]) => Ok(Value::Bool(a.loose_eq(b))),
        (NOT_EQUALS, [a, b]) => Ok(Value::Bool(!a.loose_eq(b))),
        (LESS, [a, b]) => compare(function, a, b, Ordering::is_lt),
        (LESS_EQUALS, [a, b]) => compare(function, a, b, Ordering::is_le),
        (GREATER, [a, b]) => compare(function, a, b, Ordering::is_gt),
        (GREATER_EQUALS, [a, b]) => compare(function, a, b, Ordering::is_ge),
        (INDEX, [container, key]) => index(container, key),
        (IN, [elem, Value::List(items)]) => Ok(Value::Bool(items.iter().any(|v| v.loose_eq(elem)))),
        (IN, [key, Value::Map(entries)]) => Ok(Value::Bool(
            key.to_key().is_some_and(|k| entries.contains_key(&k)),
        )),
        ("size", [value]) => size(value),
        ("contains", [Value::String(s), Value::String(part)]) => Ok(Value::Bool(s.contains(part.as_str()))),
        ("startsWith", [Value::String(s), Value::String(prefix)]) => {
            Ok(Value::Bool(s.starts_with(prefix.as_str())))
        }
        ("endsWith", [Value::String(s), Value::String(suffix)]) => {
            Ok(Value::Bool(s.ends_with(suffix.as_str())))
        }
        ("int", [value]) => to_int(value),
        ("uint", [value]) => to_uint(value),
        ("double", [value]) => to_double(value),
        ("string", [value]) => to_string(value),
        ("bool", [value]) => to_bool(value),
        _ => Err(no_overload(function, args)),
    }
}

fn add(
    a: &Value,
    b: &Value,
) -> EvalResult<Value> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Ok(Value::String(format!("{}{}", x, y))),
        (Value::List(x), Value::List(y)) => Ok(Value::List(x.iter().chain(y).cloned().collect())),
        _ => arithmetic(ADD, a, b, i64::checked_add, u64::checked_add, |x, y| x + y),
    }
}

fn arithmetic(
    function: &str,
    a: &Value,
    b: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    uint_op: fn(u64, u64) -> Option<u64>,
    double_op: fn(f64, f64) -> f64,
) -> EvalResult<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => int_op(*x, *y)
            .map(Value::Int)
            .ok_or(EvalError::Overflow("integer")),
        (Value::Uint(x), Value::Uint(y)) => uint_op(*x, *y)
            .map(Value::Uint)
            .ok_or(EvalError::Overflow("unsigned integer")),
        (Value::Double(x), Value::Double(y)) => Ok(Value::Double(double_op(*x, *y))),
        _ => Err(no_overload(function, &[a.clone(), b.clone()])),
    }
}

fn divide(
    a: &Value,
    b: &Value,
) -> EvalResult<Value> {
    match (a, b) {
        (Value::Int(_), Value::Int(0)) | (Value::Uint(_), Value::Uint(0)) => {
            Err(EvalError::DivisionByZero)
        }
        _ => arithmetic(DIVIDE, a, b, i64::checked_div, u64::checked_div, |x, y| x / y),
    }
}

fn modulo(
    a: &Value,
    b: &Value,
) -> EvalResult<Value> {
    match (a, b) {
        (Value::Int(_), Value::Int(0)) | (Value::Uint(_), Value::Uint(0)) => {
            Err(EvalError::ModulusByZero)
        }
        (Value::Int(x), Value::Int(y)) => x
            .checked_rem(*y)
            .map(Value::Int)
            .ok_or(EvalError::Overflow("integer")),
        (Value::Uint(x), Value::Uint(y)) => Ok(Value::Uint(x % y)),
        _ => Err(no_overload(MODULO, &[a.clone(), b.clone()])),
    }
}

fn compare(
    function: &str,
    a: &Value,
    b: &Value,
    accept: fn(Ordering) -> bool,
) -> EvalResult<Value> {
    let ordering = match (a, b) {
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Int(_) | Value::Uint(_) | Value::Double(_), Value::Int(_) | Value::Uint(_) | Value::Double(_)) => {
            numeric_cmp(a, b)
        }
        _ => return Err(no_overload(function, &[a.clone(), b.clone()])),
    };
    // NaN compares false
    Ok(Value::Bool(ordering.is_some_and(accept)))
}

fn index(
    container: &Value,
    index: &Value,
) -> EvalResult<Value> {
    match (container, index) {
        (Value::List(items), Value::Int(_) | Value::Uint(_)) => {
            let position = match index {
                Value::Int(n) => usize::try_from(*n).ok(),
                Value::Uint(n) => usize::try_from(*n).ok(),
                _ => None,
            };
            position
                .and_then(|i| items.get(i))
                .cloned()
                .ok_or_else(|| EvalError::IndexOutOfRange(index.to_string()))
        }
        (Value::Map(entries), key) => key
            .to_key()
            .and_then(|k| entries.get(&k))
            .cloned()
            .ok_or_else(|| EvalError::NoSuchKey(key.to_string())),
        _ => Err(no_overload(INDEX, &[container.clone(), index.clone()])),
    }
}

fn size(value: &Value) -> EvalResult<Value> {
    let len = match value {
        Value::String(s) => s.chars().count(),
        Value::List(items) => items.len(),
        Value::Map(entries) => entries.len(),
        other => return Err(no_overload("size", std::slice::from_ref(other))),
    };
    i64::try_from(len)
        .map(Value::Int)
        .map_err(|_| EvalError::Overflow("integer"))
}

fn to_int(value: &Value) -> EvalResult<Value> {
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Uint(n) => i64::try_from(*n)
            .map(Value::Int)
            .map_err(|_| EvalError::Conversion(format!("uint {} out of int range", n))),
        Value::Double(d) => {
            // i64::MAX as f64 rounds up to 2^63, hence the exclusive bound
            if d.is_finite() && *d >= i64::MIN as f64 && *d < i64::MAX as f64 {
                Ok(Value::Int(d.trunc() as i64))
            } else {
                Err(EvalError::Conversion(format!("double {:?} out of int range", d)))
            }
        }
        Value::String(s) => s
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| EvalError::Conversion(format!("cannot parse {} as int", quote(s)))),
        other => Err(no_overload("int", std::slice::from_ref(other))),
    }
}

fn to_uint(value: &Value) -> EvalResult<Value> {
    match value {
        Value::Uint(n) => Ok(Value::Uint(*n)),
        Value::Int(n) => u64::try_from(*n)
            .map(Value::Uint)
            .map_err(|_| EvalError::Conversion(format!("int {} out of uint range", n))),
        Value::Double(d) => {
            if d.is_finite() && *d > -1.0 && *d < u64::MAX as f64 {
                Ok(Value::Uint(d.trunc() as u64))
            } else {
                Err(EvalError::Conversion(format!("double {:?} out of uint range", d)))
            }
        }
        Value::String(s) => s
            .parse::<u64>()
            .map(Value::Uint)
            .map_err(|_| EvalError::Conversion(format!("cannot parse {} as uint", quote(s)))),
        other => Err(no_overload("uint", std::slice::from_ref(other))),
    }
}

fn to_double(value: &Value) -> EvalResult<Value> {
    match value {
        Value::Double(d) => Ok(Value::Double(*d)),
        Value::Int(n) => Ok(Value::Double(*n as f64)),
        Value::Uint(n) => Ok(Value::Double(*n as f64)),
        Value::String(s) => s
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|_| EvalError::Conversion(format!("cannot parse {} as double", quote(s)))),
        other => Err(no_overload("double", std::slice::from_ref(other))),
    }
}

fn to_string(value: &Value) -> EvalResult<Value> {
    match value {
        Value::String(s) => Ok(Value::String(s.clone())),
        Value::Int(n) => Ok(Value::String(n.to_string())),
        Value::Uint(n) => Ok(Value::String(n.to_string())),
        Value::Double(d) => Ok(Value::String(d.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(no_overload("string", std::slice::from_ref(other))),
    }
}

fn to_bool(value: &Value) -> EvalResult<Value> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::String(s) => match s.as_str() {
            "true" | "True" | "TRUE" | "t" | "1" => Ok(Value::Bool(true)),
            "false" | "False" | "FALSE" | "f" | "0" => Ok(Value::Bool(false)),
            _ => Err(EvalError::Conversion(format!("cannot parse {} as bool", quote(s)))),
        },
        other => Err(no_overload("bool", std::slice::from_ref(other))),
    }
}
