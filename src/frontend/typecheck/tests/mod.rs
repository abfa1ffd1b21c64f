//! 类型检查测试


use indexmap::IndexMap;

use crate::frontend::parser::parse_source;
use crate::frontend::typecheck::{check_expr, standard_declarations, Type, TypeError};

/// Check `source` against the standard declarations and the given variables
pub(super) fn check_with(
    source: &str,
    variables: &[(&str, Type)],
) -> Result<Type, Vec<TypeError>> {
    let expr = parse_source(source, true).unwrap();
    let functions: IndexMap<_, _> = standard_declarations()
        .into_iter()
        .map(|d| (d.name.clone(), d))
        .collect();
    let variables: IndexMap<_, _> = variables
        .iter()
        .map(|(name, ty)| (name.to_string(), ty.clone()))
        .collect();
    check_expr(&expr, &functions, &variables)
}

pub(super) fn check(source: &str) -> Result<Type, Vec<TypeError>> {
    check_with(source, &[])
}
