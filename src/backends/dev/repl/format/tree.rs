//! Tree format: one line per node, nesting shown with tabs
//!
//! ```text
//! f(a.b, 1)
//!
//! (call: f)
//!     (ident: a).b
//!     (const<int64>: 1)
//! ```
//!
//! A call's receiver is not shown.

use super::node::{ExprNode, NodeKind};

/// Render `expr`, without a trailing newline
pub fn render<N: ExprNode>(expr: &N) -> String {
    let mut out = String::new();
    write_node(&mut out, expr, 0);
    out
}

/// Start a new line at `level` (the root stays on the first line)
fn write_line_start(
    out: &mut String,
    level: usize,
) {
    if level > 0 {
        out.push('\n');
        for _ in 0..level {
            out.push('\t');
        }
    }
}

fn write_node<N: ExprNode>(
    out: &mut String,
    expr: &N,
    level: usize,
) {
    write_line_start(out, level);
    write_body(out, expr, level);
}

fn write_body<N: ExprNode>(
    out: &mut String,
    expr: &N,
    level: usize,
) {
    match expr.kind() {
        NodeKind::Ident(name) => {
            out.push_str("(ident: ");
            out.push_str(name);
            out.push(')');
        }
        NodeKind::Select { operand, field, .. } => {
            // operand stays on this line
            write_body(out, operand, level);
            out.push('.');
            out.push_str(field);
        }
        NodeKind::Literal(literal) => {
            out.push_str(&format!(
                "(const<{}>: {})",
                literal.type_tag(),
                literal.value_text()
            ));
        }
        NodeKind::Call { function, args, .. } => {
            out.push_str("(call: ");
            out.push_str(function);
            out.push(')');
            for arg in args {
                write_node(out, arg, level + 1);
            }
        }
        NodeKind::List(elements) => {
            out.push_str("(list)");
            for element in elements {
                write_node(out, element, level + 1);
            }
        }
        NodeKind::Map(entries) => {
            out.push_str("(map)");
            for (key, value) in entries {
                write_line_start(out, level + 1);
                out.push_str("(entry)");
                write_node(out, key, level + 2);
                write_node(out, value, level + 2);
            }
        }
        NodeKind::Comprehension {
            macro_name,
            var,
            range,
            body,
        } => {
            out.push_str(&format!("(comprehension: {} {})", macro_name, var));
            write_node(out, range, level + 1);
            write_node(out, body, level + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::parse_source;

    fn tree(source: &str) -> String {
        render(&parse_source(source, true).unwrap())
    }

    #[test]
    fn test_leaves() {
        assert_eq!(tree("foo"), "(ident: foo)");
        assert_eq!(tree("1"), "(const<int64>: 1)");
        assert_eq!(tree("2u"), "(const<uint64>: 2)");
        assert_eq!(tree("1.5"), "(const<double>: 1.5)");
        assert_eq!(tree("true"), "(const<bool>: true)");
        assert_eq!(tree("'hi'"), "(const<string>: hi)");
        assert_eq!(tree("null"), "(const<unknown>: null)");
    }

    #[test]
    fn test_call_children_one_level_deeper() {
        assert_eq!(
            tree("f(1, 2)"),
            "(call: f)\n\t(const<int64>: 1)\n\t(const<int64>: 2)"
        );
        assert_eq!(
            tree("1 + x * 2"),
            "(call: _+_)\n\t(const<int64>: 1)\n\t(call: _*_)\n\t\t(ident: x)\n\t\t(const<int64>: 2)"
        );
    }

    #[test]
    fn test_select_stays_on_line() {
        assert_eq!(tree("a.b.c"), "(ident: a).b.c");
        assert_eq!(tree("f(a.b)"), "(call: f)\n\t(ident: a).b");
    }

    #[test]
    fn test_receiver_not_rendered() {
        assert_eq!(tree("'abc'.startsWith('a')"), "(call: startsWith)\n\t(const<string>: a)");
    }

    #[test]
    fn test_aggregates() {
        assert_eq!(tree("[1, x]"), "(list)\n\t(const<int64>: 1)\n\t(ident: x)");
        assert_eq!(
            tree("{'a': 1}"),
            "(map)\n\t(entry)\n\t\t(const<string>: a)\n\t\t(const<int64>: 1)"
        );
        assert_eq!(
            tree("xs.all(x, x)"),
            "(comprehension: all x)\n\t(ident: xs)\n\t(ident: x)"
        );
    }
}
