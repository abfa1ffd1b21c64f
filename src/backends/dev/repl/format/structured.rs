//! Structured format: the node graph as indented JSON
//!
//! Field names follow the CEL protobuf JSON mapping (`identExpr`,
//! `selectExpr`, `constExpr`, `callExpr`, `listExpr`, `structExpr`,
//! `comprehensionExpr`). Object keys come out sorted.
//!
//! ```text
//! a.b
//!
//! {
//!   "id": 2,
//!   "selectExpr": {
//!     "field": "b",
//!     "operand": {
//!       "id": 1,
//!       "identExpr": {
//!         "name": "a"
//!       }
//!     }
//!   }
//! }
//! ```

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{json, Map, Value};

use super::node::{ExprNode, Literal, NodeKind};

/// Render `expr` with `indent` spaces per nesting level
pub fn render<N: ExprNode>(
    expr: &N,
    indent: usize,
) -> String {
    let value = to_json(expr);
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    if value.serialize(&mut serializer).is_err() {
        return "{}".to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| "{}".to_string())
}

/// JSON value for one node and its children
pub fn to_json<N: ExprNode>(expr: &N) -> Value {
    let (key, body) = match expr.kind() {
        NodeKind::Ident(name) => ("identExpr", json!({ "name": name })),
        NodeKind::Select {
            operand,
            field,
            test_only,
        } => {
            let mut body = Map::new();
            body.insert("operand".into(), to_json(operand));
            body.insert("field".into(), json!(field));
            if test_only {
                body.insert("testOnly".into(), json!(true));
            }
            ("selectExpr", Value::Object(body))
        }
        NodeKind::Literal(literal) => ("constExpr", literal_json(literal)),
        NodeKind::Call {
            target,
            function,
            args,
        } => {
            let mut body = Map::new();
            if let Some(target) = target {
                body.insert("target".into(), to_json(target));
            }
            body.insert("function".into(), json!(function));
            if !args.is_empty() {
                body.insert("args".into(), args.iter().map(to_json).collect());
            }
            ("callExpr", Value::Object(body))
        }
        NodeKind::List(elements) => (
            "listExpr",
            json!({ "elements": elements.iter().map(to_json).collect::<Vec<_>>() }),
        ),
        NodeKind::Map(entries) => {
            let entries: Vec<Value> = entries
                .into_iter()
                .map(|(key, value)| json!({ "mapKey": to_json(key), "value": to_json(value) }))
                .collect();
            ("structExpr", json!({ "entries": entries }))
        }
        NodeKind::Comprehension {
            macro_name,
            var,
            range,
            body,
        } => (
            "comprehensionExpr",
            json!({
                "macro": macro_name,
                "iterVar": var,
                "iterRange": to_json(range),
                "loopStep": to_json(body),
            }),
        ),
    };

    let mut node = Map::new();
    node.insert("id".into(), json!(expr.id()));
    node.insert(key.into(), body);
    Value::Object(node)
}

fn literal_json(literal: Literal<'_>) -> Value {
    match literal {
        Literal::Null => json!({ "nullValue": null }),
        Literal::Bool(b) => json!({ "boolValue": b }),
        Literal::Int(n) => json!({ "int64Value": n }),
        Literal::Uint(n) => json!({ "uint64Value": n }),
        Literal::Double(d) => json!({ "doubleValue": d }),
        Literal::String(s) => json!({ "stringValue": s }),
    }
}
