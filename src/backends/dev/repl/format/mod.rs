//! Expression formatter for `inspect`
//!
//! Renders an [`ExprNode`] tree in one of three forms, selected by a format
//! tag:
//!
//! | Tag | Alias | Output |
//! |-----|-------|--------|
//! | `raw` | `go` | canonical source text |
//! | `structured` | `json` | indented JSON of the node graph |
//! | `tree` | `pretty` | one line per node, tab indented |
//!
//! Any other tag renders as `unrecognized output format <tag>`. Formatting
//! never fails.

pub mod node;
pub mod structured;
pub mod tree;

use std::fmt;

pub use node::{ExprNode, Literal, NodeKind};

/// Output format selected by a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Raw,
    Structured,
    Tree,
    Unrecognized(String),
}

impl OutputFormat {
    /// Format used when `inspect` is called without a tag
    pub const DEFAULT: OutputFormat = OutputFormat::Raw;

    /// Resolve a tag; unknown tags are kept verbatim
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "raw" | "go" => OutputFormat::Raw,
            "structured" | "json" => OutputFormat::Structured,
            "tree" | "pretty" => OutputFormat::Tree,
            other => OutputFormat::Unrecognized(other.to_string()),
        }
    }

    /// Canonical tag
    pub fn tag(&self) -> &str {
        match self {
            OutputFormat::Raw => "raw",
            OutputFormat::Structured => "structured",
            OutputFormat::Tree => "tree",
            OutputFormat::Unrecognized(tag) => tag,
        }
    }
}

impl From<&str> for OutputFormat {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Renders expression trees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    /// Spaces per nesting level in the structured format
    indent: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Formatter {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Render with the default format
    pub fn format<N: ExprNode>(
        &self,
        expr: &N,
    ) -> String {
        self.render(expr, &OutputFormat::DEFAULT)
    }

    /// Render with the format named by `tag`
    pub fn format_with<N: ExprNode>(
        &self,
        expr: &N,
        tag: &str,
    ) -> String {
        self.render(expr, &OutputFormat::from_tag(tag))
    }

    pub fn render<N: ExprNode>(
        &self,
        expr: &N,
        format: &OutputFormat,
    ) -> String {
        match format {
            OutputFormat::Raw => expr.to_string(),
            OutputFormat::Structured => structured::render(expr, self.indent),
            OutputFormat::Tree => tree::render(expr),
            OutputFormat::Unrecognized(tag) => format!("unrecognized output format {}", tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::parse_source;

    #[test]
    fn test_tags_and_aliases() {
        assert_eq!(OutputFormat::from_tag("raw"), OutputFormat::Raw);
        assert_eq!(OutputFormat::from_tag("go"), OutputFormat::Raw);
        assert_eq!(OutputFormat::from_tag("json"), OutputFormat::Structured);
        assert_eq!(OutputFormat::from_tag("pretty"), OutputFormat::Tree);
        assert_eq!(
            OutputFormat::from_tag("Tree"),
            OutputFormat::Unrecognized("Tree".to_string())
        );
        assert_eq!(OutputFormat::from("structured").to_string(), "structured");
    }

    #[test]
    fn test_unrecognized_tag() {
        let expr = parse_source("a.b", true).unwrap();
        let formatter = Formatter::default();
        assert_eq!(formatter.format_with(&expr, "xml"), "unrecognized output format xml");
        assert_eq!(formatter.format_with(&expr, ""), "unrecognized output format ");
    }

    #[test]
    fn test_raw_is_canonical_source() {
        let expr = parse_source("f( 1,2 )  +x", true).unwrap();
        let formatter = Formatter::default();
        assert_eq!(formatter.format(&expr), "f(1, 2) + x");
        assert_eq!(formatter.format_with(&expr, "go"), "f(1, 2) + x");
    }

    #[test]
    fn test_raw_reparses_to_same_tree() {
        let formatter = Formatter::default();
        for source in [
            "a.b.c",
            "has(a.b) ? -1 : 2u",
            "[1, 2].map(x, x * 2.5)",
            "{'k': \"v\\n\"}['k'].size()",
            "!(a || b) && c in [1]",
        ] {
            let expr = parse_source(source, true).unwrap();
            let raw = formatter.format_with(&expr, "raw");
            assert_eq!(parse_source(&raw, true).unwrap(), expr, "{}", raw);
        }
    }
}
