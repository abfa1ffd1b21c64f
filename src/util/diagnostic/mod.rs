//! Compile and check diagnostics
//!
//! A [`Diagnostic`] is one issue reported by the lexer, parser or checker.
//! [`Issues`] bundles the diagnostics for one input together with its source,
//! so they can be rendered later (for example when a history entry is
//! displayed again) without re-reading the input.
//!
//! Rendered form, one diagnostic:
//!
//! ```text
//! ERROR: <input>:1:5: undeclared reference to 'x'
//!  | 1 + x
//!  | ....^
//! ```

use std::fmt;
use std::rc::Rc;

use crate::util::span::{SourceFile, Span};

/// A single compile or check error
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Human readable message
    pub message: String,
    /// Location, if the reporter knew one
    pub span: Option<Span>,
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            message: message.into(),
            span: span.filter(|s| !s.is_dummy()),
        }
    }

    /// Render with a source excerpt and caret marker
    pub fn to_display_string(
        &self,
        source: &SourceFile,
    ) -> String {
        let Some(span) = self.span else {
            return format!("ERROR: {}: {}", source.name, self.message);
        };

        let mut out = format!(
            "ERROR: {}:{}:{}: {}",
            source.name, span.start.line, span.start.column, self.message
        );
        if let Some(text) = source.line_text(span.start.line) {
            out.push_str("\n | ");
            out.push_str(text);
            out.push_str("\n | ");
            out.push_str(&".".repeat(span.start.column.saturating_sub(1)));
            out.push('^');
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{}: {}", span.start, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Diagnostics collected for one source input
#[derive(Debug, Clone)]
pub struct Issues {
    source: Rc<SourceFile>,
    diagnostics: Vec<Diagnostic>,
}

impl Issues {
    /// Empty issue list for `source`
    pub fn new(source: Rc<SourceFile>) -> Self {
        Self {
            source,
            diagnostics: Vec::new(),
        }
    }

    /// Record a diagnostic
    pub fn push(
        &mut self,
        diagnostic: Diagnostic,
    ) {
        self.diagnostics.push(diagnostic);
    }

    /// Whether any error was reported
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if there are no diagnostics
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in report order
    pub fn errors(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The source these diagnostics refer to
    pub fn source(&self) -> &Rc<SourceFile> {
        &self.source
    }

    /// One display string per diagnostic
    pub fn display_strings(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|d| d.to_display_string(&self.source))
            .collect()
    }
}

impl fmt::Display for Issues {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.display_strings().join("\n"))
    }
}
