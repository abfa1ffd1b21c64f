//! Parser state and error handling

use crate::frontend::lexer::tokens::*;
use crate::frontend::parser::ast::{Expr, ExprId, ExprKind};
use crate::util::span::Span;

/// Maximum nesting of sub-expressions before parsing gives up
///
/// Operator and member chains count one level per link, so this also bounds
/// the height of every tree the parser returns.
pub const MAX_DEPTH: usize = 100;

/// Parse error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Expected a specific token
    #[error("Syntax error: expected {}, found {}", .expected.describe(), .found.describe())]
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },
    /// Unexpected token encountered
    #[error("Syntax error: unexpected {}", .found.describe())]
    UnexpectedToken { found: TokenKind, span: Span },
    /// Generic parse error with message
    #[error("Syntax error: {message}")]
    Message { message: String, span: Span },
}

impl ParseError {
    /// Build a message error at `span`
    pub fn message(
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        ParseError::Message {
            message: message.into(),
            span,
        }
    }

    /// Location of the error
    pub fn span(&self) -> Span {
        match self {
            ParseError::ExpectedToken { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::Message { span, .. } => *span,
        }
    }
}

/// Parser state for Pratt parsing
pub struct ParserState<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<ParseError>,
    next_id: ExprId,
    macros: bool,
    depth: usize,
}

impl<'a> ParserState<'a> {
    pub fn new(
        tokens: &'a [Token],
        macros: bool,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            next_id: 1,
            macros,
            depth: 0,
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
            || matches!(self.current().map(|t| &t.kind), Some(TokenKind::Eof))
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current()
            .map(|t| t.kind.clone())
            .unwrap_or(TokenKind::Eof)
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    pub fn span(&self) -> Span {
        self.current()
            .map(|t| t.span)
            .or_else(|| self.tokens.last().map(|t| t.span))
            .unwrap_or(Span::dummy())
    }

    /// Span of the most recently consumed token
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
            .unwrap_or(Span::dummy())
    }

    pub fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        if let Some(current) = self.current() {
            &current.kind == kind
        } else {
            false
        }
    }

    pub fn skip(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or record an [`ParseError::ExpectedToken`]
    pub fn expect(
        &mut self,
        kind: &TokenKind,
    ) -> Option<Token> {
        if self.at(kind) {
            self.bump()
        } else {
            self.error(ParseError::ExpectedToken {
                expected: kind.clone(),
                found: self.current_kind(),
                span: self.span(),
            });
            None
        }
    }

    /// Record an error for the current token
    pub fn unexpected(&mut self) {
        self.error(ParseError::UnexpectedToken {
            found: self.current_kind(),
            span: self.span(),
        });
    }

    pub fn error(
        &mut self,
        error: ParseError,
    ) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    pub fn macros_enabled(&self) -> bool {
        self.macros
    }

    /// Allocate a fresh node
    pub fn node(
        &mut self,
        kind: ExprKind,
        span: Span,
    ) -> Expr {
        let id = self.next_id;
        self.next_id += 1;
        Expr::new(id, kind, span)
    }

    /// Enter a nested sub-expression; false once the nesting limit is hit
    pub fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            let span = self.span();
            self.error(ParseError::message(
                format!("expression nested more than {} levels deep", MAX_DEPTH),
                span,
            ));
            return false;
        }
        self.depth += 1;
        true
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Drop back to a depth saved with [`ParserState::depth`]
    pub fn restore_depth(
        &mut self,
        depth: usize,
    ) {
        self.depth = depth;
    }
}
