//! Token types

use crate::util::span::Span;

/// Lexer error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
    #[error("invalid escape sequence: {sequence}")]
    InvalidEscape { sequence: String, span: Span },
    #[error("invalid number literal: {text}")]
    InvalidNumber { text: String, span: Span },
    #[error("unexpected character: '{ch}'")]
    UnexpectedChar { ch: char, span: Span },
}

impl LexError {
    /// Location of the offending text
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::InvalidEscape { span, .. }
            | LexError::InvalidNumber { span, .. }
            | LexError::UnexpectedChar { span, .. } => *span,
        }
    }
}

/// Token kind
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    KwIn,

    // Identifiers
    Identifier(String),

    // Literals
    IntLiteral(i64),
    UintLiteral(u64),
    DoubleLiteral(f64),
    StringLiteral(String),
    BoolLiteral(bool),
    NullLiteral,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
    Question,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,

    // Special
    Eof,
}

impl TokenKind {
    /// Short description used in syntax errors
    pub fn describe(&self) -> String {
        match self {
            TokenKind::KwIn => "'in'".to_string(),
            TokenKind::Identifier(name) => format!("identifier '{}'", name),
            TokenKind::IntLiteral(n) => format!("'{}'", n),
            TokenKind::UintLiteral(n) => format!("'{}u'", n),
            TokenKind::DoubleLiteral(d) => format!("'{:?}'", d),
            TokenKind::StringLiteral(s) => format!("{:?}", s),
            TokenKind::BoolLiteral(b) => format!("'{}'", b),
            TokenKind::NullLiteral => "'null'".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("'{}'", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::Neq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Not => "!",
            TokenKind::Question => "?",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            _ => "?",
        }
    }
}

/// Token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::dummy(),
        }
    }
}
