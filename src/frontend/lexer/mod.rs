//! Lexer module
//! Split into token definitions, the tokenizer state machine and literal scanning

pub mod literals;
pub mod tokenizer;
pub mod tokens;

#[cfg(test)]
mod tests;

// Re-export types
pub use tokenizer::Lexer;
pub use tokens::{LexError, Token, TokenKind};

/// Tokenize one line of expression source
///
/// The returned stream always ends with [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tracing::trace!("lexing {} bytes", source.len());

    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }

    if let Some(err) = lexer.error.take() {
        tracing::debug!("lex error: {}", err);
        return Err(err);
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: crate::util::span::Span::new(lexer.position(), lexer.position()),
    });
    tracing::trace!("lexed {} tokens", tokens.len());
    Ok(tokens)
}
