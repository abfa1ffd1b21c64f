//! Tokenizer implementation
//! Main lexer structure and token generation logic

use super::literals::{is_digit, is_identifier_char, is_identifier_start, scan_number, scan_string};
use crate::frontend::lexer::tokens::*;
use crate::util::span::{Position, Span};
use std::iter::Peekable;
use std::str::Chars;

/// Main lexer structure
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    pub error: Option<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            start_offset: 0,
            start_line: 1,
            start_column: 1,
            error: None,
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    /// Get start position of current token
    pub fn start_position(&self) -> Position {
        Position::with_offset(self.start_line, self.start_column, self.start_offset)
    }

    /// Get span of current token
    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// Advance to next character
    pub fn advance(&mut self) -> Option<char> {
        match self.chars.next() {
            Some('\n') => {
                self.offset += 1;
                self.line += 1;
                self.column = 1;
                Some('\n')
            }
            Some(c) => {
                self.offset += c.len_utf8();
                self.column += 1;
                Some(c)
            }
            None => None,
        }
    }

    /// Peek at next character
    pub fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Peek at character after next
    pub fn peek_next(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    /// Get a clone of chars for lookahead operations
    pub fn chars_clone(&self) -> Peekable<Chars<'a>> {
        self.chars.clone()
    }

    /// Record an error; tokenizing stops at the first one
    pub fn fail(
        &mut self,
        error: LexError,
    ) -> Option<Token> {
        self.error = Some(error);
        None
    }

    /// Build a token spanning from the token start to the current position
    pub fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token {
        Token {
            kind,
            span: self.span(),
        }
    }

    /// Skip whitespace and `//` comments
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' | '\x0c' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(&c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Generate next token; `None` at end of input or after an error
    pub fn next_token(&mut self) -> Option<Token> {
        if self.error.is_some() {
            return None;
        }

        self.skip_whitespace_and_comments();

        // Check if at end of input
        self.peek()?;

        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;

        let c = self.advance()?;

        match c {
            'r' | 'R' if matches!(self.peek(), Some('"') | Some('\'')) => {
                let quote = self.advance()?;
                scan_string(self, quote, true)
            }
            c if is_identifier_start(c) => self.scan_identifier(c),
            c if is_digit(c) => scan_number(self, c),
            '"' | '\'' => scan_string(self, c, false),
            '+' => Some(self.make_token(TokenKind::Plus)),
            '-' => Some(self.make_token(TokenKind::Minus)),
            '*' => Some(self.make_token(TokenKind::Star)),
            '/' => Some(self.make_token(TokenKind::Slash)),
            '%' => Some(self.make_token(TokenKind::Percent)),
            '?' => Some(self.make_token(TokenKind::Question)),
            ':' => Some(self.make_token(TokenKind::Colon)),
            '.' => Some(self.make_token(TokenKind::Dot)),
            ',' => Some(self.make_token(TokenKind::Comma)),
            '(' => Some(self.make_token(TokenKind::LParen)),
            ')' => Some(self.make_token(TokenKind::RParen)),
            '[' => Some(self.make_token(TokenKind::LBracket)),
            ']' => Some(self.make_token(TokenKind::RBracket)),
            '{' => Some(self.make_token(TokenKind::LBrace)),
            '}' => Some(self.make_token(TokenKind::RBrace)),
            '=' if self.peek() == Some(&'=') => {
                self.advance();
                Some(self.make_token(TokenKind::EqEq))
            }
            '!' => {
                if self.peek() == Some(&'=') {
                    self.advance();
                    Some(self.make_token(TokenKind::Neq))
                } else {
                    Some(self.make_token(TokenKind::Not))
                }
            }
            '<' => {
                if self.peek() == Some(&'=') {
                    self.advance();
                    Some(self.make_token(TokenKind::Le))
                } else {
                    Some(self.make_token(TokenKind::Lt))
                }
            }
            '>' => {
                if self.peek() == Some(&'=') {
                    self.advance();
                    Some(self.make_token(TokenKind::Ge))
                } else {
                    Some(self.make_token(TokenKind::Gt))
                }
            }
            '&' if self.peek() == Some(&'&') => {
                self.advance();
                Some(self.make_token(TokenKind::And))
            }
            '|' if self.peek() == Some(&'|') => {
                self.advance();
                Some(self.make_token(TokenKind::Or))
            }
            ch => {
                let span = self.span();
                self.fail(LexError::UnexpectedChar { ch, span })
            }
        }
    }

    /// Scan an identifier or keyword
    fn scan_identifier(
        &mut self,
        first: char,
    ) -> Option<Token> {
        let mut name = String::new();
        name.push(first);
        while let Some(&c) = self.peek() {
            if !is_identifier_char(c) {
                break;
            }
            name.push(c);
            self.advance();
        }

        let kind = match name.as_str() {
            "true" => TokenKind::BoolLiteral(true),
            "false" => TokenKind::BoolLiteral(false),
            "null" => TokenKind::NullLiteral,
            "in" => TokenKind::KwIn,
            _ => TokenKind::Identifier(name),
        };
        Some(self.make_token(kind))
    }
}
