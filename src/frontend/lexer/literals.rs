//! Literal scanning: numbers and strings

use super::tokenizer::Lexer;
use crate::frontend::lexer::tokens::{LexError, Token, TokenKind};

/// Identifier start: `_` or Unicode XID_Start
pub fn is_identifier_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// Identifier continuation: Unicode XID_Continue (includes `_` and digits)
pub fn is_identifier_char(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// ASCII decimal digit
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Scan an integer, unsigned or double literal whose first digit was consumed
pub fn scan_number(
    lexer: &mut Lexer<'_>,
    first: char,
) -> Option<Token> {
    if first == '0' && matches!(lexer.peek(), Some('x') | Some('X')) {
        lexer.advance();
        return scan_hex(lexer);
    }

    let mut text = String::new();
    text.push(first);
    take_digits(lexer, &mut text);

    let mut is_double = false;

    // Fraction: only when a digit follows the dot, so `1.size()` stays a call
    if lexer.peek() == Some(&'.') && lexer.peek_next().is_some_and(is_digit) {
        is_double = true;
        lexer.advance();
        text.push('.');
        take_digits(lexer, &mut text);
    }

    if matches!(lexer.peek(), Some('e') | Some('E')) && exponent_follows(lexer) {
        is_double = true;
        text.push('e');
        lexer.advance();
        if let Some(&sign) = lexer.peek() {
            if sign == '+' || sign == '-' {
                text.push(sign);
                lexer.advance();
            }
        }
        take_digits(lexer, &mut text);
    }

    if is_double {
        return match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(lexer.make_token(TokenKind::DoubleLiteral(value))),
            _ => invalid_number(lexer, text),
        };
    }

    if eat_unsigned_suffix(lexer) {
        return match text.parse::<u64>() {
            Ok(value) => Some(lexer.make_token(TokenKind::UintLiteral(value))),
            Err(_) => invalid_number(lexer, format!("{}u", text)),
        };
    }

    match text.parse::<i64>() {
        Ok(value) => Some(lexer.make_token(TokenKind::IntLiteral(value))),
        Err(_) => invalid_number(lexer, text),
    }
}

fn scan_hex(lexer: &mut Lexer<'_>) -> Option<Token> {
    let mut digits = String::new();
    while let Some(&c) = lexer.peek() {
        if !c.is_ascii_hexdigit() {
            break;
        }
        digits.push(c);
        lexer.advance();
    }
    let unsigned = eat_unsigned_suffix(lexer);
    let text = format!("0x{}", digits);

    if digits.is_empty() {
        return invalid_number(lexer, text);
    }
    if unsigned {
        match u64::from_str_radix(&digits, 16) {
            Ok(value) => Some(lexer.make_token(TokenKind::UintLiteral(value))),
            Err(_) => invalid_number(lexer, text),
        }
    } else {
        match i64::from_str_radix(&digits, 16) {
            Ok(value) => Some(lexer.make_token(TokenKind::IntLiteral(value))),
            Err(_) => invalid_number(lexer, text),
        }
    }
}

fn take_digits(
    lexer: &mut Lexer<'_>,
    text: &mut String,
) {
    while let Some(&c) = lexer.peek() {
        if !is_digit(c) {
            break;
        }
        text.push(c);
        lexer.advance();
    }
}

/// `e` followed by digits, optionally signed
fn exponent_follows(lexer: &Lexer<'_>) -> bool {
    let mut ahead = lexer.chars_clone();
    ahead.next();
    match ahead.next() {
        Some(c) if is_digit(c) => true,
        Some('+') | Some('-') => ahead.next().is_some_and(is_digit),
        _ => false,
    }
}

fn eat_unsigned_suffix(lexer: &mut Lexer<'_>) -> bool {
    if matches!(lexer.peek(), Some('u') | Some('U')) {
        lexer.advance();
        true
    } else {
        false
    }
}

fn invalid_number(
    lexer: &mut Lexer<'_>,
    text: String,
) -> Option<Token> {
    let span = lexer.span();
    lexer.fail(LexError::InvalidNumber { text, span })
}

/// Scan a string literal whose opening quote was consumed
pub fn scan_string(
    lexer: &mut Lexer<'_>,
    quote: char,
    raw: bool,
) -> Option<Token> {
    let mut value = String::new();

    loop {
        match lexer.advance() {
            None | Some('\n') => {
                let span = lexer.span();
                return lexer.fail(LexError::UnterminatedString { span });
            }
            Some(c) if c == quote => break,
            Some('\\') if !raw => {
                let escaped = scan_escape(lexer)?;
                value.push(escaped);
            }
            Some(c) => value.push(c),
        }
    }

    Some(lexer.make_token(TokenKind::StringLiteral(value)))
}

fn scan_escape(lexer: &mut Lexer<'_>) -> Option<char> {
    let c = match lexer.advance() {
        Some(c) => c,
        None => {
            let span = lexer.span();
            lexer.fail(LexError::UnterminatedString { span });
            return None;
        }
    };

    let simple = match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'f' => Some('\x0c'),
        'v' => Some('\x0b'),
        '\\' | '"' | '\'' | '`' | '?' => Some(c),
        _ => None,
    };
    if simple.is_some() {
        return simple;
    }

    let width = match c {
        'x' => 2,
        'u' => 4,
        'U' => 8,
        _ => {
            let span = lexer.span();
            lexer.fail(LexError::InvalidEscape {
                sequence: format!("\\{}", c),
                span,
            });
            return None;
        }
    };

    let mut digits = String::new();
    for _ in 0..width {
        match lexer.peek() {
            Some(&d) if d.is_ascii_hexdigit() => {
                digits.push(d);
                lexer.advance();
            }
            _ => break,
        }
    }

    let decoded = if digits.len() == width {
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
    } else {
        None
    };

    if decoded.is_none() {
        let span = lexer.span();
        lexer.fail(LexError::InvalidEscape {
            sequence: format!("\\{}{}", c, digits),
            span,
        });
    }
    decoded
}
