//! Literal tests - integers, unsigned, doubles, strings

use crate::frontend::lexer::{tokenize, TokenKind};

fn single(source: &str) -> TokenKind {
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens.len(), 2, "expected one token for {source:?}");
    tokens[0].kind.clone()
}

#[test]
fn test_integers() {
    assert_eq!(single("0"), TokenKind::IntLiteral(0));
    assert_eq!(single("42"), TokenKind::IntLiteral(42));
    assert_eq!(single("0x1F"), TokenKind::IntLiteral(31));
    assert_eq!(
        single("9223372036854775807"),
        TokenKind::IntLiteral(i64::MAX)
    );
}

#[test]
fn test_unsigned() {
    assert_eq!(single("7u"), TokenKind::UintLiteral(7));
    assert_eq!(single("7U"), TokenKind::UintLiteral(7));
    assert_eq!(single("0xffu"), TokenKind::UintLiteral(255));
    assert_eq!(
        single("18446744073709551615u"),
        TokenKind::UintLiteral(u64::MAX)
    );
}

#[test]
fn test_doubles() {
    assert_eq!(single("1.5"), TokenKind::DoubleLiteral(1.5));
    assert_eq!(single("2e3"), TokenKind::DoubleLiteral(2000.0));
    assert_eq!(single("2.5e-1"), TokenKind::DoubleLiteral(0.25));
    assert_eq!(single("1E+2"), TokenKind::DoubleLiteral(100.0));
}

#[test]
fn test_int_followed_by_member() {
    let tokens = tokenize("1.size()").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::IntLiteral(1));
    assert_eq!(tokens[1].kind, TokenKind::Dot);
}

#[test]
fn test_strings() {
    assert_eq!(single("\"abc\""), TokenKind::StringLiteral("abc".into()));
    assert_eq!(single("'abc'"), TokenKind::StringLiteral("abc".into()));
    assert_eq!(single("'it\"s'"), TokenKind::StringLiteral("it\"s".into()));
}

#[test]
fn test_escapes() {
    assert_eq!(
        single(r#""a\nb\t\"c\\""#),
        TokenKind::StringLiteral("a\nb\t\"c\\".into())
    );
    assert_eq!(single(r#""\x41é""#), TokenKind::StringLiteral("Aé".into()));
}

#[test]
fn test_raw_strings() {
    assert_eq!(single(r#"r"a\nb""#), TokenKind::StringLiteral("a\\nb".into()));
    assert_eq!(single(r"R'\d+'"), TokenKind::StringLiteral("\\d+".into()));
}

#[test]
fn test_identifier_r_is_not_raw_string() {
    let tokens = tokenize("r + 1").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Identifier("r".into()));
}
