//! Syntax error reporting tests

use crate::frontend::parser::{parse_source, ParseError, MAX_DEPTH};

fn parse_err(source: &str) -> ParseError {
    match parse_source(source, true) {
        Ok(expr) => panic!("expected {:?} to fail, parsed {}", source, expr),
        Err(e) => e,
    }
}

#[test]
fn test_empty_input() {
    let err = parse_err("");
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    assert_eq!(err.to_string(), "Syntax error: unexpected end of input");
}

#[test]
fn test_missing_closing_paren() {
    let err = parse_err("f(1, 2");
    assert_eq!(
        err.to_string(),
        "Syntax error: expected ')', found end of input"
    );
}

#[test]
fn test_trailing_tokens() {
    let err = parse_err("1 2");
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    assert_eq!(err.span().start.column, 3);
}

#[test]
fn test_dangling_operator() {
    let err = parse_err("1 +");
    assert!(err.to_string().starts_with("Syntax error:"));
}

#[test]
fn test_missing_colon_in_conditional() {
    let err = parse_err("a ? b");
    assert!(matches!(err, ParseError::ExpectedToken { .. }));
}

#[test]
fn test_field_name_required() {
    let err = parse_err("a.1");
    assert!(err.to_string().contains("expected field name"));
}

#[test]
fn test_lex_error_is_reported() {
    let err = parse_err("'open");
    assert_eq!(err.to_string(), "Syntax error: unterminated string literal");
}

#[test]
fn test_nesting_limit() {
    // parenthesised nesting recurses once per level; give debug builds room
    let handle = std::thread::Builder::new()
        .stack_size(16 * 1024 * 1024)
        .spawn(|| {
            let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 10), ")".repeat(MAX_DEPTH + 10));
            let err = parse_err(&deep);
            assert!(err.to_string().contains("nested"));

            let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
            assert!(parse_source(&shallow, true).is_ok());
        })
        .unwrap();
    handle.join().unwrap();
}

#[test]
fn test_operator_chain_counts_towards_nesting() {
    let long = vec!["1"; MAX_DEPTH + 10].join(" + ");
    assert!(parse_err(&long).to_string().contains("nested more than"));

    let mixed = vec!["a"; MAX_DEPTH + 10].join(" && x * ");
    assert!(parse_err(&mixed).to_string().contains("nested more than"));

    let short = vec!["1"; MAX_DEPTH / 2].join(" + ");
    assert!(parse_source(&short, true).is_ok());
}

#[test]
fn test_member_chain_counts_towards_nesting() {
    let fields = format!("a{}", ".b".repeat(MAX_DEPTH + 10));
    assert!(parse_err(&fields).to_string().contains("nested more than"));

    let indexes = format!("a{}", "[0]".repeat(MAX_DEPTH + 10));
    assert!(parse_err(&indexes).to_string().contains("nested more than"));

    let short = format!("a{}", ".b[0]".repeat(MAX_DEPTH / 4));
    assert!(parse_source(&short, true).is_ok());
}

#[test]
fn test_very_long_chain_fails_cleanly() {
    let huge = vec!["1"; 100_000].join(" + ");
    assert!(parse_err(&huge).to_string().contains("nested more than"));
}
