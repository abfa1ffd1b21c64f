//! Lexer tests module
//!
//! - basic: identifiers, keywords, whitespace, comments
//! - literals: numbers and strings
//! - operators: operators and delimiters
//! - errors: lexer error reporting

mod literals;
