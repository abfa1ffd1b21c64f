//! REPL integration tests
//!
//! Drives the loop the way the binary does, through a line source.

use cel_repl::backends::dev::repl::ReaderSource;
use cel_repl::util::config::ReplConfig;
use cel_repl::{Repl, Step};

/// Run `input` through a fresh REPL; returns (prompts, results)
fn session(
    config: &ReplConfig,
    input: &str,
) -> (String, String) {
    let mut repl = Repl::new(config, Vec::new()).unwrap();
    let mut source = ReaderSource::new(input.as_bytes(), Vec::new());
    repl.run(&mut source).unwrap();
    (
        String::from_utf8(source.into_output()).unwrap(),
        String::from_utf8(repl.into_output()).unwrap(),
    )
}

#[test]
fn test_piped_session() {
    let (prompts, results) = session(
        &ReplConfig::default(),
        "1 + 2 * 3\n[1, 2, 3].map(x, x * x)\n{'k': 'v'}.k\nsize('héllo')\n",
    );
    assert_eq!(prompts, "(1)> (2)> (3)> (4)> (5)> ");
    assert_eq!(results, "(2)> 7\n(3)> [1, 4, 9]\n(4)> v\n(5)> 5\n");
}

#[test]
fn test_errors_do_not_stop_the_loop() {
    let (_, results) = session(&ReplConfig::default(), "1 +\nx\n1 / 0\n'ok'\n");
    let lines: Vec<&str> = results.lines().collect();
    assert_eq!(lines[0], "(2)> ERROR: <input>:1:4: Syntax error: unexpected end of input");
    assert_eq!(lines[3], "(3)> ERROR: <input>:1:1: undeclared reference to 'x'");
    assert_eq!(lines[6], "(4)> division by zero");
    assert_eq!(lines[7], "(5)> ok");
}

#[test]
fn test_quit_ends_session_early() {
    let (prompts, results) = session(&ReplConfig::default(), "1\nquit()\n2\n");
    assert_eq!(prompts, "(1)> (2)> ");
    assert_eq!(results, "(2)> 1\nSo long, and thanks for all the fish!\n");
}

#[test]
fn test_missing_trailing_newline() {
    let (_, results) = session(&ReplConfig::default(), "true || false");
    assert_eq!(results, "(2)> true\n");
}

#[test]
fn test_crlf_input() {
    let (_, results) = session(&ReplConfig::default(), "'a'\r\ninspect()\r\n");
    assert_eq!(results, "(2)> a\n(3)> \"a\"\n");
}

#[test]
fn test_submit_reports_steps() {
    let mut repl = Repl::new(&ReplConfig::default(), Vec::new()).unwrap();
    assert_eq!(repl.submit("1").unwrap(), Step::Continue);
    assert_eq!(repl.submit("quit()").unwrap(), Step::Terminated);
}

#[test]
fn test_zero_history_size_rejected() {
    let config = ReplConfig {
        history_size: 0,
        ..ReplConfig::default()
    };
    let err = Repl::new(&config, Vec::new()).err().unwrap();
    assert_eq!(err.to_string(), "history capacity must be positive, got 0");
}
