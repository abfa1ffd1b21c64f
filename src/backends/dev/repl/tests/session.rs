//! Session lookup tests

use crate::backends::dev::repl::format::{Formatter, OutputFormat};
use crate::backends::dev::repl::history::HistoryEntry;
use crate::backends::dev::repl::session::{Session, FAILED_ENTRY, NO_HISTORY};
use crate::frontend::Env;

fn record(
    session: &Session,
    env: &Env,
    line: &str,
) {
    let (ast, issues) = env.compile(line);
    session.record(HistoryEntry::new(line, ast, issues));
}

fn session_with(
    capacity: usize,
    lines: &[&str],
) -> Session {
    let env = Env::default();
    let session = Session::new(capacity, Formatter::default()).unwrap();
    for line in lines {
        record(&session, &env, line);
    }
    session
}

#[test]
fn test_previous_skips_in_flight_entry() {
    // "inspect()" itself is the in-flight entry
    let session = session_with(10, &["a.b", "inspect()"]);
    assert_eq!(session.position(), 2);
    assert_eq!(session.inspect_previous(&OutputFormat::Raw), "a.b");
}

#[test]
fn test_nothing_before_first_line() {
    let session = session_with(10, &["inspect()"]);
    assert_eq!(session.inspect_previous(&OutputFormat::Raw), NO_HISTORY);
    // line 1 is the one being evaluated
    assert_eq!(session.inspect_at(1, &OutputFormat::Raw), NO_HISTORY);
    assert_eq!(session.inspect_at(0, &OutputFormat::Raw), NO_HISTORY);
    assert_eq!(session.inspect_at(-3, &OutputFormat::Raw), NO_HISTORY);
    assert_eq!(session.inspect_at(i64::MIN, &OutputFormat::Raw), NO_HISTORY);
}

#[test]
fn test_failed_entry() {
    let session = session_with(10, &["1 +", "inspect()"]);
    assert_eq!(session.inspect_previous(&OutputFormat::Tree), FAILED_ENTRY);
}

#[test]
fn test_inspect_at_is_one_based() {
    let session = session_with(10, &["x", "y", "z", "inspect(2)"]);
    assert_eq!(session.inspect_at(1, &OutputFormat::Tree), "(ident: x)");
    assert_eq!(session.inspect_at(2, &OutputFormat::Raw), "y");
    assert_eq!(session.inspect_at(3, &OutputFormat::Raw), "z");
    assert_eq!(session.inspect_at(4, &OutputFormat::Raw), NO_HISTORY);
    assert_eq!(session.inspect_at(99, &OutputFormat::Raw), NO_HISTORY);
}

#[test]
fn test_overwritten_entries_are_gone() {
    let session = session_with(2, &["x", "y", "z", "inspect(1)"]);
    assert_eq!(session.inspect_at(1, &OutputFormat::Raw), NO_HISTORY);
    assert_eq!(session.inspect_at(2, &OutputFormat::Raw), NO_HISTORY);
    assert_eq!(session.inspect_at(3, &OutputFormat::Raw), "z");
    assert_eq!(session.inspect_previous(&OutputFormat::Raw), "z");
}

#[test]
fn test_clones_share_history() {
    let env = Env::default();
    let session = Session::new(5, Formatter::default()).unwrap();
    let handle = session.clone();
    record(&session, &env, "1");
    record(&session, &env, "inspect()");
    assert_eq!(handle.position(), 2);
    assert_eq!(handle.inspect_previous(&OutputFormat::Raw), "1");
}

#[test]
fn test_unrecognized_format_still_resolves_entry() {
    let session = session_with(10, &["x", "inspect('xml')"]);
    assert_eq!(
        session.inspect_previous(&OutputFormat::from_tag("xml")),
        "unrecognized output format xml"
    );
}
