//! Engine tests, driving `submit` with a buffer writer

use super::{repl_with, transcript, transcript_with};
use crate::backends::dev::repl::line::{LineSource, ReaderSource};
use crate::backends::dev::repl::{Step, FAREWELL};
use crate::util::config::ReplConfig;

#[test]
fn test_result_printed_after_prompt() {
    assert_eq!(transcript(&["1 + 1"]), "(2)> 2\n");
    assert_eq!(transcript(&["'a' + 'b'", "['x', 1]"]), "(2)> ab\n(3)> [\"x\", 1]\n");
}

#[test]
fn test_prompt_counts_entries() {
    let mut repl = repl_with(ReplConfig::default());
    assert_eq!(repl.prompt(), "(1)> ");
    repl.submit("1").unwrap();
    repl.submit("1 +").unwrap();
    assert_eq!(repl.prompt(), "(3)> ");
}

#[test]
fn test_blank_lines_are_ignored() {
    let mut repl = repl_with(ReplConfig::default());
    assert_eq!(repl.submit("   \n").unwrap(), Step::Continue);
    assert_eq!(repl.submit("").unwrap(), Step::Continue);
    assert_eq!(repl.session().position(), 0);
    assert!(repl.output().is_empty());
}

#[test]
fn test_syntax_error_then_inspect() {
    assert_eq!(
        transcript(&["1 +", "inspect()"]),
        "(2)> ERROR: <input>:1:4: Syntax error: unexpected end of input\n | 1 +\n | ...^\n\
         (3)> that's not numberwang\n"
    );
}

#[test]
fn test_first_line_has_no_history() {
    assert_eq!(transcript(&["inspect_int(1)"]), "(2)> No history to inspect\n");
    assert_eq!(transcript(&["inspect()"]), "(2)> No history to inspect\n");
}

#[test]
fn test_inspect_renders_previous_line() {
    assert_eq!(transcript(&["a.b  +  1", "inspect()"]).lines().last(), Some("(3)> a.b + 1"));
    assert_eq!(
        transcript(&["[1, 2].map(x, x * 2)", "inspect('go')"]).lines().last(),
        Some("(3)> [1, 2].map(x, x * 2)")
    );
}

#[test]
fn test_check_error_entry_is_still_inspectable() {
    let out = transcript(&["f(1, 2)", "inspect('tree')"]);
    assert_eq!(
        out,
        "(2)> ERROR: <input>:1:1: undeclared reference to 'f'\n | f(1, 2)\n | ^\n\
         (3)> (call: f)\n\t(const<int64>: 1)\n\t(const<int64>: 2)\n"
    );
}

#[test]
fn test_mismatched_operands_report_check_error() {
    let out = transcript(&["1 + \"a\"", "inspect()"]);
    assert!(out.starts_with(
        "(2)> ERROR: <input>:1:1: found no matching overload for '_+_' applied to '(int, string)'"
    ));
    assert!(out.ends_with("(3)> 1 + \"a\"\n"));
}

#[test]
fn test_inspect_by_position_and_format() {
    let out = transcript(&["x", "y", "inspect(1, 'pretty')", "inspect_int(2)", "inspect_int(2, 'raw')"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "(2)> ERROR: <input>:1:1: undeclared reference to 'x'",
            " | x",
            " | ^",
            "(3)> ERROR: <input>:1:1: undeclared reference to 'y'",
            " | y",
            " | ^",
            "(4)> (ident: x)",
            "(5)> y",
            "(6)> y",
        ]
    );
}

#[test]
fn test_inspect_unknown_format() {
    let out = transcript(&["1", "inspect('xml')"]);
    assert!(out.ends_with("(3)> unrecognized output format xml\n"));
}

#[test]
fn test_inspect_structured_uses_configured_indent() {
    let config = ReplConfig {
        format_indent: 1,
        ..ReplConfig::default()
    };
    let out = transcript_with(config, &["true", "inspect('json')"]);
    assert!(out.ends_with(
        "(3)> {\n \"constExpr\": {\n  \"boolValue\": true\n },\n \"id\": 1\n}\n"
    ));
}

#[test]
fn test_inspect_inside_larger_expression() {
    let out = transcript(&["a", "size(inspect()) + 1", "inspect(2) == 'size(inspect()) + 1'"]);
    assert!(out.ends_with("(3)> 2\n(4)> true\n"));
}

#[test]
fn test_history_wraps_around() {
    let config = ReplConfig {
        history_size: 2,
        ..ReplConfig::default()
    };
    let out = transcript_with(config, &["1", "2", "inspect(1)", "inspect(2)"]);
    let lines: Vec<&str> = out.lines().collect();
    // line 1 was overwritten by line 3
    assert_eq!(lines[2], "(4)> No history to inspect");
    // line 2 was overwritten by line 4 itself
    assert_eq!(lines[3], "(5)> No history to inspect");
}

#[test]
fn test_runtime_errors_are_printed() {
    assert_eq!(transcript(&["1 / 0"]), "(2)> division by zero\n");
    assert_eq!(transcript(&["[1][3]"]), "(2)> index out of range: 3\n");
    assert_eq!(
        transcript(&["9223372036854775807 + 1", "2"]),
        "(2)> integer overflow\n(3)> 2\n"
    );
}

#[test]
fn test_quit_terminates() {
    let mut repl = repl_with(ReplConfig::default());
    assert_eq!(repl.submit("quit()").unwrap(), Step::Terminated);
    assert_eq!(String::from_utf8(repl.into_output()).unwrap(), format!("{}\n", FAREWELL));
}

#[test]
fn test_quit_inside_expression() {
    let out = transcript(&["1 == 1 && quit() == null", "2"]);
    assert_eq!(out, format!("{}\n", FAREWELL));
}

#[test]
fn test_quit_with_arguments_fails_check() {
    let out = transcript(&["quit(1)"]);
    assert!(out.starts_with("(2)> ERROR: <input>:1:1: found no matching overload for 'quit'"));
}

#[test]
fn test_check_disabled() {
    let config = ReplConfig {
        check: false,
        ..ReplConfig::default()
    };
    assert_eq!(
        transcript_with(config.clone(), &["1 + 'a'"]),
        "(2)> no matching overload for '_+_' applied to '(int, string)'\n"
    );
    assert_eq!(
        transcript_with(config, &["x"]),
        "(2)> no such attribute: x\n"
    );
}

#[test]
fn test_macros_disabled() {
    let config = ReplConfig {
        check: false,
        macros: false,
        ..ReplConfig::default()
    };
    assert_eq!(
        transcript_with(config, &["[1].all(x, x > 0)"]),
        "(2)> no implementation for function 'all'\n"
    );
    assert_eq!(transcript(&["[1].all(x, x > 0)"]), "(2)> true\n");
}

#[test]
fn test_custom_prompt() {
    let config = ReplConfig {
        prompt: "cel> ".to_string(),
        ..ReplConfig::default()
    };
    assert_eq!(transcript_with(config, &["3u"]), "(2)cel> 3u\n");
}

#[test]
fn test_banner() {
    let mut repl = repl_with(ReplConfig::default());
    repl.banner().unwrap();
    assert_eq!(
        String::from_utf8(repl.into_output()).unwrap(),
        format!("cel-repl {} started\ntype quit() to exit\n", crate::VERSION)
    );
}

#[test]
fn test_run_until_end_of_input() {
    let mut repl = repl_with(ReplConfig::default());
    let mut source = ReaderSource::new("1 + 2\n\ninspect()\n".as_bytes(), Vec::new());
    repl.run(&mut source).unwrap();
    assert_eq!(
        String::from_utf8(source.into_output()).unwrap(),
        "(1)> (2)> (2)> (3)> "
    );
    assert_eq!(
        String::from_utf8(repl.into_output()).unwrap(),
        "(2)> 3\n(3)> 1 + 2\n"
    );
}

#[test]
fn test_run_stops_at_quit() {
    let mut repl = repl_with(ReplConfig::default());
    let mut source = ReaderSource::new("quit()\n1\n".as_bytes(), Vec::new());
    repl.run(&mut source).unwrap();
    assert_eq!(repl.session().position(), 1);
}

#[test]
fn test_long_chain_is_a_syntax_error() {
    let mut repl = repl_with(ReplConfig::default());
    let long = vec!["1"; 20_000].join(" + ");
    assert_eq!(repl.submit(&long).unwrap(), Step::Continue);
    assert_eq!(repl.submit("1 + 1").unwrap(), Step::Continue);
    assert_eq!(repl.submit("inspect(1)").unwrap(), Step::Continue);

    let out = String::from_utf8(repl.into_output()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("(2)> ERROR: <input>:1:"));
    assert!(lines[0].contains("Syntax error: expression nested more than"));
    assert!(out.contains("\n(3)> 2\n"));
    assert!(out.ends_with("(4)> that's not numberwang\n"));
}

/// Replays canned reads, `None` entries standing for end of input
struct Scripted(std::vec::IntoIter<Option<String>>);

impl LineSource for Scripted {
    fn read_line(
        &mut self,
        _prompt: &str,
    ) -> std::io::Result<Option<String>> {
        Ok(self.0.next().flatten())
    }
}

#[test]
fn test_interrupted_read_is_skipped() {
    let reads = vec![Some("1".to_string()), Some(String::new()), Some("inspect()".to_string()), None];
    let mut repl = repl_with(ReplConfig::default());
    repl.run(&mut Scripted(reads.into_iter())).unwrap();
    assert_eq!(repl.session().position(), 2);
    assert_eq!(String::from_utf8(repl.into_output()).unwrap(), "(2)> 1\n(3)> 1\n");
}
