//! Introspection integration tests
//!
//! `inspect` and `inspect_int` seen from the expression language.

use cel_repl::util::config::ReplConfig;
use cel_repl::Repl;

/// Submit each line and return the text printed for the last one
fn last_result(
    config: &ReplConfig,
    lines: &[&str],
) -> String {
    let mut repl = Repl::new(config, Vec::new()).unwrap();
    let mut printed = 0;
    for line in lines {
        printed = repl.output().len();
        repl.submit(line).unwrap();
    }
    let out = repl.into_output();
    String::from_utf8(out[printed..].to_vec()).unwrap()
}

fn inspect_after(
    previous: &str,
    call: &str,
) -> String {
    last_result(&ReplConfig::default(), &[previous, call])
}

#[test]
fn test_inspect_raw_round_trips() {
    assert_eq!(inspect_after("1+2*(3-4)", "inspect()"), "(3)> 1 + 2 * (3 - 4)\n");
    assert_eq!(inspect_after("-(1)", "inspect()"), "(3)> -1\n");
    assert_eq!(
        inspect_after("has({'a': 1}.a) ? 'x' : 'y'", "inspect('raw')"),
        "(3)> has({\"a\": 1}.a) ? \"x\" : \"y\"\n"
    );
}

#[test]
fn test_inspect_tree_of_call() {
    assert_eq!(
        inspect_after("f(1, 2)", "inspect('tree')"),
        "(3)> (call: f)\n\t(const<int64>: 1)\n\t(const<int64>: 2)\n"
    );
    assert_eq!(
        inspect_after("a.b.c", "inspect('pretty')"),
        "(3)> (ident: a).b.c\n"
    );
}

#[test]
fn test_inspect_structured() {
    assert_eq!(
        inspect_after("x", "inspect('structured')"),
        "(3)> {\n  \"id\": 1,\n  \"identExpr\": {\n    \"name\": \"x\"\n  }\n}\n"
    );
}

#[test]
fn test_inspect_failed_line() {
    assert_eq!(inspect_after("[1, 2", "inspect()"), "(3)> that's not numberwang\n");
    assert_eq!(inspect_after("'open", "inspect('tree')"), "(3)> that's not numberwang\n");
}

#[test]
fn test_inspect_empty_history() {
    assert_eq!(
        last_result(&ReplConfig::default(), &["inspect_int(1)"]),
        "(2)> No history to inspect\n"
    );
    assert_eq!(
        last_result(&ReplConfig::default(), &["inspect(1, 'tree')"]),
        "(2)> No history to inspect\n"
    );
}

#[test]
fn test_inspect_can_look_at_itself_once_done() {
    assert_eq!(
        last_result(&ReplConfig::default(), &["inspect()", "inspect()"]),
        "(3)> inspect()\n"
    );
}

#[test]
fn test_blank_lines_do_not_shift_history() {
    assert_eq!(
        last_result(&ReplConfig::default(), &["1", "  ", "", "inspect(1)"]),
        "(3)> 1\n"
    );
}

#[test]
fn test_inspect_wrong_argument_types() {
    let out = last_result(&ReplConfig::default(), &["inspect(true)"]);
    assert!(out.starts_with("(2)> ERROR: <input>:1:1: found no matching overload for 'inspect' applied to '(bool)'"));

    let config = ReplConfig {
        check: false,
        ..ReplConfig::default()
    };
    assert_eq!(
        last_result(&config, &["inspect(true)"]),
        "(2)> no matching overload for 'inspect' applied to '(bool)'\n"
    );
    assert_eq!(
        last_result(&config, &["inspect_int('x')"]),
        "(2)> no matching overload for 'inspect_int' applied to '(string)'\n"
    );
}
