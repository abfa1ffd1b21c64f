//! Expression engine integration tests

use cel_repl::backends::interpreter::{Activation, FunctionBindings, Value};
use cel_repl::backends::EvalError;
use cel_repl::frontend::typecheck::{FunctionDecl, Type};
use cel_repl::{eval, Env};

#[test]
fn test_eval_helper() {
    assert_eq!(eval("[1, 2, 3].all(x, x > 0)").unwrap(), Value::Bool(true));
    assert_eq!(eval("{'a': [1, 2]}['a'][1]").unwrap(), Value::Int(2));
    assert_eq!(eval("0x10 + 1").unwrap(), Value::Int(17));
    assert_eq!(eval("r'\\d' + \"\\n\"").unwrap(), Value::from("\\d\n"));
    assert_eq!(eval("'abc'.endsWith('c') ? 1u : 2u").unwrap(), Value::Uint(1));
}

#[test]
fn test_custom_function() {
    let mut env = Env::default();
    env.declare(FunctionDecl::new("twice").global("twice_int", vec![Type::Int], Type::Int))
        .unwrap();

    let mut bindings = FunctionBindings::new();
    bindings.register("twice", |args| match args {
        [Value::Int(n)] => n
            .checked_mul(2)
            .map(Value::Int)
            .ok_or(EvalError::Overflow("integer")),
        _ => Err(EvalError::Message("twice expects an int".to_string())),
    });

    let (ast, issues) = env.compile("twice(21)");
    assert!(issues.is_empty());
    let (checked, issues) = env.check(&ast.unwrap());
    assert!(issues.is_empty());
    let program = env.program(&checked.unwrap(), &bindings).unwrap();
    assert_eq!(program.eval(&Activation::new()), Ok(Value::Int(42)));
}

#[test]
fn test_unparse_round_trip() {
    let env = Env::default();
    for source in [
        "a ? b : c ? d : e",
        "(a ? b : c) ? d : e",
        "-(-1)",
        "!!true",
        "1 - (2 - 3)",
        "[[1], {}][0]",
        "'\\u00e9\\t'.size()",
        "m.filter(k, k in ['a', 'b']).exists_one(v, v == 'a')",
    ] {
        let (ast, issues) = env.compile(source);
        assert!(issues.is_empty(), "{}", source);
        let ast = ast.unwrap();
        let printed = ast.expr().to_string();
        let (again, issues) = env.compile(&printed);
        assert!(issues.is_empty(), "{}", printed);
        assert_eq!(again.unwrap().expr(), ast.expr(), "{}", printed);
    }
}
