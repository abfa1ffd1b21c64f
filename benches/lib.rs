//! # cel-repl 性能基准测试
//!
//! 使用 Criterion.rs 进行性能基准测试。
//!
//! ## 基准测试分组
//! - `engine`: parse, check and evaluate through [`cel_repl::Env`]
//! - `format`: the three `inspect` formats
//! - `repl`: whole lines through `Repl::submit`, history included
//!
//! ## 使用方法
//! ```bash
//! cargo bench          # 运行所有
//! cargo bench format   # 只运行 formatter 基准
//! ```

use std::hint::black_box;

use cel_repl::backends::dev::repl::{Formatter, Repl};
use cel_repl::backends::interpreter::{Activation, FunctionBindings};
use cel_repl::frontend::parser::parse_source;
use cel_repl::util::config::ReplConfig;
use cel_repl::Env;
use criterion::{criterion_group, criterion_main, Criterion};

const EXPRESSION: &str =
    "[1, 2, 3, 4, 5, 6, 7, 8].filter(x, x % 2 == 0).map(y, y * y).exists(z, z > 30) && {'a': 'abc'}.a.startsWith('ab')";

// ============================================================================
// Engine Benchmarks
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| parse_source(black_box(EXPRESSION), true).expect("parse failed"))
    });
}

fn bench_compile_and_check(c: &mut Criterion) {
    let env = Env::default();
    c.bench_function("compile_and_check", |b| {
        b.iter(|| {
            let (ast, _) = env.compile(black_box(EXPRESSION));
            env.check(&ast.expect("compile failed"))
        })
    });
}

fn bench_eval(c: &mut Criterion) {
    let env = Env::default();
    let (ast, _) = env.compile(EXPRESSION);
    let program = env
        .program(&ast.expect("compile failed"), &FunctionBindings::new())
        .expect("program failed");
    let activation = Activation::new();

    c.bench_function("eval", |b| b.iter(|| program.eval(black_box(&activation))));
}

// ============================================================================
// Formatter Benchmarks
// ============================================================================

fn bench_formats(c: &mut Criterion) {
    let expr = parse_source(EXPRESSION, true).expect("parse failed");
    let formatter = Formatter::default();

    for tag in ["raw", "structured", "tree"] {
        c.bench_function(&format!("format_{}", tag), |b| {
            b.iter(|| formatter.format_with(black_box(&expr), tag))
        });
    }
}

// ============================================================================
// REPL Benchmarks
// ============================================================================

fn bench_submit_with_inspect(c: &mut Criterion) {
    let config = ReplConfig {
        history_size: 16,
        ..ReplConfig::default()
    };

    c.bench_function("submit_with_inspect", |b| {
        b.iter(|| {
            let mut repl = Repl::new(&config, std::io::sink()).expect("repl failed");
            for _ in 0..8 {
                repl.submit(EXPRESSION).expect("submit failed");
                repl.submit("inspect('tree')").expect("submit failed");
            }
        })
    });
}

// ============================================================================
// Criterion Groups
// ============================================================================

criterion_group!(
    name = engine;
    config = Criterion::default().sample_size(50);
    targets = bench_parse, bench_compile_and_check, bench_eval
);

criterion_group!(
    name = format;
    config = Criterion::default().sample_size(50);
    targets = bench_formats
);

criterion_group!(
    name = repl;
    config = Criterion::default().sample_size(20);
    targets = bench_submit_with_inspect
);

criterion_main!(engine, format, repl);
