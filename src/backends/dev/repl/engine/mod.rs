//! REPL engine
//!
//! Drives one line through the pipeline:
//!
//! ```text
//! line ──► compile ──► record entry ──► check ──► program ──► eval ──► print
//!              │                          │          │          │
//!              └──── diagnostics ◄────────┘          └─ error ◄─┘
//! ```
//!
//! The entry is recorded right after `compile`, whatever the outcome, so the
//! next line can always `inspect()` it. Blank lines are dropped before that.

use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::backends::dev::repl::format::Formatter;
use crate::backends::dev::repl::history::{HistoryEntry, HistoryError};
use crate::backends::dev::repl::introspect;
use crate::backends::dev::repl::line::LineSource;
use crate::backends::dev::repl::session::Session;
use crate::backends::interpreter::{Activation, FunctionBindings, Value};
use crate::backends::EvalError;
use crate::frontend::{Env, EnvError, EnvOptions};
use crate::util::config::ReplConfig;
use crate::util::diagnostic::Issues;

/// Printed when `quit()` is evaluated
pub const FAREWELL: &str = "So long, and thanks for all the fish!";

/// Fatal REPL errors; anything a single line can cause is printed instead
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("failed to register introspection functions: {0}")]
    Env(#[from] EnvError),
}

/// What the loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Terminated,
}

/// Read-eval-print loop writing to `W`
pub struct Repl<W: Write = io::Stdout> {
    env: Env,
    session: Session,
    bindings: FunctionBindings,
    check: bool,
    prompt: String,
    out: W,
}

impl Repl<io::Stdout> {
    /// REPL printing to stdout
    pub fn stdout(config: &ReplConfig) -> Result<Self, ReplError> {
        Self::new(config, io::stdout())
    }
}

impl<W: Write> Repl<W> {
    pub fn new(
        config: &ReplConfig,
        out: W,
    ) -> Result<Self, ReplError> {
        let mut env = Env::new(EnvOptions {
            macros: config.macros,
        });
        for decl in introspect::declarations() {
            env.declare(decl)?;
        }

        let session = Session::new(config.history_size, Formatter::new(config.format_indent))?;
        let bindings = introspect::bindings(&session);
        debug!(
            "repl ready: history {}, check {}, macros {}",
            config.history_size, config.check, config.macros
        );

        Ok(Self {
            env,
            session,
            bindings,
            check: config.check,
            prompt: config.prompt.clone(),
            out,
        })
    }

    /// Prompt for the next line, `(N)` followed by the prompt text
    pub fn prompt(&self) -> String {
        format!("({}){}", self.session.position() + 1, self.prompt)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Startup banner
    pub fn banner(&mut self) -> Result<(), ReplError> {
        writeln!(self.out, "{} {} started", crate::NAME, crate::VERSION).map_err(ReplError::Output)?;
        writeln!(self.out, "type quit() to exit").map_err(ReplError::Output)?;
        self.out.flush().map_err(ReplError::Output)
    }

    /// Read lines from `source` until it ends or `quit()` is evaluated
    pub fn run<L: LineSource>(
        &mut self,
        source: &mut L,
    ) -> Result<(), ReplError> {
        loop {
            let prompt = self.prompt();
            let Some(line) = source.read_line(&prompt).map_err(ReplError::Input)? else {
                debug!("end of input");
                return Ok(());
            };
            if line.trim().is_empty() {
                continue;
            }
            if self.submit(&line)? == Step::Terminated {
                return Ok(());
            }
        }
    }

    /// Process one input line
    pub fn submit(
        &mut self,
        line: &str,
    ) -> Result<Step, ReplError> {
        let text = line.trim_end_matches(['\n', '\r']);
        if text.trim().is_empty() {
            return Ok(Step::Continue);
        }

        let (ast, issues) = self.env.compile(text);
        self.session
            .record(HistoryEntry::new(text, ast.clone(), issues.clone()));

        let ast = match ast {
            Some(ast) if !issues.has_errors() => ast,
            _ => {
                self.print_issues(&issues)?;
                return Ok(Step::Continue);
            }
        };

        let ast = if self.check {
            match self.env.check(&ast) {
                (Some(checked), issues) if !issues.has_errors() => checked,
                (_, issues) => {
                    self.print_issues(&issues)?;
                    return Ok(Step::Continue);
                }
            }
        } else {
            ast
        };

        let program = match self.env.program(&ast, &self.bindings) {
            Ok(program) => program,
            Err(e) => {
                self.print_line(&e.to_string())?;
                return Ok(Step::Continue);
            }
        };

        match program.eval(&Activation::new()) {
            Ok(value) => self.print_line(&display_result(&value))?,
            Err(EvalError::Quit) => {
                debug!("quit() evaluated");
                writeln!(self.out, "{}", FAREWELL).map_err(ReplError::Output)?;
                self.out.flush().map_err(ReplError::Output)?;
                return Ok(Step::Terminated);
            }
            Err(e) => self.print_line(&e.to_string())?,
        }
        Ok(Step::Continue)
    }

    fn print_issues(
        &mut self,
        issues: &Issues,
    ) -> Result<(), ReplError> {
        for text in issues.display_strings() {
            self.print_line(text.trim())?;
        }
        Ok(())
    }

    fn print_line(
        &mut self,
        text: &str,
    ) -> Result<(), ReplError> {
        let prompt = self.prompt();
        writeln!(self.out, "{}{}", prompt, text).map_err(ReplError::Output)?;
        self.out.flush().map_err(ReplError::Output)
    }
}

/// Top-level strings print without quotes
fn display_result(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
