//! REPL Completer
//!
//! Tab completion for rustyline: declared function names, macro names and
//! keywords.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;

const KEYWORDS: &[&str] = &["true", "false", "null", "in"];

const MACROS: &[&str] = &["has", "all", "exists", "exists_one", "map", "filter"];

/// Line editor helper completing names
#[derive(Debug, Clone, Default)]
pub struct ReplCompleter {
    functions: Vec<String>,
}

impl ReplCompleter {
    /// Complete the given function names plus macros and keywords
    pub fn new<'a>(functions: impl IntoIterator<Item = &'a str>) -> Self {
        let mut functions: Vec<String> = functions
            .into_iter()
            .filter(|name| name.starts_with(|c: char| c.is_alphabetic()))
            .map(str::to_string)
            .collect();
        functions.sort();
        functions.dedup();
        Self { functions }
    }

    /// Candidates for the word ending at `pos`
    pub fn candidates(
        &self,
        line: &str,
        pos: usize,
    ) -> (usize, Vec<Pair>) {
        let start = line[..pos]
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + 1);
        let word = &line[start..pos];
        if word.is_empty() {
            return (start, Vec::new());
        }

        let mut candidates = Vec::new();
        for name in &self.functions {
            if name.starts_with(word) {
                candidates.push(Pair {
                    display: format!("{}()", name),
                    replacement: name.clone(),
                });
            }
        }
        for name in MACROS {
            if name.starts_with(word) {
                candidates.push(Pair {
                    display: format!("macro {}", name),
                    replacement: name.to_string(),
                });
            }
        }
        for kw in KEYWORDS {
            if kw.starts_with(word) {
                candidates.push(Pair {
                    display: kw.to_string(),
                    replacement: kw.to_string(),
                });
            }
        }

        candidates.sort_by(|a, b| a.replacement.cmp(&b.replacement));
        candidates.dedup_by(|a, b| a.replacement == b.replacement);
        (start, candidates)
    }
}

impl Completer for ReplCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for ReplCompleter {
    type Hint = String;
}

impl Highlighter for ReplCompleter {}

impl Validator for ReplCompleter {}

impl Helper for ReplCompleter {}
