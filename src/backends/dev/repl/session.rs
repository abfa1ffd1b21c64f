//! REPL session state shared with the introspection functions
//!
//! # Indexing convention
//!
//! The REPL records each line's entry *before* evaluating it. While line `N`
//! (1-based) is evaluated, `position()` is therefore already `N`:
//!
//! - the in-flight entry has absolute index `position() - 1`
//! - the previous line has absolute index `position() - 2`
//! - line `n` of the session has absolute index `n - 1`
//!
//! Lookups only return completed entries (absolute index below
//! `position() - 1`) that are still held by the ring buffer.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backends::dev::repl::format::{Formatter, OutputFormat};
use crate::backends::dev::repl::history::{HistoryEntry, HistoryError, HistoryRingBuffer};

/// Rendered when no completed entry exists at the requested position
pub const NO_HISTORY: &str = "No history to inspect";

/// Rendered for entries whose line failed to compile
pub const FAILED_ENTRY: &str = "that's not numberwang";

/// Shared history handle
pub type SharedHistory = Rc<RefCell<HistoryRingBuffer<HistoryEntry>>>;

/// History and formatter of one REPL run
///
/// Cloning yields another handle to the same history.
#[derive(Debug, Clone)]
pub struct Session {
    history: SharedHistory,
    formatter: Rc<Formatter>,
}

impl Session {
    pub fn new(
        capacity: usize,
        formatter: Formatter,
    ) -> Result<Self, HistoryError> {
        Ok(Self {
            history: Rc::new(RefCell::new(HistoryRingBuffer::new(capacity)?)),
            formatter: Rc::new(formatter),
        })
    }

    /// Record a submitted line
    pub fn record(
        &self,
        entry: HistoryEntry,
    ) {
        self.history.borrow_mut().insert(entry);
    }

    /// Number of lines recorded so far
    pub fn position(&self) -> u64 {
        self.history.borrow().position()
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Render the line before the one being evaluated
    pub fn inspect_previous(
        &self,
        format: &OutputFormat,
    ) -> String {
        let index = self.position() as i64 - 2;
        self.render_entry(index, format)
    }

    /// Render line `n` of the session (1-based)
    pub fn inspect_at(
        &self,
        n: i64,
        format: &OutputFormat,
    ) -> String {
        self.render_entry(n.saturating_sub(1), format)
    }

    fn render_entry(
        &self,
        index: i64,
        format: &OutputFormat,
    ) -> String {
        let history = self.history.borrow();
        let in_flight = history.position() as i64 - 1;
        if index >= in_flight {
            return NO_HISTORY.to_string();
        }

        let Some(entry) = history.get_absolute(index) else {
            return NO_HISTORY.to_string();
        };
        tracing::trace!("inspecting entry {} as {}", index + 1, format);

        match &entry.ast {
            Some(ast) if !entry.failed() => self.formatter.render(ast.expr(), format),
            _ => FAILED_ENTRY.to_string(),
        }
    }
}
