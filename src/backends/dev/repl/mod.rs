//! REPL Module
//!
//! Interactive evaluation with self-inspecting history.
//!
//! This module contains:
//! - [`history::HistoryRingBuffer`] - Bounded log of submitted lines
//! - [`format::Formatter`] - Renders parsed expressions for `inspect`
//! - [`session::Session`] - History and formatter shared with the functions below
//! - [`introspect`] - `quit`, `inspect` and `inspect_int`
//! - [`engine::Repl`] - The read-eval-print loop
//! - [`line`] - Terminal and reader line sources

pub mod engine;
pub mod format;
pub mod history;
pub mod introspect;
pub mod line;
pub mod session;

#[cfg(test)]
mod tests;

pub use engine::{Repl, ReplError, Step, FAREWELL};
pub use format::{ExprNode, Formatter, OutputFormat};
pub use history::{HistoryEntry, HistoryError, HistoryRingBuffer};
pub use line::{EditorSource, LineSource, ReaderSource, ReplCompleter};
pub use session::{Session, FAILED_ENTRY, NO_HISTORY};
