//! Line input
//!
//! [`LineSource`] is where the REPL gets its next line from:
//!
//! - [`EditorSource`]: rustyline, for terminals (in-memory history only)
//! - [`ReaderSource`]: any `BufRead`, for pipes and tests; it writes the
//!   prompt itself

use std::io::{self, BufRead, Write};

use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, EditMode, Editor};

mod completer;
pub use completer::ReplCompleter;

/// Source of input lines
pub trait LineSource {
    /// Show `prompt` and read one line; `None` at end of input
    ///
    /// An interrupted read (Ctrl-C) returns an empty line, which the REPL
    /// skips without recording an entry.
    fn read_line(
        &mut self,
        prompt: &str,
    ) -> io::Result<Option<String>>;
}

/// Interactive terminal input through rustyline
pub struct EditorSource {
    editor: Editor<ReplCompleter, DefaultHistory>,
}

impl EditorSource {
    pub fn new(
        vi_mode: bool,
        completer: ReplCompleter,
    ) -> io::Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(if vi_mode { EditMode::Vi } else { EditMode::Emacs })
            .build();

        let mut editor = Editor::with_config(config).map_err(readline_to_io)?;
        editor.set_helper(Some(completer));
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(
        &mut self,
        prompt: &str,
    ) -> io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str()).map_err(readline_to_io)?;
                }
                Ok(Some(line))
            }
            // Ctrl-D
            Err(ReadlineError::Eof) => Ok(None),
            // Ctrl-C drops the current line
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(e) => Err(readline_to_io(e)),
        }
    }
}

fn readline_to_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

/// Buffered reader input, echoing the prompt to `W`
pub struct ReaderSource<R, W> {
    reader: R,
    out: W,
}

impl<R: BufRead, W: Write> ReaderSource<R, W> {
    pub fn new(
        reader: R,
        out: W,
    ) -> Self {
        Self { reader, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl ReaderSource<io::StdinLock<'static>, io::Stdout> {
    /// Standard input, prompts on stdout
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineSource for ReaderSource<R, W> {
    fn read_line(
        &mut self,
        prompt: &str,
    ) -> io::Result<Option<String>> {
        self.out.write_all(prompt.as_bytes())?;
        self.out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
