//! REPL tests module
//!
//! - history: ring buffer indexing and wraparound
//! - session: entry lookup and rendering rules
//! - engine: line handling end to end, through `submit`

mod engine;
mod session;

use crate::backends::dev::repl::{Repl, Step};
use crate::util::config::ReplConfig;

/// REPL writing into a buffer
fn repl_with(config: ReplConfig) -> Repl<Vec<u8>> {
    Repl::new(&config, Vec::new()).unwrap()
}

/// Submit `lines` to a default REPL and return everything it printed
fn transcript(lines: &[&str]) -> String {
    transcript_with(ReplConfig::default(), lines)
}

fn transcript_with(
    config: ReplConfig,
    lines: &[&str],
) -> String {
    let mut repl = repl_with(config);
    for line in lines {
        if repl.submit(line).unwrap() == Step::Terminated {
            break;
        }
    }
    String::from_utf8(repl.into_output()).unwrap()
}
