//! cel-repl - CLI

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cel_repl::backends::dev::repl::{EditorSource, ReaderSource, ReplCompleter};
use cel_repl::util::config::{load_config_from, load_user_config, ReplConfig};
use cel_repl::util::logger;
use cel_repl::{Repl, NAME, VERSION};

/// Interactive shell for the Common Expression Language
#[derive(Parser, Debug)]
#[command(name = "cel-repl")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    /// Evaluate one expression and exit
    #[arg(short, long, value_name = "EXPR")]
    eval: Option<String>,

    /// Config file (default: ~/.config/cel-repl/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of lines kept for inspect()
    #[arg(long, value_name = "N")]
    history_size: Option<usize>,

    /// Skip type checking
    #[arg(long)]
    no_check: bool,

    /// Disable has() and the comprehension macros
    #[arg(long)]
    no_macros: bool,

    /// Prompt text shown after the line counter
    #[arg(long)]
    prompt: Option<String>,

    /// Use vi key bindings
    #[arg(long)]
    vi: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Command line flags win over the config file
    fn apply(
        &self,
        config: &mut ReplConfig,
    ) {
        if let Some(size) = self.history_size {
            config.history_size = size;
        }
        if self.no_check {
            config.check = false;
        }
        if self.no_macros {
            config.macros = false;
        }
        if let Some(prompt) = &self.prompt {
            config.prompt = prompt.clone();
        }
        if self.vi {
            config.vi_mode = true;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        logger::init_debug();
    } else {
        logger::init();
    }

    let user_config = match &args.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => load_user_config().context("Failed to load user config")?,
    };
    let mut config = user_config.repl;
    args.apply(&mut config);
    tracing::debug!("effective config: {:?}", config);

    let mut repl = Repl::stdout(&config).context("Failed to start REPL")?;

    if let Some(expr) = &args.eval {
        repl.submit(expr).context("Failed to evaluate expression")?;
        return Ok(());
    }

    repl.banner()?;
    if io::stdin().is_terminal() {
        let completer = ReplCompleter::new(repl.env().function_names());
        let mut source =
            EditorSource::new(config.vi_mode, completer).context("Failed to start line editor")?;
        repl.run(&mut source)?;
    } else {
        repl.run(&mut ReaderSource::stdin())?;
    }

    Ok(())
}
