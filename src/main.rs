//! The language's interpreter CLI.
//!
//! This is the main entry point for the interpreter binary. It provides
//! argument dispatch, file reading, and the REPL loop around the core
//! crate.
//!
//! # Usage
//!
//! ```text
//! lox              start the REPL
//! lox <path>       run a script file once
//! lox <a> <b> ...  usage error
//! ```
//!
//! # Architecture
//!
//! This is the only "external collaborator" the core (see [`lox`]) knows
//! nothing about. It drives [`lox::Session`] through its `run`/`run_repl`
//! entry points and translates the result into a process exit code.

use clap::Parser;
use lox::Session;
use lox::config::Config;
use lox::error::CliError;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// The language's interpreter.
///
/// Run with no arguments to start an interactive REPL, with one argument to
/// execute a script file, or with more than one argument to see usage.
#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(about = "A tree-walking interpreter", long_about = None)]
struct Cli {
    /// Positional arguments. Zero starts the REPL, one names a script to
    /// run, two or more is a usage error. This mirrors the original
    /// interpreter's `argv`-count dispatch rather than a subcommand model,
    /// since the language itself has no subcommands.
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true, env = "LOX_VERBOSE")]
    verbose: bool,

    /// Disable color in rendered diagnostics. The current diagnostic format
    /// is plain text with no ANSI codes either way, so this only overrides
    /// `lox.toml`'s `color` field for forward-compatibility with a future
    /// richer renderer.
    #[arg(long, global = true)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.args.as_slice() {
        [] => {
            let mut config = load_config();
            if cli.no_color {
                config.color = false;
            }
            run_repl(&config)
        }
        [path] => run_file(path),
        _ => {
            println!("Usage: lox [script]");
            ExitCode::from(64)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok();
}

fn read_source(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadSource {
        path: path.to_string(),
        source,
    })
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Warning: {err}");
            Config::default()
        }
    }
}

/// Executes one file and exits. Parse errors take precedence over runtime
/// errors (the core never evaluates after a parse error, so the two can't
/// both be true, but this keeps the precedence explicit at the boundary
/// that owns exit codes).
fn run_file(path: &str) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(66);
        }
    };

    let mut session = Session::new();
    let mut stderr = io::stderr();
    let outcome = session.run(&source, &mut stderr);

    if outcome.had_parse_error {
        ExitCode::from(65)
    } else if outcome.had_runtime_error {
        ExitCode::from(70)
    } else {
        ExitCode::from(0)
    }
}

/// Reads stdin line by line, handing each line to the same persistent
/// session so top-level declarations accumulate across turns. EOF (an
/// empty read) ends the loop cleanly with exit code 0; it is not an error.
fn run_repl(config: &Config) -> ExitCode {
    let mut session = Session::new();
    let stdin = io::stdin();

    loop {
        print!("{}", config.prompt);
        io::stdout().flush().ok();

        let mut line = String::new();
        let bytes_read = stdin.lock().read_line(&mut line).unwrap_or(0);
        if bytes_read == 0 {
            println!();
            break;
        }

        let mut stderr = io::stderr();
        session.run_repl(&line, &mut stderr, config.echo_bare_expressions);
    }

    ExitCode::from(0)
}
