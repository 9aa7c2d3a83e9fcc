//! A tree-walking interpreter for a small dynamically-typed scripting
//! language in the Lox lineage.
//!
//! This crate provides [`Session`], the single entry point external
//! collaborators (a CLI, a REPL loop, anything driving stream I/O) use to
//! run source text and observe whether it succeeded.
//!
//! # Overview
//!
//! The core is four leaf-to-root stages:
//! - [`token`] - shared token and span types
//! - [`lexer`] - turns source text into a token stream
//! - [`parser`] - turns the token stream into a forest of statements
//! - [`interpreter`] - walks the statement forest, producing side effects
//!
//! [`Session`] owns a persistent interpreter handle, so top-level
//! declarations survive across REPL turns while a batch run is just one
//! call against a fresh session.
//!
//! # See Also
//!
//! * [`diagnostics`] - renders lexer/parser/runtime errors to their exact
//!   external text
//! * [`config`] - optional CLI/REPL configuration, read only by `main.rs`

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;

use ast::Stmt;
use interpreter::Interpreter;
use lexer::Lexer;
use parser::Parser;
use std::io::Write;

/// Whether a [`Session::run`] call hit a static (scan/parse) error, a
/// runtime error, or neither. Static errors prevent evaluation entirely and
/// are checked first, so a run can never report both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub had_parse_error: bool,
    pub had_runtime_error: bool,
}

impl RunOutcome {
    pub fn is_success(self) -> bool {
        !self.had_parse_error && !self.had_runtime_error
    }
}

/// A long-lived interpreter session.
///
/// Owns the `globals` environment, so a `var`/`fun` declared in one
/// [`Session::run`] call is visible in the next. This is what lets the REPL
/// accumulate state across turns while a batch run is just one `run` call
/// against a fresh `Session`.
pub struct Session {
    interpreter: Interpreter,
}

impl Session {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::new(out),
        }
    }

    /// Lexes, parses, and (if no static error occurred) evaluates `source`.
    ///
    /// Diagnostics are written to `err` in the exact external format;
    /// evaluator side effects (stdout) go to whatever writer the session
    /// was built with. Static errors are checked before the core ever runs,
    /// so `had_parse_error` and `had_runtime_error` are never both set.
    pub fn run(&mut self, source: &str, err: &mut impl Write) -> RunOutcome {
        let Some(stmts) = self.parse(source, err) else {
            return RunOutcome {
                had_parse_error: true,
                had_runtime_error: false,
            };
        };
        self.run_parsed(&stmts, err)
    }

    /// REPL-only entry point. Identical to [`Session::run`], except that a
    /// single bare expression statement (`1 + 2;`, not `print ...` or a
    /// declaration) has its value printed, the traditional interactive-shell
    /// convenience, instead of silently discarded. File mode never does
    /// this. `echo_bare_expressions` is read from `main.rs`'s loaded
    /// [`crate::config::Config`], not decided here.
    pub fn run_repl(
        &mut self,
        source: &str,
        err: &mut impl Write,
        echo_bare_expressions: bool,
    ) -> RunOutcome {
        let Some(stmts) = self.parse(source, err) else {
            return RunOutcome {
                had_parse_error: true,
                had_runtime_error: false,
            };
        };

        if echo_bare_expressions {
            if let [Stmt::Expression(expr)] = stmts.as_slice() {
                return match self.interpreter.evaluate_for_repl(expr) {
                    Ok(value) => {
                        writeln!(self.interpreter.out(), "{value}").ok();
                        RunOutcome::default()
                    }
                    Err(runtime_error) => {
                        diagnostics::report_runtime_error(err, &runtime_error);
                        RunOutcome {
                            had_parse_error: false,
                            had_runtime_error: true,
                        }
                    }
                };
            }
        }

        self.run_parsed(&stmts, err)
    }

    /// Lexes and parses `source`, reporting every diagnostic to `err`.
    /// Returns `None` if any static error occurred; the core must not be
    /// invoked in that case.
    fn parse(&self, source: &str, err: &mut impl Write) -> Option<Vec<Stmt>> {
        let (tokens, lex_errors) = Lexer::new(source).tokenize();
        let (stmts, parse_errors) = Parser::new(tokens).parse();

        for lex_error in &lex_errors {
            diagnostics::report_lex_error(err, lex_error);
        }
        for parse_error in &parse_errors {
            diagnostics::report_parse_error(err, parse_error);
        }

        if lex_errors.is_empty() && parse_errors.is_empty() {
            Some(stmts)
        } else {
            None
        }
    }

    fn run_parsed(&mut self, stmts: &[Stmt], err: &mut impl Write) -> RunOutcome {
        match self.interpreter.interpret(stmts) {
            Ok(()) => RunOutcome::default(),
            Err(runtime_error) => {
                diagnostics::report_runtime_error(err, &runtime_error);
                RunOutcome {
                    had_parse_error: false,
                    had_runtime_error: true,
                }
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
