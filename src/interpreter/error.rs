//! Runtime-side control-flow signals.
//!
//! Two distinct non-local transfers share one plumbing mechanism
//! (`Result`-threaded-through-evaluation, per the "Runtime error
//! propagation" design note): an actual [`RuntimeError`] that unwinds to
//! `interpret()`, and a `return` value that unwinds only to the nearest
//! function call. [`Signal`] keeps them as distinct variants so a `return`
//! can never be mistaken for an error while it's in flight.

use crate::interpreter::value::Value;
use crate::token::Token;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub message: String,
    pub token: Token,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>, token: Token) -> Self {
        Self {
            message: message.into(),
            token,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n[line {}]", self.message, self.token.line())
    }
}

impl std::error::Error for RuntimeError {}

/// What escaped while executing a statement: an honest error, or a
/// `return` carrying its value. Every statement-execution function returns
/// `Result<(), Signal>` so either kind unwinds through the same `?`
/// plumbing; only `Function::call` ever catches a `Return`.
#[derive(Debug, Clone)]
pub enum Signal {
    Error(RuntimeError),
    Return(Value),
}

impl From<RuntimeError> for Signal {
    fn from(err: RuntimeError) -> Self {
        Signal::Error(err)
    }
}
