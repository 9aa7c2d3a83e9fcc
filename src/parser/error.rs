use crate::token::Token;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    /// `""`, `" at end"`, or `" at '<lexeme>'"`. Matches the external
    /// diagnostic format exactly; see `crate::diagnostics`.
    pub location: String,
}

impl ParseError {
    pub fn at_token(token: &Token, message: impl Into<String>) -> Self {
        use crate::token::TokenKind;
        let location = if token.kind == TokenKind::Eof {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };
        Self {
            message: message.into(),
            line: token.line(),
            location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {}] Error{}: {}",
            self.line, self.location, self.message
        )
    }
}

impl std::error::Error for ParseError {}
