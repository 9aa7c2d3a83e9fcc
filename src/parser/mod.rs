//! Recursive-descent parser for the language.
//!
//! This module provides the [`Parser`] struct which transforms a token
//! stream produced by [`crate::lexer`] into a forest of [`Stmt`] nodes.
//!
//! # Overview
//!
//! One parsing routine per grammar production; each `while match_token(...)`
//! loop implements left-associativity for the operators at that precedence
//! level. A parse error is recorded rather than raised immediately, then
//! recovered from via panic-mode synchronization, so one malformed
//! declaration never aborts the rest of the file: [`Parser::parse`] always
//! returns every statement it could build plus every error it hit.
//!
//! # Module Structure
//!
//! - [`error`] - [`ParseError`], the external diagnostic shape
//! - [`expr`] - `expression` down to `primary`
//! - [`stmt`] - declarations, statements, and `for` desugaring
//!
//! # See Also
//!
//! * [`crate::lexer`] - produces the token stream this module consumes
//! * [`crate::interpreter`] - walks the [`Stmt`] forest this module produces

mod error;
mod expr;
mod stmt;

pub use error::ParseError;

use crate::ast::Stmt;
use crate::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        assert!(!tokens.is_empty(), "token stream must contain at least EOF");
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    pub fn parse(mut self) -> (Vec<Stmt>, Vec<ParseError>) {
        let mut stmts = Vec::new();
        while !self.is_eof() {
            match self.declaration() {
                Some(stmt) => stmts.push(stmt),
                None => {}
            }
        }
        tracing::debug!(
            statements = stmts.len(),
            errors = self.errors.len(),
            "parser finished"
        );
        (stmts, self.errors)
    }

    // --- cursor primitives, shared by expr.rs and stmt.rs ---

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn is_eof(&self) -> bool {
        *self.current_kind() == TokenKind::Eof
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos - 1]
    }

    fn advance(&mut self) -> &Token {
        if !self.is_eof() {
            self.pos += 1;
        }
        self.previous()
    }

    fn check(&self, kind: &TokenKind) -> bool {
        !self.is_eof() && self.current_kind() == kind
    }

    fn match_token(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<&Token, ParseError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::at_token(self.current(), message)
    }

    /// Discards tokens until the start of the next statement is likely,
    /// so one malformed declaration doesn't cascade into spurious errors.
    ///
    /// Always consumes the offending token first. Without that unconditional
    /// advance, a synchronization keyword with no grammar production (e.g.
    /// `class`) would sit at `current` forever: the loop would return
    /// immediately without moving `pos`, and the caller would re-enter
    /// `declaration()` on the same token on every iteration.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_eof() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if matches!(
                self.current_kind(),
                TokenKind::Class
                    | TokenKind::Fun
                    | TokenKind::Var
                    | TokenKind::For
                    | TokenKind::If
                    | TokenKind::While
                    | TokenKind::Print
                    | TokenKind::Return
            ) {
                return;
            }
            self.advance();
        }
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.match_token(&[TokenKind::Var]) {
            self.var_declaration()
        } else if self.match_token(&[TokenKind::Fun]) {
            self.function_declaration("function")
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                tracing::trace!(%err, "synchronizing after parse error");
                self.errors.push(err);
                self.synchronize();
                None
            }
        }
    }
}
