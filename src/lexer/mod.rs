//! Lexical analyzer for the language.
//!
//! This module provides the [`Lexer`] struct which converts source code
//! text into a flat stream of [`crate::token::Token`]s for the parser.
//!
//! # Overview
//!
//! The lexer is a single-pass, two-cursor scanner: each call to
//! [`Lexer::tokenize`] anchors a lexeme start, dispatches on the next
//! character, and always terminates with a synthetic
//! [`TokenKind::Eof`](crate::token::TokenKind::Eof). Scanning never aborts
//! on an unrecognized character; it records a diagnostic and keeps going,
//! so a caller always gets a full token list to hand to the parser.
//!
//! # Supported Tokens
//!
//! - **Keywords**: `and`, `class`, `else`, `false`, `for`, `fun`, `if`,
//!   `nil`, `or`, `print`, `return`, `super`, `this`, `true`, `var`, `while`
//! - **Identifiers**: start with an ASCII alphabetic character or
//!   underscore, continue with ASCII alphanumerics and underscores.
//!   Non-ASCII characters are not identifier constituents.
//! - **Number literals**: one or more ASCII digits, optionally followed by
//!   `.` and one or more digits. Stored as `f64`.
//! - **String literals**: enclosed in double quotes, may span newlines, no
//!   escape processing.
//! - **Punctuation**: single- and two-character operators and delimiters
//! - **Comments**: line comments starting with `//`
//!
//! # Module Structure
//!
//! - [`error`] - [`LexError`], the external diagnostic shape
//! - [`cursor`] - position tracking and character navigation
//! - [`skip`] - whitespace and comment handling
//!
//! # See Also
//!
//! * [`crate::token`] - token type definitions
//! * [`crate::parser`] - parser that consumes the token stream

mod cursor;
mod error;
mod skip;

pub use error::LexError;

use crate::token::{Span, Token, TokenKind};
use cursor::Cursor;

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Scans the whole source. Returns every token it managed to produce
    /// plus every [`LexError`] encountered; an unterminated string or an
    /// unrecognized character is recorded as an error and scanning resumes
    /// at the next character.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        loop {
            skip::skip_whitespace_and_comments(&mut self.cursor);
            let start = self.cursor.pos;
            let line = self.cursor.line;

            let Some(ch) = self.cursor.advance() else {
                tokens.push(Token::new(TokenKind::Eof, "", Span::new(start, start, line)));
                break;
            };

            let kind = match ch {
                '(' => Some(TokenKind::LeftParen),
                ')' => Some(TokenKind::RightParen),
                '{' => Some(TokenKind::LeftBrace),
                '}' => Some(TokenKind::RightBrace),
                ',' => Some(TokenKind::Comma),
                '.' => Some(TokenKind::Dot),
                '-' => Some(TokenKind::Minus),
                '+' => Some(TokenKind::Plus),
                ';' => Some(TokenKind::Semicolon),
                '*' => Some(TokenKind::Star),
                '!' => Some(self.two_char('=', TokenKind::BangEqual, TokenKind::Bang)),
                '=' => Some(self.two_char('=', TokenKind::EqualEqual, TokenKind::Equal)),
                '<' => Some(self.two_char('=', TokenKind::LessEqual, TokenKind::Less)),
                '>' => Some(self.two_char('=', TokenKind::GreaterEqual, TokenKind::Greater)),
                '/' => Some(TokenKind::Slash),
                '"' => match self.read_string(start, line) {
                    Ok(kind) => Some(kind),
                    Err(err) => {
                        errors.push(err);
                        None
                    }
                },
                c if c.is_ascii_digit() => Some(self.read_number(start)),
                c if c.is_ascii_alphabetic() || c == '_' => Some(self.read_identifier(start)),
                other => {
                    tracing::trace!(%other, line, "unexpected character");
                    errors.push(LexError::new(format!("Unexpected character: {other}"), line));
                    None
                }
            };

            if let Some(kind) = kind {
                let lexeme = self.cursor.slice(start).to_string();
                tokens.push(Token::new(kind, lexeme, Span::new(start, self.cursor.pos, line)));
            }
        }

        tracing::debug!(
            tokens = tokens.len(),
            errors = errors.len(),
            "lexer finished"
        );
        (tokens, errors)
    }

    /// Consumes `expected` if it is next, yielding `matched`; otherwise
    /// yields `fallback` without consuming anything. Each call site supplies
    /// its own single-character fallback so `!`, `=`, `<`, `>` never
    /// collapse onto a shared one.
    fn two_char(&mut self, expected: char, matched: TokenKind, fallback: TokenKind) -> TokenKind {
        if self.cursor.current_char() == Some(expected) {
            self.cursor.advance();
            matched
        } else {
            fallback
        }
    }

    fn read_string(&mut self, start: usize, start_line: usize) -> Result<TokenKind, LexError> {
        while let Some(c) = self.cursor.current_char() {
            if c == '"' {
                break;
            }
            self.cursor.advance();
        }

        if self.cursor.is_eof() {
            return Err(LexError::new("Unterminated string.", start_line));
        }

        self.cursor.advance(); // closing quote
        let raw = self.cursor.slice(start);
        let value = &raw[1..raw.len() - 1];
        Ok(TokenKind::String(value.to_string()))
    }

    fn read_number(&mut self, start: usize) -> TokenKind {
        while self.cursor.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.cursor.advance();
        }
        if self.cursor.current_char() == Some('.')
            && self.cursor.peek_char().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance(); // '.'
            while self.cursor.current_char().is_some_and(|c| c.is_ascii_digit()) {
                self.cursor.advance();
            }
        }
        let text = self.cursor.slice(start);
        TokenKind::Number(text.parse().expect("scanned number lexeme must parse"))
    }

    fn read_identifier(&mut self, start: usize) -> TokenKind {
        while self
            .cursor
            .current_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.cursor.advance();
        }
        let text = self.cursor.slice(start);
        TokenKind::keyword(text).unwrap_or(TokenKind::Identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, errors) = Lexer::new(src).tokenize();
        assert!(errors.is_empty(), "unexpected lex errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn two_char_operators_fall_back_to_their_own_kind() {
        assert_eq!(kinds("!")[0], TokenKind::Bang);
        assert_eq!(kinds("=")[0], TokenKind::Equal);
        assert_eq!(kinds("<")[0], TokenKind::Less);
        assert_eq!(kinds(">")[0], TokenKind::Greater);
        assert_eq!(kinds("!=")[0], TokenKind::BangEqual);
        assert_eq!(kinds("<=")[0], TokenKind::LessEqual);
        assert_eq!(kinds(">=")[0], TokenKind::GreaterEqual);
        assert_eq!(kinds("==")[0], TokenKind::EqualEqual);
    }

    #[test]
    fn scans_number_with_fraction() {
        assert_eq!(kinds("12.34")[0], TokenKind::Number(12.34));
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        let ks = kinds("12.");
        assert_eq!(ks[0], TokenKind::Number(12.0));
        assert_eq!(ks[1], TokenKind::Dot);
    }

    #[test]
    fn scans_string_across_newline() {
        let (tokens, errors) = Lexer::new("\"a\nb\"").tokenize();
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::String("a\nb".to_string()));
    }

    #[test]
    fn unterminated_string_reports_opening_line() {
        let (_, errors) = Lexer::new("\"abc").tokenize();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
        assert!(errors[0].message.contains("Unterminated"));
    }

    #[test]
    fn keyword_vs_identifier() {
        assert_eq!(kinds("while")[0], TokenKind::While);
        assert_eq!(kinds("whilex")[0], TokenKind::Identifier);
    }

    #[test]
    fn comment_produces_no_token() {
        let ks = kinds("// comment\n1");
        assert_eq!(ks, vec![TokenKind::Number(1.0), TokenKind::Eof]);
    }

    #[test]
    fn unrecognized_character_is_skipped_with_error() {
        let (tokens, errors) = Lexer::new("@1").tokenize();
        assert_eq!(errors.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Number(1.0));
    }

    #[test]
    fn non_ascii_letter_does_not_start_an_identifier() {
        let (tokens, errors) = Lexer::new("é").tokenize();
        assert_eq!(errors.len(), 1, "non-ASCII letters are not identifier starts");
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn non_ascii_letter_ends_an_identifier_early() {
        // `var_é` scans as the identifier `var_`, then a separate error for `é`.
        let (tokens, errors) = Lexer::new("var_é").tokenize();
        assert_eq!(errors.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "var_");
    }

    #[test]
    fn always_ends_with_eof() {
        let ks = kinds("");
        assert_eq!(ks, vec![TokenKind::Eof]);
    }
}
