//! External diagnostic rendering.
//!
//! Scan/parse errors and runtime errors use two different wire formats on
//! stderr. This module is the only place either format is written, so the
//! two stay exact and in one place rather than drifting between the CLI and
//! the REPL.
//!
//! # Formats
//!
//! - Lex/parse: `[line <n>] Error<where>: <message>`, where `<where>` is
//!   `""`, `" at end"`, or `" at '<lexeme>'"`.
//! - Runtime: `<message>\n[line <n>]`.

use crate::interpreter::RuntimeError;
use crate::lexer::LexError;
use crate::parser::ParseError;
use std::io::Write;

/// `[line <n>] Error: <message>`. A scan-time error never has a `<where>`
/// suffix, since it has no token to attribute `" at '...'"` to.
pub fn report_lex_error(out: &mut impl Write, err: &LexError) {
    writeln!(out, "{err}").ok();
}

/// `[line <n>] Error<where>: <message>`, where `<where>` is `""`,
/// `" at end"`, or `" at '<lexeme>'"`.
pub fn report_parse_error(out: &mut impl Write, err: &ParseError) {
    writeln!(out, "{err}").ok();
}

/// `<message>\n[line <n>]`.
pub fn report_runtime_error(out: &mut impl Write, err: &RuntimeError) {
    writeln!(out, "{err}").ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Span, Token, TokenKind};

    #[test]
    fn lex_error_format() {
        let mut buf = Vec::new();
        report_lex_error(&mut buf, &LexError::new("Unterminated string.", 3));
        assert_eq!(String::from_utf8(buf).unwrap(), "[line 3] Error: Unterminated string.\n");
    }

    #[test]
    fn parse_error_format_at_token() {
        let token = Token::new(TokenKind::Semicolon, ";", Span::new(0, 1, 1));
        let mut buf = Vec::new();
        report_parse_error(&mut buf, &ParseError::at_token(&token, "Expect expression."));
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[line 1] Error at ';': Expect expression.\n"
        );
    }

    #[test]
    fn parse_error_format_at_end() {
        let token = Token::new(TokenKind::Eof, "", Span::new(0, 0, 2));
        let mut buf = Vec::new();
        report_parse_error(&mut buf, &ParseError::at_token(&token, "Expect ';'."));
        assert_eq!(String::from_utf8(buf).unwrap(), "[line 2] Error at end: Expect ';'.\n");
    }

    #[test]
    fn runtime_error_format() {
        let token = Token::new(TokenKind::Identifier, "x", Span::new(0, 1, 5));
        let mut buf = Vec::new();
        report_runtime_error(
            &mut buf,
            &RuntimeError::new("Undefined variable 'x'.", token),
        );
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Undefined variable 'x'.\n[line 5]\n"
        );
    }
}
