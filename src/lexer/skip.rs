use super::cursor::Cursor;

/// Consumes whitespace and `//` line comments. Comments and whitespace never
/// produce tokens; newlines still advance the cursor's line counter.
pub fn skip_whitespace_and_comments(cursor: &mut Cursor) {
    loop {
        match cursor.current_char() {
            Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                cursor.advance();
            }
            Some('/') if cursor.peek_char() == Some('/') => {
                while cursor.current_char().is_some_and(|c| c != '\n') {
                    cursor.advance();
                }
            }
            _ => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_spaces_and_comments() {
        let mut cursor = Cursor::new("   // hello\n  x");
        skip_whitespace_and_comments(&mut cursor);
        assert_eq!(cursor.current_char(), Some('x'));
    }

    #[test]
    fn stops_at_non_whitespace() {
        let mut cursor = Cursor::new("x  ");
        skip_whitespace_and_comments(&mut cursor);
        assert_eq!(cursor.current_char(), Some('x'));
    }
}
