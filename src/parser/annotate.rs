//! Token annotation: positions and trivia folding.
//!
//! The raw lexer yields every token with a byte offset. This pass walks the
//! raw stream once, tracking a (row, column) cursor in code points, drops
//! trivia (whitespace, newlines, comments), and records it as
//! `space_before` / `newline_before` flags on the next significant token.
//! The stream is terminated by an EOF token at the final position.

use smol_str::SmolStr;

use crate::base::Position;

use super::lexer::Lexer;
use super::token_kind::TokenKind;

/// A significant token with position and trivia flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedToken {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub position: Position,
    pub space_before: bool,
    pub newline_before: bool,
}

impl AnnotatedToken {
    /// The position just past the last character of this token
    pub fn end_position(&self) -> Position {
        self.position.advanced(&self.text)
    }

    /// The symbol name this token denotes, with back-quotes stripped and
    /// back-quote escapes resolved
    pub fn symbol_name(&self) -> SmolStr {
        strip_back_quotes(&self.text)
    }
}

/// Strip enclosing back-quotes and resolve `\\` escapes
pub fn strip_back_quotes(text: &str) -> SmolStr {
    let Some(inner) = text
        .strip_prefix('`')
        .map(|rest| rest.strip_suffix('`').unwrap_or(rest))
    else {
        return SmolStr::new(text);
    };

    if !inner.contains('\\') {
        return SmolStr::new(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    SmolStr::new(out)
}

/// Annotate a source string into the token stream consumed by the parser
pub fn annotate(input: &str) -> Vec<AnnotatedToken> {
    let mut tokens = Vec::new();
    let mut cursor = Position::default();
    let mut space_before = false;
    let mut newline_before = false;

    for raw in Lexer::new(input) {
        let position = cursor;
        cursor.advance(raw.text);

        match raw.kind {
            TokenKind::WHITESPACE => space_before = true,
            TokenKind::NEWLINE => newline_before = true,
            TokenKind::COMMENT => {}
            kind => {
                tokens.push(AnnotatedToken {
                    kind,
                    text: SmolStr::new(raw.text),
                    position,
                    space_before,
                    newline_before,
                });
                space_before = false;
                newline_before = false;
            }
        }
    }

    tokens.push(AnnotatedToken {
        kind: TokenKind::EOF,
        text: SmolStr::default(),
        position: cursor,
        space_before,
        newline_before,
    });

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn significant(input: &str) -> Vec<AnnotatedToken> {
        let mut tokens = annotate(input);
        tokens.pop(); // EOF
        tokens
    }

    #[test]
    fn test_annotate_positions() {
        let tokens = significant("x <- 1\ny <- 2");
        assert_eq!(tokens[0].position, Position::new(0, 0));
        assert_eq!(tokens[1].position, Position::new(0, 2));
        assert_eq!(tokens[2].position, Position::new(0, 5));
        assert_eq!(tokens[3].position, Position::new(1, 0));
    }

    #[test]
    fn test_annotate_trivia_flags() {
        let tokens = significant("x <- 1\ny");
        assert!(!tokens[0].space_before);
        assert!(tokens[1].space_before);
        assert!(!tokens[1].newline_before);
        assert!(tokens[3].newline_before);
    }

    #[test]
    fn test_annotate_comment_keeps_newline_flag() {
        let tokens = significant("x # note\ny");
        assert_eq!(tokens.len(), 2);
        assert!(tokens[1].newline_before);
    }

    #[test]
    fn test_annotate_crlf_rows() {
        let tokens = significant("a\r\nb\rc");
        assert_eq!(tokens[0].position, Position::new(0, 0));
        assert_eq!(tokens[1].position, Position::new(1, 0));
        assert_eq!(tokens[2].position, Position::new(2, 0));
    }

    #[test]
    fn test_annotate_eof_terminator() {
        let tokens = annotate("x");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);
        assert_eq!(tokens.last().unwrap().position, Position::new(0, 1));
    }

    #[test]
    fn test_annotate_unicode_columns() {
        let tokens = significant("é <- 1");
        assert_eq!(tokens[1].position, Position::new(0, 2));
    }

    #[test]
    fn test_strip_back_quotes() {
        assert_eq!(strip_back_quotes("`my var`"), "my var");
        assert_eq!(strip_back_quotes(r"`with \` tick`"), "with ` tick");
        assert_eq!(strip_back_quotes("plain"), "plain");
    }
}
