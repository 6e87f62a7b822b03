/// Position tracking for tokens, scopes, and lint items.
///
/// Rows and columns are 0-indexed. Columns count Unicode code points within
/// the row, not bytes; consumers that surface positions to humans add 1.

/// A position in source code (0-indexed, code-point columns)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Advance this position over a run of source text.
    ///
    /// `\n`, `\r\n`, and `\r` each start a new row and reset the column.
    pub fn advance(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\n' => {
                    self.row += 1;
                    self.column = 0;
                }
                '\r' => {
                    self.row += 1;
                    self.column = 0;
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                }
                _ => self.column += 1,
            }
        }
    }

    /// The position just past `text` starting at `self`
    pub fn advanced(mut self, text: &str) -> Self {
        self.advance(text);
        self
    }
}

/// A closed range in source code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from row/column coordinates
    pub fn from_coords(
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_row, start_col),
            end: Position::new(end_row, end_col),
        }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_order_is_row_major() {
        assert!(Position::new(0, 10) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert!(Position::new(2, 3) <= Position::new(2, 3));
    }

    #[test]
    fn test_advance_counts_code_points() {
        let mut pos = Position::new(0, 0);
        pos.advance("héllo");
        assert_eq!(pos, Position::new(0, 5));
    }

    #[test]
    fn test_advance_line_terminators() {
        assert_eq!(Position::new(0, 3).advanced("\n"), Position::new(1, 0));
        assert_eq!(Position::new(0, 3).advanced("\r\n"), Position::new(1, 0));
        assert_eq!(Position::new(0, 3).advanced("\r"), Position::new(1, 0));
        assert_eq!(Position::new(0, 0).advanced("a\nbc"), Position::new(1, 2));
        assert_eq!(Position::new(0, 0).advanced("\r\n\n"), Position::new(2, 0));
    }

    #[test]
    fn test_span_contains() {
        let span = Span::from_coords(1, 2, 3, 4);
        assert!(span.contains(Position::new(2, 0)));
        assert!(span.contains(Position::new(1, 2)));
        assert!(span.contains(Position::new(3, 4)));
        assert!(!span.contains(Position::new(1, 1)));
        assert!(!span.contains(Position::new(3, 5)));
    }
}
