//! Source positions expressed as line/column ranges.

use serde::{Deserialize, Serialize};

/// A range in source text, expressed in 1-based lines and columns.
///
/// Both ends are inclusive. A freshly constructed (default) position is all
/// zeros, meaning "no position known yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line of the first character of the range (1-based).
    pub first_line: u32,
    /// Column of the first character of the range (1-based).
    pub first_column: u32,
    /// Line of the last character of the range (1-based).
    pub last_line: u32,
    /// Column of the last character of the range (1-based).
    pub last_column: u32,
}

impl Position {
    pub fn new(first_line: u32, first_column: u32, last_line: u32, last_column: u32) -> Self {
        Self {
            first_line,
            first_column,
            last_line,
            last_column,
        }
    }
}

/// Convert a pair of byte offsets into a line/column [`Position`].
///
/// Offsets past the end of `source` are clamped to the end. The walk is
/// linear in the length of the prefix; callers converting many offsets over
/// the same source should convert in document order.
pub fn offset_to_position(source: &str, start: usize, end: usize) -> Position {
    let (first_line, first_column) = line_col_at(source, start);
    // The range is inclusive at both ends.
    let (last_line, last_column) = line_col_at(source, end.saturating_sub(1).max(start));
    Position {
        first_line,
        first_column,
        last_line,
        last_column,
    }
}

fn line_col_at(source: &str, offset: usize) -> (u32, u32) {
    let mut line = 1u32;
    let mut column = 1u32;
    let mut current = 0usize;

    for ch in source.chars() {
        if current >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
        current += ch.len_utf8();
    }

    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_at_start() {
        let pos = offset_to_position("hello\nworld", 0, 5);
        assert_eq!(pos.first_line, 1);
        assert_eq!(pos.first_column, 1);
        assert_eq!(pos.last_line, 1);
        assert_eq!(pos.last_column, 5);
    }

    #[test]
    fn test_offset_on_second_line() {
        let source = "hello\nworld";
        let pos = offset_to_position(source, 6, 11);
        assert_eq!(pos.first_line, 2);
        assert_eq!(pos.first_column, 1);
        assert_eq!(pos.last_line, 2);
        assert_eq!(pos.last_column, 5);
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        let pos = offset_to_position("ab", 100, 200);
        assert_eq!(pos.first_line, 1);
        assert_eq!(pos.first_column, 3);
    }

    #[test]
    fn test_empty_range() {
        let pos = offset_to_position("abc", 1, 1);
        assert_eq!(pos.first_line, 1);
        assert_eq!(pos.first_column, 2);
        assert_eq!(pos.last_line, 1);
        assert_eq!(pos.last_column, 2);
    }

    #[test]
    fn test_multibyte_characters() {
        // 'é' is two bytes; columns count characters, not bytes.
        let source = "é<a/>";
        let pos = offset_to_position(source, 2, 6);
        assert_eq!(pos.first_column, 2);
    }
}
