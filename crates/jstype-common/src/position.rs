//! Position and location utilities.
//!
//! The scanner and parser work with byte offsets, while reports use
//! line/column positions. `LineMap` converts between the two.

use serde::{Deserialize, Serialize};

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column in UTF-16 code units
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Source location with both offset and line/column info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Byte offset from start of file
    pub offset: u32,
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column
    pub character: u32,
}

impl SourceLocation {
    pub fn new(offset: u32, line: u32, character: u32) -> Self {
        SourceLocation {
            offset,
            line,
            character,
        }
    }

    /// 1-based line number, as shown to users.
    pub fn display_line(&self) -> u32 {
        self.line + 1
    }

    /// 1-based column, as shown to users.
    pub fn display_column(&self) -> u32 {
        self.character + 1
    }
}

/// Line map for efficient offset <-> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];

        for i in memchr::memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                // \r\n - the \n will create the line start
                continue;
            }
            line_starts.push((i + 1) as u32);
        }

        LineMap { line_starts }
    }

    /// Convert a byte offset to a Position (line, character).
    /// Character is counted in UTF-16 code units.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = self.line_index(offset);
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");
        let character = slice.chars().map(|ch| ch.len_utf16() as u32).sum();

        Position {
            line: line as u32,
            character,
        }
    }

    /// Convert a byte offset to a full source location.
    pub fn location(&self, offset: u32, source: &str) -> SourceLocation {
        let position = self.offset_to_position(offset, source);
        SourceLocation::new(offset, position.line, position.character)
    }

    /// 0-indexed line containing `offset`.
    pub fn line_index(&self, offset: u32) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        }
    }

    /// 1-based line containing `offset`.
    pub fn line_number(&self, offset: u32) -> u32 {
        self.line_index(offset) as u32 + 1
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the starting offset of a line.
    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }

    /// Source text covering the 1-based lines `first..=last`.
    ///
    /// The terminator of the last line is not included.
    pub fn line_span_text<'a>(&self, source: &'a str, first: u32, last: u32) -> &'a str {
        let first_idx = first.saturating_sub(1) as usize;
        let last_idx = (last.saturating_sub(1) as usize).max(first_idx);
        let Some(start) = self.line_start(first_idx) else {
            return "";
        };
        let end = self
            .line_start(last_idx + 1)
            .map_or(source.len(), |next| next as usize);
        let text = source.get(start as usize..end).unwrap_or("");
        text.trim_end_matches(['\n', '\r'])
    }
}

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn test_line_map_simple() {
        let source = "line1\nline2\nline3";
        let map = LineMap::build(source);

        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
        assert_eq!(map.offset_to_position(4, source), Position::new(0, 4));
        assert_eq!(map.offset_to_position(6, source), Position::new(1, 0));
        assert_eq!(map.offset_to_position(12, source), Position::new(2, 0));
    }

    #[test]
    fn test_line_map_windows_line_endings() {
        let source = "line1\r\nline2\r\nline3";
        let map = LineMap::build(source);

        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(7, source), Position::new(1, 0));
        assert_eq!(map.line_number(8), 2);
    }

    #[test]
    fn test_columns_count_utf16_units() {
        let source = "let s = \"é😀\"; let t = 1;";
        let map = LineMap::build(source);
        let offset = source.find("let t").unwrap() as u32;
        // é is one UTF-16 unit, 😀 is two
        assert_eq!(map.offset_to_position(offset, source).character, 15);
    }

    #[test]
    fn test_line_span_text() {
        let source = "a\nb\r\nc\nd";
        let map = LineMap::build(source);
        assert_eq!(map.line_span_text(source, 2, 3), "b\r\nc");
        assert_eq!(map.line_span_text(source, 4, 4), "d");
        assert_eq!(map.line_span_text(source, 9, 9), "");
    }

    #[test]
    fn test_display_location_is_one_based() {
        let source = "x\n  y";
        let map = LineMap::build(source);
        let loc = map.location(4, source);
        assert_eq!((loc.display_line(), loc.display_column()), (2, 3));
    }
}
