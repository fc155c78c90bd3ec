//! Comment ranges.
//!
//! Comments are not part of the AST. The scanner records every comment it
//! skips as a `CommentRange`, and the parser attaches them to the token that
//! follows as leading trivia.

use serde::{Deserialize, Serialize};

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset, exclusive)
    pub end: u32,
    /// Whether this is a `/* */` comment
    pub is_multi_line: bool,
    /// Whether this comment has a trailing newline
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    /// Create a new comment range.
    pub fn new(pos: u32, end: u32, is_multi_line: bool, has_trailing_new_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
            has_trailing_new_line,
        }
    }

    /// Get the comment text from source, delimiters included.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        let start = self.pos as usize;
        let end = self.end as usize;
        if end <= source.len() && start < end {
            &source[start..end]
        } else {
            ""
        }
    }

    /// Get the comment body without its `//` or `/* */` delimiters.
    ///
    /// An unterminated block comment has no closing delimiter to strip.
    pub fn body<'a>(&self, source: &'a str) -> &'a str {
        let text = self.get_text(source);
        if self.is_multi_line {
            let inner = text.strip_prefix("/*").unwrap_or(text);
            inner.strip_suffix("*/").unwrap_or(inner)
        } else {
            text.strip_prefix("//").unwrap_or(text)
        }
    }

    /// Whether this is a block comment whose trimmed body begins with `*`
    /// (`/** ... */` doc blocks and their `/*** ... */` variants).
    pub fn is_doc_block(&self, source: &str) -> bool {
        self.is_multi_line && self.body(source).trim().starts_with('*')
    }
}
