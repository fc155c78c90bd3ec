//! Skip directives.
//!
//! - a comment whose trimmed body is exactly `: skip` turns checking off
//!   for the whole file;
//! - the first line containing `/*: skip-remaining */` sets a threshold,
//!   and checks starting on a later line are dropped.

use jstype_parser::ParsedSource;
use memchr::memmem;

const FILE_SKIP_BODY: &str = ": skip";
const SKIP_REMAINING_MARKER: &str = "/*: skip-remaining */";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkipState {
    pub file_skipped: bool,
    /// 1-based line of the first `skip-remaining` marker
    pub skip_remaining_line: Option<u32>,
}

impl SkipState {
    pub fn scan(parsed: &ParsedSource) -> Self {
        let file_skipped = parsed
            .comments
            .iter()
            .any(|comment| comment.body(&parsed.source).trim() == FILE_SKIP_BODY);

        // Plain text scan: the marker counts even where the tree would not
        // see a comment.
        let skip_remaining_line =
            memmem::find(parsed.source.as_bytes(), SKIP_REMAINING_MARKER.as_bytes())
                .map(|offset| parsed.line_of(offset as u32));

        SkipState {
            file_skipped,
            skip_remaining_line,
        }
    }

    /// Whether a check starting on `line` is past the skip-remaining marker.
    pub fn is_suppressed(&self, line: u32) -> bool {
        self.skip_remaining_line.is_some_and(|threshold| line > threshold)
    }
}
