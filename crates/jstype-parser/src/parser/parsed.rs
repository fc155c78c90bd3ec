//! A parsed file: the tree plus the trivia and line data needed to
//! attach comments to nodes and report locations.

use super::arena::NodeArena;
use super::base::NodeIndex;
use super::node::{Node, NodeData};
use jstype_common::{CommentRange, Diagnostic, LineMap, SourceLocation};
use rustc_hash::FxHashMap;

pub struct ParsedSource {
    pub file_name: String,
    pub source: String,
    pub arena: NodeArena,
    /// The `SourceFile` node
    pub root: NodeIndex,
    /// Every comment in the file, in source order
    pub comments: Vec<CommentRange>,
    pub(crate) leading_comments: FxHashMap<u32, (u32, u32)>,
    pub line_map: LineMap,
    /// Scan and parse errors, sorted by position
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedSource {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.arena.get(index)
    }

    /// Top-level statements of the file.
    pub fn statements(&self) -> &[NodeIndex] {
        match self.arena.get(self.root) {
            Some(Node {
                data: NodeData::SourceFile(file),
                ..
            }) => &file.statements,
            _ => &[],
        }
    }

    /// Comments directly before the token starting at `pos`.
    pub fn comments_before(&self, pos: u32) -> &[CommentRange] {
        match self.leading_comments.get(&pos) {
            Some(&(start, end)) => self
                .comments
                .get(start as usize..end as usize)
                .unwrap_or(&[]),
            None => &[],
        }
    }

    /// Leading comments of a node: the comments before its first token.
    pub fn leading_comments(&self, index: NodeIndex) -> &[CommentRange] {
        match self.arena.get(index) {
            Some(node) => self.comments_before(node.pos),
            None => &[],
        }
    }

    /// Source text of a node.
    pub fn text_of(&self, index: NodeIndex) -> &str {
        self.arena
            .get(index)
            .and_then(|node| self.source.get(node.pos as usize..node.end as usize))
            .unwrap_or("")
    }

    pub fn comment_text(&self, comment: &CommentRange) -> &str {
        comment.get_text(&self.source)
    }

    /// 1-based line of a byte offset.
    pub fn line_of(&self, pos: u32) -> u32 {
        self.line_map.line_number(pos)
    }

    /// Full location (0-based line, UTF-16 column) of a byte offset.
    pub fn location(&self, pos: u32) -> SourceLocation {
        self.line_map.location(pos, &self.source)
    }
}
