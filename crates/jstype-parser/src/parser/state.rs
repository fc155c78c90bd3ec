//! Parser state: token cursor, diagnostics and speculation helpers.
//!
//! Parsing methods live in `state_statements.rs`, `state_expressions.rs`
//! and `state_jsx.rs`; this file holds what they share.

use super::arena::NodeArena;
use super::base::NodeIndex;
use super::node::NodeData;
use super::parsed::ParsedSource;
use jstype_common::{Diagnostic, LineMap};
use jstype_scanner::{ScannerSnapshot, ScannerState, SyntaxKind};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Inside an async function body: `await` is an operator.
pub const CONTEXT_FLAG_ASYNC: u32 = 1 << 0;
/// Inside a generator body: `yield` is an operator.
pub const CONTEXT_FLAG_GENERATOR: u32 = 1 << 1;
/// Parsing a `for` initializer: `in` is not a binary operator.
pub const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 2;

/// Deepest nesting of statements and expressions the parser accepts.
pub const MAX_RECURSION_DEPTH: u32 = 1000;

// Remaining stack below which a guarded production moves to a fresh segment.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Saved parser position for speculative parsing.
pub(crate) struct ParserSnapshot {
    scanner: ScannerSnapshot,
    arena_len: usize,
    diagnostics_len: usize,
    leading_len: usize,
    prev_token_end: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) context_flags: u32,
    pub(crate) parse_diagnostics: Vec<Diagnostic>,
    /// (token start, comment range) for each consumed token with leading
    /// comments, in token order
    leading_comments: Vec<(u32, u32, u32)>,
    /// End of the most recently consumed token
    prev_token_end: u32,
    /// Guarded productions currently on the stack
    recursion_depth: u32,
}

impl ParserState {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> ParserState {
        ParserState {
            scanner: ScannerState::new(source.into()),
            arena: NodeArena::new(),
            file_name: file_name.into(),
            context_flags: 0,
            parse_diagnostics: Vec::new(),
            leading_comments: Vec::new(),
            prev_token_end: 0,
            recursion_depth: 0,
        }
    }

    /// Parse the whole input and package the tree with its trivia.
    pub fn parse(mut self) -> ParsedSource {
        let _span = tracing::debug_span!("parse", file = %self.file_name).entered();
        let root = self.parse_source_file();
        self.finish(root)
    }

    fn finish(self, root: NodeIndex) -> ParsedSource {
        let ParserState {
            scanner,
            arena,
            file_name,
            parse_diagnostics,
            leading_comments,
            ..
        } = self;
        let (source, comments, scan_errors) = scanner.into_parts();

        let mut diagnostics: Vec<Diagnostic> = scan_errors
            .into_iter()
            .map(|err| Diagnostic::error(file_name.clone(), err.pos, err.length, err.message))
            .collect();
        diagnostics.extend(parse_diagnostics);
        diagnostics.sort_by_key(|d| d.start);
        diagnostics.dedup_by(|a, b| a.start == b.start);

        debug!(
            nodes = arena.len(),
            comments = comments.len(),
            errors = diagnostics.len(),
            "parsed"
        );

        let leading_comments: FxHashMap<u32, (u32, u32)> = leading_comments
            .into_iter()
            .map(|(pos, start, end)| (pos, (start, end)))
            .collect();
        let line_map = LineMap::build(&source);
        ParsedSource {
            file_name,
            source,
            arena,
            root,
            comments,
            leading_comments,
            line_map,
            diagnostics,
        }
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end()
    }

    /// End of the last consumed token; the end of a node being finished.
    #[inline]
    pub(crate) fn prev_token_end(&self) -> u32 {
        self.prev_token_end
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.scanner.token() == kind
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Advance to the next token and record its leading comments.
    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        let kind = self.scanner.scan();
        self.record_leading_comments();
        kind
    }

    fn record_leading_comments(&mut self) {
        let (start, end) = self.scanner.leading_comment_range();
        if start < end {
            self.leading_comments
                .push((self.scanner.token_pos(), start, end));
        }
    }

    /// Re-read the current `/` as a regular expression.
    pub(crate) fn rescan_slash_token(&mut self) -> SyntaxKind {
        self.scanner.rescan_slash_token()
    }

    /// Re-read the current `}` as a template continuation.
    pub(crate) fn rescan_template_token(&mut self) -> SyntaxKind {
        self.scanner.rescan_template_token()
    }

    /// Advance inside JSX element children, where text is a token.
    pub(crate) fn next_jsx_child_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        let kind = self.scanner.scan_jsx_token();
        self.record_leading_comments();
        kind
    }

    /// Consume the token if it matches.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume the token, reporting `'x' expected.` if it is missing.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.parse_error_at_current_token(&format!("'{}' expected.", kind.text()));
        false
    }

    /// Whether a statement can end here under automatic semicolon insertion.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.parse_error_at_current_token("';' expected.");
        }
    }

    /// Identifier, or a contextual keyword used as one.
    pub(crate) fn is_identifier(&self) -> bool {
        let token = self.token();
        if token == SyntaxKind::Identifier {
            return true;
        }
        match token {
            SyntaxKind::AwaitKeyword => !self.in_async_context(),
            SyntaxKind::YieldKeyword => !self.in_generator_context(),
            kind => kind.is_contextual_keyword(),
        }
    }

    pub(crate) fn in_async_context(&self) -> bool {
        self.context_flags & CONTEXT_FLAG_ASYNC != 0
    }

    pub(crate) fn in_generator_context(&self) -> bool {
        self.context_flags & CONTEXT_FLAG_GENERATOR != 0
    }

    pub(crate) fn in_disallow_in_context(&self) -> bool {
        self.context_flags & CONTEXT_FLAG_DISALLOW_IN != 0
    }

    /// Run `f` with `set` flags added and `clear` flags removed.
    pub(crate) fn with_context<T>(
        &mut self,
        set: u32,
        clear: u32,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context_flags;
        self.context_flags = (saved | set) & !clear;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    /// Run a recursive production one level deeper.
    ///
    /// Past `MAX_RECURSION_DEPTH` this reports an error, skips the rest of
    /// the input and returns `NodeIndex::NONE`, so every enclosing
    /// production unwinds at end of file.
    pub(crate) fn with_recursion_guard(
        &mut self,
        f: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.parse_error_at_current_token("Maximum nesting depth exceeded.");
            self.skip_to_end_of_file();
            return NodeIndex::NONE;
        }
        self.recursion_depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || f(self));
        self.recursion_depth -= 1;
        result
    }

    fn skip_to_end_of_file(&mut self) {
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            self.next_token();
        }
    }

    // =========================================================================
    // Node construction
    // =========================================================================

    /// Add a node spanning `start` to the end of the last consumed token.
    pub(crate) fn finish_node(&mut self, start: u32, data: NodeData) -> NodeIndex {
        let end = self.prev_token_end.max(start);
        self.arena.add(start, end, data)
    }

    /// Consume an identifier and return its node, reporting
    /// `Identifier expected.` when the current token is not one.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.is_identifier() {
            return self.parse_identifier_name();
        }
        self.parse_error_at_current_token("Identifier expected.");
        NodeIndex::NONE
    }

    /// Consume any identifier or keyword (property name position).
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let text = self.scanner.token_value().to_string();
        self.next_token();
        self.finish_node(
            start,
            NodeData::Identifier(super::node::IdentifierData { escaped_text: text }),
        )
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str) {
        // One error per position; cascades after the first are noise.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        self.parse_diagnostics
            .push(Diagnostic::error(self.file_name.clone(), start, length, message));
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message);
    }

    pub(crate) fn has_new_errors_since(&self, snapshot: &ParserSnapshot) -> bool {
        self.parse_diagnostics.len() > snapshot.diagnostics_len
            || self.scanner.errors().len() > snapshot.scanner_error_count()
    }

    // =========================================================================
    // Speculation
    // =========================================================================

    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.snapshot(),
            arena_len: self.arena.len(),
            diagnostics_len: self.parse_diagnostics.len(),
            leading_len: self.leading_comments.len(),
            prev_token_end: self.prev_token_end,
        }
    }

    /// Roll back to `snapshot`, dropping nodes and errors created since.
    pub(crate) fn restore(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore(snapshot.scanner);
        self.arena.nodes.truncate(snapshot.arena_len);
        self.parse_diagnostics.truncate(snapshot.diagnostics_len);
        self.leading_comments.truncate(snapshot.leading_len);
        self.prev_token_end = snapshot.prev_token_end;
    }

    /// Evaluate `f` against the upcoming tokens without consuming them.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    /// Look ahead to see if the next token is on the same line and satisfies `pred`.
    pub(crate) fn look_ahead_next_on_same_line(
        &mut self,
        pred: impl FnOnce(SyntaxKind) -> bool,
    ) -> bool {
        self.look_ahead(|p| {
            let next = p.next_token();
            !p.has_preceding_line_break() && pred(next)
        })
    }

    /// Look ahead to see if the next token satisfies `pred`.
    pub(crate) fn look_ahead_next(&mut self, pred: impl FnOnce(SyntaxKind) -> bool) -> bool {
        self.look_ahead(|p| {
            let next = p.next_token();
            pred(next)
        })
    }
}

impl ParserSnapshot {
    fn scanner_error_count(&self) -> usize {
        self.scanner.error_count()
    }
}
