//! Checker Context
//!
//! Holds the per-file state used throughout checking: the parsed file, the
//! parent links of its tree, the binding tracker, the signature registry,
//! the skip directives, and the mismatches found so far. A context is
//! created for one file and dropped with it.

use jstype_common::CommentRange;
use jstype_parser::{NodeArena, NodeData, NodeIndex, ParsedSource};

use crate::annotations::{doc_blocks_ending_above, push_unique};
use crate::bindings::BindingTracker;
use crate::directives::SkipState;
use crate::outcome::{MismatchKind, TypeMismatch};
use crate::signatures::SignatureRegistry;

/// Options that change what gets checked.
#[derive(Debug, Clone, Default)]
pub struct CheckerOptions {
    /// Track unannotated declarations using the type of their initializer.
    pub infer: bool,
}

pub struct CheckerContext<'a> {
    pub parsed: &'a ParsedSource,
    pub options: &'a CheckerOptions,
    /// Parent of each node, indexed by node id. `NONE` for the root.
    parents: Vec<NodeIndex>,
    pub bindings: BindingTracker,
    pub signatures: SignatureRegistry,
    pub skip: SkipState,
    pub mismatches: Vec<TypeMismatch>,
    pub checks_performed: usize,
}

impl<'a> CheckerContext<'a> {
    pub fn new(parsed: &'a ParsedSource, options: &'a CheckerOptions) -> Self {
        CheckerContext {
            parsed,
            options,
            parents: build_parent_links(parsed),
            bindings: BindingTracker::new(),
            signatures: SignatureRegistry::new(),
            skip: SkipState::scan(parsed),
            mismatches: Vec::new(),
            checks_performed: 0,
        }
    }

    pub fn arena(&self) -> &'a NodeArena {
        &self.parsed.arena
    }

    pub fn parent_of(&self, node: NodeIndex) -> NodeIndex {
        self.parents
            .get(node.0 as usize)
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    /// 1-based line a node starts on.
    pub fn line_of(&self, node: NodeIndex) -> u32 {
        self.parsed
            .node(node)
            .map_or(0, |n| self.parsed.line_of(n.pos))
    }

    /// Whether a check anchored at `node` falls past the skip-remaining line.
    pub fn is_suppressed(&self, node: NodeIndex) -> bool {
        self.skip.is_suppressed(self.line_of(node))
    }

    /// Comments attached to a statement-level node, including those in front
    /// of an `export` that wraps it.
    pub fn statement_comments(&self, node: NodeIndex) -> Vec<&'a CommentRange> {
        let mut comments: Vec<&'a CommentRange> = Vec::new();
        let parent = self.parent_of(node);
        if let Some(NodeData::ExportDeclaration(export)) =
            self.parsed.node(parent).map(|n| &n.data)
            && export.declaration == node
        {
            comments.extend(self.parsed.leading_comments(parent));
        }
        for comment in self.parsed.leading_comments(node) {
            push_unique(&mut comments, comment);
        }
        comments
    }

    /// JSDoc candidates for a variable declarator, in priority order: its
    /// own leading comments, the statement's comments when it is the first
    /// declarator, then doc blocks ending on the line above it.
    pub fn declarator_comments(&self, declarator: NodeIndex) -> Vec<&'a CommentRange> {
        let mut comments: Vec<&'a CommentRange> =
            self.parsed.leading_comments(declarator).iter().collect();

        let statement = self.parent_of(declarator);
        if let Some(NodeData::VariableStatement(var)) =
            self.parsed.node(statement).map(|n| &n.data)
            && var.declarations.first() == Some(&declarator)
        {
            for comment in self.statement_comments(statement) {
                push_unique(&mut comments, comment);
            }
        }

        for comment in doc_blocks_ending_above(self.parsed, self.line_of(declarator)) {
            push_unique(&mut comments, comment);
        }
        comments
    }

    /// Comments describing a function declaration: its statement comments
    /// plus doc blocks ending on the line above it.
    pub fn function_comments(&self, function: NodeIndex) -> Vec<&'a CommentRange> {
        let mut comments = self.statement_comments(function);
        for comment in doc_blocks_ending_above(self.parsed, self.line_of(function)) {
            push_unique(&mut comments, comment);
        }
        comments
    }

    /// Record a failed match at `node`.
    pub fn report_mismatch(
        &mut self,
        node: NodeIndex,
        kind: MismatchKind,
        subject: &str,
        expected: &str,
        found: &str,
        value: Option<String>,
    ) {
        let Some(pos) = self.parsed.node(node).map(|n| n.pos) else {
            return;
        };
        let location = self.parsed.location(pos);
        tracing::debug!(
            line = location.display_line(),
            column = location.display_column(),
            subject,
            expected,
            found,
            "type mismatch"
        );
        self.mismatches.push(TypeMismatch {
            file: self.parsed.file_name.clone(),
            line: location.display_line(),
            column: location.display_column(),
            kind,
            subject: subject.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
            value,
        });
    }
}

fn build_parent_links(parsed: &ParsedSource) -> Vec<NodeIndex> {
    let mut parents = vec![NodeIndex::NONE; parsed.arena.len()];
    let mut stack = vec![parsed.root];
    while let Some(node) = stack.pop() {
        for child in parsed.arena.children(node) {
            if let Some(slot) = parents.get_mut(child.0 as usize) {
                *slot = node;
            }
            stack.push(child);
        }
    }
    parents
}
