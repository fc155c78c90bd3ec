//! Annotation extraction.
//!
//! Two surface forms are recognised:
//! - inline comments, `let x /*: number */ = 1;`, found anywhere on the
//!   source lines a node spans;
//! - JSDoc tags, `/** @type {number} */`, `@param {T} name` and
//!   `@returns {T}`, found in comments attached to a declaration.
//!
//! Everything here is a pure function of the parsed file.

use jstype_common::CommentRange;
use jstype_parser::{NodeIndex, ParsedSource};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Annotation;

static INLINE_ANNOTATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*\s*:\s*([\w\[\]<>|&]+)\s*\*/").expect("valid regex"));

static TYPE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@type\s*\{\s*([\w\[\]<>|&]+)\s*\}").expect("valid regex"));

static RETURNS_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@returns?\s*\{\s*([^}]+)\s*\}").expect("valid regex"));

static PARAM_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@param\s*\{\s*([^}]+)\s*\}\s*(\w+)").expect("valid regex"));

/// Inline `/*: type */` annotation on the lines spanned by `node`.
///
/// The first match on those lines wins, even when it sits beside a
/// different declarator sharing the line.
pub fn inline_annotation(parsed: &ParsedSource, node: NodeIndex) -> Option<Annotation> {
    let span = parsed.node(node)?;
    let first = parsed.line_of(span.pos);
    let last = parsed.line_of(span.end);
    let text = parsed.line_map.line_span_text(&parsed.source, first, last);
    INLINE_ANNOTATION_RE
        .captures(text)
        .map(|caps| Annotation::parse(&caps[1]))
}

/// First `@type {T}` tag among `comments`.
pub fn type_tag_annotation(
    parsed: &ParsedSource,
    comments: &[&CommentRange],
) -> Option<Annotation> {
    comments.iter().find_map(|comment| {
        TYPE_TAG_RE
            .captures(parsed.comment_text(comment))
            .map(|caps| Annotation::parse(&caps[1]))
    })
}

/// JSDoc tags describing a function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionTags {
    /// `(name, lower-cased type)` for every `@param`, in comment order
    pub params: Vec<(String, String)>,
    /// Lower-cased type of the first `@returns`/`@return`
    pub returns: Option<String>,
}

impl FunctionTags {
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.returns.is_none()
    }
}

/// Collect `@param` and `@returns` tags from `comments`.
///
/// Parameter tags are not validated against the function's actual
/// parameter list.
pub fn function_tags(parsed: &ParsedSource, comments: &[&CommentRange]) -> FunctionTags {
    let mut tags = FunctionTags::default();
    for comment in comments {
        let text = parsed.comment_text(comment);
        if tags.returns.is_none() {
            tags.returns = RETURNS_TAG_RE
                .captures(text)
                .map(|caps| caps[1].trim().to_lowercase());
        }
        for caps in PARAM_TAG_RE.captures_iter(text) {
            tags.params
                .push((caps[2].to_string(), caps[1].trim().to_lowercase()));
        }
    }
    tags
}

/// Doc blocks (`/** ... */`) that end on the line directly above `line`.
pub fn doc_blocks_ending_above(
    parsed: &ParsedSource,
    line: u32,
) -> impl Iterator<Item = &CommentRange> {
    parsed.comments.iter().filter(move |comment| {
        line > 1
            && parsed.line_of(comment.end) == line - 1
            && comment.is_doc_block(&parsed.source)
    })
}

/// Append `comment` unless a comment at the same offset is already present.
pub(crate) fn push_unique<'a>(list: &mut Vec<&'a CommentRange>, comment: &'a CommentRange) {
    if !list.iter().any(|existing| existing.pos == comment.pos) {
        list.push(comment);
    }
}

#[cfg(test)]
#[path = "tests/annotations_tests.rs"]
mod tests;
