//! Tests for inline and JSDoc annotation extraction.

use super::*;
use crate::context::{CheckerContext, CheckerOptions};
use jstype_parser::{NodeData, parse};

/// Declarators of the `n`th top-level variable statement.
fn declarators(parsed: &ParsedSource, n: usize) -> Vec<NodeIndex> {
    match &parsed.node(parsed.statements()[n]).expect("statement").data {
        NodeData::VariableStatement(stmt) => stmt.declarations.clone(),
        other => panic!("expected variable statement, got {}", other.kind_name()),
    }
}

#[test]
fn inline_annotation_on_declarator_line() {
    let parsed = parse("a.js", "let age /*: Number */ = 42;");
    let annotation = inline_annotation(&parsed, declarators(&parsed, 0)[0]).unwrap();
    assert_eq!(annotation.raw_text, "Number");
    assert_eq!(annotation.declared_type, "number");
    assert!(!annotation.is_complex);
}

#[test]
fn inline_annotation_allows_inner_whitespace() {
    let parsed = parse("a.js", "let names /*  :  string[]  */ = [];");
    let annotation = inline_annotation(&parsed, declarators(&parsed, 0)[0]).unwrap();
    assert_eq!(annotation.declared_type, "string[]");
    assert!(annotation.is_complex);
}

#[test]
fn inline_annotation_spans_every_line_of_the_node() {
    let parsed = parse("a.js", "let xs = [\n  1,\n  2, /*: number[] */\n];\nlet y = 1;");
    let annotation = inline_annotation(&parsed, declarators(&parsed, 0)[0]).unwrap();
    assert_eq!(annotation.declared_type, "number[]");
    assert!(inline_annotation(&parsed, declarators(&parsed, 1)[0]).is_none());
}

#[test]
fn plain_comments_are_not_annotations() {
    let parsed = parse("a.js", "let a = 1; // : number\nlet b = 2; /* number */");
    assert!(inline_annotation(&parsed, declarators(&parsed, 0)[0]).is_none());
    assert!(inline_annotation(&parsed, declarators(&parsed, 1)[0]).is_none());
}

#[test]
fn jsdoc_type_tag_on_line_above() {
    let parsed = parse("a.js", "/** @type {string} */\nlet name = 'x';");
    let options = CheckerOptions::default();
    let ctx = CheckerContext::new(&parsed, &options);

    let declarator = declarators(&parsed, 0)[0];
    let comments = ctx.declarator_comments(declarator);
    assert_eq!(comments.len(), 1, "leading and line-above candidates are merged");

    let annotation = type_tag_annotation(&parsed, &comments).unwrap();
    assert_eq!(annotation.declared_type, "string");
}

#[test]
fn later_declarators_only_see_their_own_comments() {
    let parsed = parse(
        "a.js",
        "/** @type {number} */\nlet a = 1,\n    /** @type {string} */ b = 'x',\n\n    c = 2;",
    );
    let options = CheckerOptions::default();
    let ctx = CheckerContext::new(&parsed, &options);
    let list = declarators(&parsed, 0);

    let first = type_tag_annotation(&parsed, &ctx.declarator_comments(list[0])).unwrap();
    assert_eq!(first.declared_type, "number");
    let second = type_tag_annotation(&parsed, &ctx.declarator_comments(list[1])).unwrap();
    assert_eq!(second.declared_type, "string");
    assert!(ctx.declarator_comments(list[2]).is_empty());
}

#[test]
fn only_doc_blocks_count_as_line_above_candidates() {
    let parsed = parse("a.js", "/** far */\n/* plain */\nlet a = 1;");
    assert_eq!(doc_blocks_ending_above(&parsed, 3).count(), 0);

    let parsed = parse("a.js", "/* plain */\n/** doc */\nlet a = 1;");
    let blocks: Vec<_> = doc_blocks_ending_above(&parsed, 3).collect();
    assert_eq!(blocks.len(), 1);
    assert_eq!(parsed.comment_text(blocks[0]), "/** doc */");
    assert_eq!(doc_blocks_ending_above(&parsed, 1).count(), 0);
}

#[test]
fn collects_param_and_return_tags() {
    let parsed = parse(
        "a.js",
        "/**\n * @param {Number} a first\n * @param { string } b\n * @return {Array}\n * @returns {number}\n */\nfunction f(a, b) {}",
    );
    let comments: Vec<_> = parsed.comments.iter().collect();
    let tags = function_tags(&parsed, &comments);
    assert_eq!(
        tags.params,
        vec![
            ("a".to_string(), "number".to_string()),
            ("b".to_string(), "string".to_string()),
        ]
    );
    assert_eq!(tags.returns.as_deref(), Some("array"));
    assert!(!tags.is_empty());
}

#[test]
fn tag_mentions_without_braces_are_ignored() {
    let parsed = parse("a.js", "// no JSDoc @returns here\nfunction f() {}");
    let comments: Vec<_> = parsed.comments.iter().collect();
    assert!(function_tags(&parsed, &comments).is_empty());
}
