//! Tests for declared/inferred compatibility.

use super::*;
use crate::bindings::Binding;
use crate::context::CheckerOptions;
use crate::infer::infer_expression;
use jstype_parser::{ParsedSource, parse};

fn initializer(parsed: &ParsedSource) -> NodeIndex {
    let NodeData::VariableStatement(var) = &parsed.node(parsed.statements()[0]).unwrap().data
    else {
        panic!("expected variable statement");
    };
    match &parsed.node(var.declarations[0]).unwrap().data {
        NodeData::VariableDeclaration(decl) => decl.initializer,
        other => panic!("expected declaration, got {}", other.kind_name()),
    }
}

/// Whether `let v = <expr>;` satisfies `declared`.
fn matches(expr: &str, declared: &str) -> bool {
    let parsed = parse("a.js", format!("let v = {expr};"));
    assert!(!parsed.has_errors(), "{expr} should parse");
    let options = CheckerOptions::default();
    let ctx = CheckerContext::new(&parsed, &options);
    let value = initializer(&parsed);
    let annotation = Annotation::parse(declared);
    let inferred = infer_expression(&ctx, value, Some(&annotation));
    is_compatible(&ctx, &annotation, &inferred, value)
}

#[test]
fn simple_types_compare_by_name() {
    assert!(matches("\"Alice\"", "string"));
    assert!(!matches("\"twenty\"", "number"));
    assert!(matches("42", "Number"));
    assert!(matches("void 0", "undefined"));
    assert!(!matches("undefinedValue", "undefined"));
}

#[test]
fn array_suffix_checks_first_element() {
    assert!(matches("[]", "number[]"));
    assert!(matches("[1, 2, \"three\"]", "number[]"));
    assert!(!matches("[\"one\", 2]", "number[]"));
    assert!(matches("[true, 1]", "boolean[]"));
    assert!(!matches("[[1]]", "number[]"));
    assert!(!matches("[x]", "number[]"));
    assert!(matches("([1])", "number[]"));
}

#[test]
fn array_suffix_rejects_non_arrays() {
    assert!(!matches("{}", "number[]"));
    assert!(!matches("\"1,2\"", "string[]"));
    assert!(!matches("unknownName", "string[]"));
}

#[test]
fn array_typed_identifier_skips_element_check() {
    let parsed = parse("a.js", "let v = xs;");
    let options = CheckerOptions::default();
    let mut ctx = CheckerContext::new(&parsed, &options);
    ctx.bindings.declare(Binding::new(
        "xs",
        &Annotation::parse("array"),
        SemanticType::Array,
    ));

    let value = initializer(&parsed);
    let annotation = Annotation::parse("string[]");
    let inferred = infer_expression(&ctx, value, Some(&annotation));
    assert_eq!(inferred, SemanticType::Array);
    assert!(is_compatible(&ctx, &annotation, &inferred, value));
}

#[test]
fn unions_accept_any_member() {
    assert!(matches("42", "string|number"));
    assert!(matches("\"s\"", "string|number"));
    assert!(!matches("true", "string|number"));
    assert!(matches("null", "Object|NULL"));
}

#[test]
fn other_composites_never_match() {
    assert!(!matches("{}", "Map<string>"));
    assert!(!matches("1", "number&string"));
}
