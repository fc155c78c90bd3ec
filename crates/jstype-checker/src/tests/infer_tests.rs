//! Tests for expression type inference.

use super::*;
use crate::bindings::Binding;
use crate::context::{CheckerContext, CheckerOptions};
use crate::signatures::FunctionSignature;
use jstype_parser::{ParsedSource, parse};

/// Initializer of the first declarator of every top-level statement.
fn initializers(parsed: &ParsedSource) -> Vec<NodeIndex> {
    parsed
        .statements()
        .iter()
        .map(|&stmt| {
            let NodeData::VariableStatement(var) = &parsed.node(stmt).unwrap().data else {
                panic!("expected variable statement");
            };
            match &parsed.node(var.declarations[0]).unwrap().data {
                NodeData::VariableDeclaration(decl) => decl.initializer,
                other => panic!("expected declaration, got {}", other.kind_name()),
            }
        })
        .collect()
}

#[test]
fn maps_expression_shapes() {
    let parsed = parse(
        "a.js",
        r#"
let s = "x";
let t = `a${b}`;
let n = 1.5;
let b = true;
let z = null;
let o = {};
let arr = [1];
let f = function () {};
let g = () => 1;
let u = void 0;
let r = someName;
let c = compute();
let p = ("x");
let neg = -1;
"#,
    );
    assert!(!parsed.has_errors());
    let options = CheckerOptions::default();
    let ctx = CheckerContext::new(&parsed, &options);

    let inferred: Vec<_> = initializers(&parsed)
        .into_iter()
        .map(|init| infer_expression(&ctx, init, None).as_str().to_string())
        .collect();
    assert_eq!(
        inferred,
        vec![
            "string",
            "string",
            "number",
            "boolean",
            "null",
            "object",
            "array",
            "function",
            "function",
            "undefined",
            "reference",
            "unknown",
            "string",
            "unknown",
        ]
    );
}

#[test]
fn array_literal_echoes_array_annotation() {
    let parsed = parse("a.js", "let xs = [1, 2];");
    let options = CheckerOptions::default();
    let ctx = CheckerContext::new(&parsed, &options);
    let init = initializers(&parsed)[0];

    let array = Annotation::parse("Number[]");
    assert_eq!(
        infer_expression(&ctx, init, Some(&array)),
        SemanticType::Complex("number[]".to_string())
    );
    let union = Annotation::parse("array|null");
    assert_eq!(infer_expression(&ctx, init, Some(&union)), SemanticType::Array);
    let plain = Annotation::parse("array");
    assert_eq!(infer_expression(&ctx, init, Some(&plain)), SemanticType::Array);
}

#[test]
fn identifiers_resolve_through_bindings() {
    let parsed = parse("a.js", "let x = a;\nlet y = b;");
    let options = CheckerOptions::default();
    let mut ctx = CheckerContext::new(&parsed, &options);
    ctx.bindings.declare(Binding::new(
        "a",
        &Annotation::parse("number|string"),
        SemanticType::String,
    ));

    let inits = initializers(&parsed);
    assert_eq!(infer_expression(&ctx, inits[0], None), SemanticType::String);
    assert_eq!(infer_expression(&ctx, inits[1], None), SemanticType::Reference);
}

#[test]
fn calls_use_registered_return_types() {
    let parsed = parse("a.js", "let a = helper();\nlet b = other();\nlet c = obj.helper();");
    let options = CheckerOptions::default();
    let mut ctx = CheckerContext::new(&parsed, &options);
    ctx.signatures.register(FunctionSignature {
        name: "helper".to_string(),
        params: Vec::new(),
        return_type: Some(SemanticType::Array),
    });

    let inits = initializers(&parsed);
    assert_eq!(infer_expression(&ctx, inits[0], None), SemanticType::Array);
    assert_eq!(infer_expression(&ctx, inits[1], None), SemanticType::Unknown);
    assert_eq!(infer_expression(&ctx, inits[2], None), SemanticType::Unknown);
}

#[test]
fn display_values_for_literals_and_names() {
    let parsed = parse("a.js", "let a = \"twenty\";\nlet b = 42;\nlet c = false;\nlet d = x;\nlet e = {};");
    let options = CheckerOptions::default();
    let ctx = CheckerContext::new(&parsed, &options);

    let values: Vec<_> = initializers(&parsed)
        .into_iter()
        .map(|init| display_value(&ctx, init))
        .collect();
    assert_eq!(
        values,
        vec![
            Some("twenty".to_string()),
            Some("42".to_string()),
            Some("false".to_string()),
            Some("x".to_string()),
            None,
        ]
    );
}

#[test]
fn element_types_only_know_literals() {
    let parsed = parse("a.js", "let xs = [\"s\", 1, true, x, [1]];");
    let options = CheckerOptions::default();
    let ctx = CheckerContext::new(&parsed, &options);
    let NodeData::ArrayLiteralExpression(array) = &parsed.node(initializers(&parsed)[0]).unwrap().data
    else {
        panic!("expected array literal");
    };

    let types: Vec<_> = array
        .elements
        .iter()
        .map(|&e| literal_element_type(&ctx, e))
        .collect();
    assert_eq!(
        types,
        vec![
            SemanticType::String,
            SemanticType::Number,
            SemanticType::Boolean,
            SemanticType::Unknown,
            SemanticType::Unknown,
        ]
    );
}
