//! Tests for statement and declaration parsing.

use crate::parser::node::{MethodKind, VariableKind};
use crate::parser::{NodeData, NodeIndex, ParsedSource, ParserState};

fn parse_source(source: &str) -> ParsedSource {
    ParserState::new("test.js", source).parse()
}

fn data(parsed: &ParsedSource, index: NodeIndex) -> &NodeData {
    &parsed.node(index).expect("node").data
}

fn statement_kinds(parsed: &ParsedSource) -> Vec<&'static str> {
    parsed
        .statements()
        .iter()
        .map(|&stmt| data(parsed, stmt).kind_name())
        .collect()
}

fn assert_no_errors(parsed: &ParsedSource) {
    assert!(
        parsed.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        parsed.diagnostics
    );
}

#[test]
fn parses_annotated_variable_declaration() {
    let parsed = parse_source("let age /*: number */ = 42;");
    assert_no_errors(&parsed);
    assert_eq!(parsed.statements().len(), 1);

    let NodeData::VariableStatement(stmt) = data(&parsed, parsed.statements()[0]) else {
        panic!("expected variable statement");
    };
    assert_eq!(stmt.kind, VariableKind::Let);
    assert_eq!(stmt.declarations.len(), 1);

    let declaration = stmt.declarations[0];
    let NodeData::VariableDeclaration(decl) = data(&parsed, declaration) else {
        panic!("expected declaration");
    };
    assert_eq!(parsed.arena.get_identifier_text(decl.name), Some("age"));
    assert!(matches!(
        data(&parsed, decl.initializer),
        NodeData::NumericLiteral(lit) if lit.text == "42"
    ));
    assert_eq!(parsed.node(declaration).unwrap().pos, 4);
    assert_eq!(parsed.text_of(declaration), "age /*: number */ = 42");
    assert_eq!(parsed.text_of(parsed.statements()[0]), "let age /*: number */ = 42;");
}

#[test]
fn attaches_jsdoc_to_statement() {
    let source = "/** @type {string} */\nconst name = 'x';";
    let parsed = parse_source(source);
    assert_no_errors(&parsed);

    let statement = parsed.statements()[0];
    let comments = parsed.leading_comments(statement);
    assert_eq!(comments.len(), 1);
    assert!(parsed.comment_text(&comments[0]).starts_with("/**"));
    assert!(comments[0].is_doc_block(source));

    let NodeData::VariableStatement(stmt) = data(&parsed, statement) else {
        panic!("expected variable statement");
    };
    assert_eq!(stmt.kind, VariableKind::Const);
    assert!(parsed.leading_comments(stmt.declarations[0]).is_empty());
    assert_eq!(parsed.line_of(parsed.node(statement).unwrap().pos), 2);
}

#[test]
fn parses_destructuring_declarators() {
    let parsed = parse_source("var a = 1, {b, c: [d]} = o, [e, , ...f] = g;");
    assert_no_errors(&parsed);

    let NodeData::VariableStatement(stmt) = data(&parsed, parsed.statements()[0]) else {
        panic!("expected variable statement");
    };
    assert_eq!(stmt.kind, VariableKind::Var);
    assert_eq!(stmt.declarations.len(), 3);

    let NodeData::VariableDeclaration(second) = data(&parsed, stmt.declarations[1]) else {
        panic!("expected declaration");
    };
    let NodeData::ObjectBindingPattern(object) = data(&parsed, second.name) else {
        panic!("expected object pattern");
    };
    assert_eq!(object.elements.len(), 2);

    let NodeData::VariableDeclaration(third) = data(&parsed, stmt.declarations[2]) else {
        panic!("expected declaration");
    };
    let NodeData::ArrayBindingPattern(array) = data(&parsed, third.name) else {
        panic!("expected array pattern");
    };
    assert_eq!(array.elements.len(), 3);
    assert!(matches!(data(&parsed, array.elements[1]), NodeData::OmittedExpression));
    assert!(matches!(
        data(&parsed, array.elements[2]),
        NodeData::BindingElement(element) if element.is_rest
    ));
}

#[test]
fn parses_function_declaration_with_parameters() {
    let parsed = parse_source("function f(a, b = 2, ...rest) { return a; }");
    assert_no_errors(&parsed);

    let NodeData::FunctionDeclaration(func) = data(&parsed, parsed.statements()[0]) else {
        panic!("expected function declaration");
    };
    assert_eq!(parsed.arena.get_identifier_text(func.name), Some("f"));
    assert_eq!(func.parameters.len(), 3);
    assert!(!func.is_async);

    let NodeData::Parameter(second) = data(&parsed, func.parameters[1]) else {
        panic!("expected parameter");
    };
    assert!(second.initializer.is_some());
    let NodeData::Parameter(third) = data(&parsed, func.parameters[2]) else {
        panic!("expected parameter");
    };
    assert!(third.is_rest);

    let NodeData::Block(body) = data(&parsed, func.body) else {
        panic!("expected block body");
    };
    assert!(matches!(data(&parsed, body.statements[0]), NodeData::ReturnStatement(_)));
}

#[test]
fn parses_async_generator_body() {
    let parsed = parse_source("async function* gen() { yield 1; await x; }");
    assert_no_errors(&parsed);

    let NodeData::FunctionDeclaration(func) = data(&parsed, parsed.statements()[0]) else {
        panic!("expected function declaration");
    };
    assert!(func.is_async);
    assert!(func.is_generator);

    let NodeData::Block(body) = data(&parsed, func.body) else {
        panic!("expected block body");
    };
    let kinds: Vec<_> = body
        .statements
        .iter()
        .map(|&stmt| match data(&parsed, stmt) {
            NodeData::ExpressionStatement(expr) => data(&parsed, expr.expression).kind_name(),
            other => other.kind_name(),
        })
        .collect();
    assert_eq!(kinds, vec!["YieldExpression", "AwaitExpression"]);
}

#[test]
fn parses_class_members() {
    let parsed = parse_source(
        "class A extends B {\n  static x = 1;\n  #y;\n  constructor() {}\n  get z() { return 1; }\n  static { init(); }\n}",
    );
    assert_no_errors(&parsed);

    let NodeData::ClassDeclaration(class) = data(&parsed, parsed.statements()[0]) else {
        panic!("expected class declaration");
    };
    assert_eq!(parsed.arena.get_identifier_text(class.name), Some("A"));
    assert!(class.heritage.is_some());
    assert_eq!(class.members.len(), 5);

    assert!(matches!(
        data(&parsed, class.members[0]),
        NodeData::PropertyDeclaration(prop) if prop.is_static
    ));
    assert!(matches!(
        data(&parsed, class.members[2]),
        NodeData::MethodDeclaration(method) if method.kind == MethodKind::Constructor
    ));
    assert!(matches!(
        data(&parsed, class.members[3]),
        NodeData::MethodDeclaration(method) if method.kind == MethodKind::Getter
    ));
    assert!(matches!(data(&parsed, class.members[4]), NodeData::StaticBlock(_)));
}

#[test]
fn parses_control_flow_statements() {
    let parsed = parse_source(
        r#"
if (a) b(); else { c(); }
for (let i = 0; i < 3; i++) {}
for (const x of xs) {}
for (const k in obj) {}
while (x) x--;
do { y++ } while (y < 3)
switch (v) { case 1: break; default: f(); }
try { risky(); } catch (e) { log(e); } finally { done(); }
outer: for (;;) { break outer; }
throw new Error("boom");
"#,
    );
    assert_no_errors(&parsed);
    assert_eq!(
        statement_kinds(&parsed),
        vec![
            "IfStatement",
            "ForStatement",
            "ForInOfStatement",
            "ForInOfStatement",
            "WhileStatement",
            "DoStatement",
            "SwitchStatement",
            "TryStatement",
            "LabeledStatement",
            "ThrowStatement",
        ]
    );

    let NodeData::ForInOfStatement(for_of) = data(&parsed, parsed.statements()[2]) else {
        panic!("expected for-of");
    };
    assert!(for_of.is_of);
    let NodeData::ForInOfStatement(for_in) = data(&parsed, parsed.statements()[3]) else {
        panic!("expected for-in");
    };
    assert!(!for_in.is_of);
}

#[test]
fn inserts_semicolons_at_line_breaks() {
    let parsed = parse_source("let a = 1\nlet b = 2\na\n++b");
    assert_no_errors(&parsed);
    assert_eq!(
        statement_kinds(&parsed),
        vec![
            "VariableStatement",
            "VariableStatement",
            "ExpressionStatement",
            "ExpressionStatement",
        ]
    );
    let NodeData::ExpressionStatement(last) = data(&parsed, parsed.statements()[3]) else {
        panic!("expected expression statement");
    };
    assert!(matches!(
        data(&parsed, last.expression),
        NodeData::PrefixUnaryExpression(_)
    ));
}

#[test]
fn return_before_line_break_has_no_operand() {
    let parsed = parse_source("function f() { return\n42 }");
    assert_no_errors(&parsed);
    let NodeData::FunctionDeclaration(func) = data(&parsed, parsed.statements()[0]) else {
        panic!("expected function declaration");
    };
    let NodeData::Block(body) = data(&parsed, func.body) else {
        panic!("expected block body");
    };
    assert_eq!(body.statements.len(), 2);
    assert!(matches!(
        data(&parsed, body.statements[0]),
        NodeData::ReturnStatement(ret) if ret.expression.is_none()
    ));
}

#[test]
fn parses_module_declarations() {
    let parsed = parse_source(
        r#"import def, { a as b } from "m";
import * as ns from "n";
import "side-effect";
export const x = 1;
export default function () {}
export { x as y };
export * from "z";
"#,
    );
    assert_no_errors(&parsed);
    assert_eq!(
        statement_kinds(&parsed),
        vec![
            "ImportDeclaration",
            "ImportDeclaration",
            "ImportDeclaration",
            "ExportDeclaration",
            "ExportDeclaration",
            "ExportDeclaration",
            "ExportDeclaration",
        ]
    );

    let NodeData::ImportDeclaration(import) = data(&parsed, parsed.statements()[0]) else {
        panic!("expected import");
    };
    assert_eq!(import.bindings.len(), 2);

    let NodeData::ExportDeclaration(export) = data(&parsed, parsed.statements()[3]) else {
        panic!("expected export");
    };
    assert!(matches!(
        data(&parsed, export.declaration),
        NodeData::VariableStatement(_)
    ));

    let NodeData::ExportDeclaration(default) = data(&parsed, parsed.statements()[4]) else {
        panic!("expected export");
    };
    assert!(default.is_default);
    assert!(matches!(
        data(&parsed, default.declaration),
        NodeData::FunctionDeclaration(func) if func.name.is_none()
    ));
}

#[test]
fn let_can_name_a_variable() {
    let parsed = parse_source("let(x);");
    assert_no_errors(&parsed);
    let NodeData::ExpressionStatement(stmt) = data(&parsed, parsed.statements()[0]) else {
        panic!("expected expression statement");
    };
    assert!(matches!(data(&parsed, stmt.expression), NodeData::CallExpression(_)));
}

#[test]
fn reports_missing_initializer_expression() {
    let parsed = parse_source("let x = ;");
    assert!(parsed.has_errors());
    assert!(
        parsed
            .diagnostics
            .iter()
            .any(|d| d.message_text == "Expression expected.")
    );
    assert_eq!(parsed.diagnostics[0].file, "test.js");
}

#[test]
fn reports_missing_semicolon_on_same_line() {
    let parsed = parse_source("let a = 1 let b = 2");
    assert!(
        parsed
            .diagnostics
            .iter()
            .any(|d| d.message_text == "';' expected.")
    );
}

#[test]
fn lexical_errors_become_diagnostics() {
    let parsed = parse_source("let s = 'open\nlet t = 1;");
    assert!(parsed.has_errors());
    assert!(
        parsed
            .diagnostics
            .iter()
            .any(|d| d.message_text == "Unterminated string literal.")
    );
}

#[test]
fn stray_closing_brace_does_not_hang() {
    let parsed = parse_source("} let a = 1;");
    assert!(parsed.has_errors());
    assert!(
        statement_kinds(&parsed).contains(&"VariableStatement"),
        "parsing resumes after the stray token"
    );
}

#[test]
fn deeply_nested_blocks_are_a_parse_error() {
    let depth = 2000;
    let source = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
    let parsed = parse_source(&source);
    assert!(
        parsed
            .diagnostics
            .iter()
            .any(|d| d.message_text == "Maximum nesting depth exceeded.")
    );
}

#[test]
fn deeply_nested_binding_pattern_is_a_parse_error() {
    let depth = 2000;
    let source = format!("let {}a{} = x;", "[".repeat(depth), "]".repeat(depth));
    let parsed = parse_source(&source);
    assert!(
        parsed
            .diagnostics
            .iter()
            .any(|d| d.message_text == "Maximum nesting depth exceeded.")
    );
}
