//! Tests for the two-pass checker driver.

use crate::outcome::{FileOutcome, MismatchKind, TypeMismatch};
use crate::{CheckerOptions, check_source};

fn check(source: &str) -> FileOutcome {
    check_source("test.js", source, &CheckerOptions::default())
}

fn check_infer(source: &str) -> FileOutcome {
    check_source("test.js", source, &CheckerOptions { infer: true })
}

/// Mismatches and check count of a file that must have been checked.
fn checked(outcome: FileOutcome) -> (Vec<TypeMismatch>, usize) {
    match outcome {
        FileOutcome::Checked {
            mismatches,
            checks_performed,
        } => (mismatches, checks_performed),
        other => panic!("expected a checked file, got {other:?}"),
    }
}

fn subjects(mismatches: &[TypeMismatch]) -> Vec<&str> {
    mismatches.iter().map(|m| m.subject.as_str()).collect()
}

#[test]
fn annotated_literal_matches() {
    let (mismatches, checks) = checked(check("let name /*: string */ = \"Alice\";"));
    assert!(mismatches.is_empty());
    assert_eq!(checks, 1);
}

#[test]
fn annotated_literal_mismatch_is_reported() {
    let (mismatches, checks) = checked(check("let age /*: number */ = \"twenty\";"));
    assert_eq!(checks, 1);
    assert_eq!(
        mismatches,
        vec![TypeMismatch {
            file: "test.js".to_string(),
            line: 1,
            column: 5,
            kind: MismatchKind::Declaration,
            subject: "age".to_string(),
            expected: "number".to_string(),
            found: "string".to_string(),
            value: Some("twenty".to_string()),
        }]
    );
    assert_eq!(mismatches[0].location(), "test.js:1:5");
}

#[test]
fn array_annotations() {
    let (mismatches, checks) = checked(check(
        r#"
let a /*: number[] */ = [];
let b /*: number[] */ = [1, 2, "three"];
let c /*: number[] */ = ["one", 2];
"#,
    ));
    assert_eq!(checks, 3);
    assert_eq!(subjects(&mismatches), vec!["c"]);
    assert_eq!(mismatches[0].expected, "number[]");
    // An array literal checked against `T[]` infers the annotation itself.
    assert_eq!(mismatches[0].found, "number[]");
}

#[test]
fn union_annotations() {
    let (mismatches, _) = checked(check(
        "let u /*: string|number */ = 42;\nlet v /*: string|number */ = true;",
    ));
    assert_eq!(subjects(&mismatches), vec!["v"]);
    assert_eq!(mismatches[0].expected, "string|number");
    assert_eq!(mismatches[0].found, "boolean");
    assert_eq!(mismatches[0].line, 2);
}

#[test]
fn jsdoc_type_tags_are_checked() {
    let (mismatches, checks) = checked(check(
        "/** @type {boolean} */\nlet ok = \"true\";\n/** @type {function} */\nconst f = () => 1;",
    ));
    assert_eq!(checks, 2);
    assert_eq!(subjects(&mismatches), vec!["ok"]);
    assert_eq!((mismatches[0].line, mismatches[0].column), (2, 5));
}

#[test]
fn inline_annotation_wins_over_jsdoc() {
    let (mismatches, _) = checked(check("/** @type {string} */\nlet n /*: number */ = 1;"));
    assert!(mismatches.is_empty());
}

#[test]
fn skip_remaining_stops_later_checks() {
    let (mismatches, checks) = checked(check(
        "let a /*: number */ = \"x\";\n/*: skip-remaining */\nlet b /*: number */ = \"y\";\nb = \"z\";",
    ));
    assert_eq!(subjects(&mismatches), vec!["a"]);
    assert_eq!(checks, 1);
}

#[test]
fn skip_directive_skips_the_file() {
    let outcome = check("/*: skip */\nlet a /*: number */ = 'x';");
    assert_eq!(outcome, FileOutcome::Skipped);
    assert_eq!(outcome.checks_performed(), 0);
    assert!(!outcome.is_failure());
}

#[test]
fn aliasing_propagates_declared_types_in_infer_mode() {
    let source = "let a /*: number */ = 5;\nlet b = a;\nb = \"x\";";

    let (mismatches, checks) = checked(check_infer(source));
    assert_eq!(checks, 2);
    assert_eq!(mismatches.len(), 1);
    let mismatch = &mismatches[0];
    assert_eq!(mismatch.kind, MismatchKind::Assignment);
    assert_eq!(mismatch.subject, "b");
    assert_eq!(mismatch.expected, "number");
    assert_eq!(mismatch.found, "string");
    assert_eq!((mismatch.line, mismatch.column), (3, 1));

    let (mismatches, checks) = checked(check(source));
    assert!(mismatches.is_empty(), "b is untracked without infer");
    assert_eq!(checks, 1);
}

#[test]
fn successful_assignment_refreshes_inferred_type() {
    let (mismatches, _) = checked(check_infer(
        "let a /*: number|string */ = 1;\na = \"s\";\nlet b = a;\nb = 2;",
    ));
    assert_eq!(subjects(&mismatches), vec!["b"]);
    assert_eq!(mismatches[0].expected, "string");
    assert_eq!(mismatches[0].found, "number");
}

#[test]
fn only_plain_assignments_to_names_are_checked() {
    let (mismatches, checks) = checked(check(
        "let count /*: number */ = 5;\ncount = 6;\ncount += \"x\";\nobj.count = \"x\";\ncount = \"ten\";",
    ));
    assert_eq!(checks, 3);
    assert_eq!(subjects(&mismatches), vec!["count"]);
    assert_eq!(mismatches[0].line, 5);
    assert_eq!(mismatches[0].value.as_deref(), Some("ten"));
}

#[test]
fn annotated_assignment_starts_tracking() {
    let (mismatches, checks) = checked(check("total = 1; /*: string */\ntotal = 2;"));
    assert_eq!(checks, 2);
    assert_eq!(mismatches.len(), 2);
    assert!(mismatches.iter().all(|m| m.expected == "string"));
    assert_eq!(
        mismatches.iter().map(|m| m.line).collect::<Vec<_>>(),
        vec![1, 2]
    );
}

#[test]
fn call_arguments_are_checked_against_params() {
    let (mismatches, checks) = checked(check(
        r#"/**
 * @param {number} a
 * @param {number} b
 */
function f(a, b) { return a + b; }
f("2", 3);
"#,
    ));
    assert_eq!(checks, 2);
    assert_eq!(mismatches.len(), 1);
    let mismatch = &mismatches[0];
    assert_eq!(mismatch.kind, MismatchKind::Argument);
    assert_eq!(mismatch.subject, "a");
    assert_eq!(mismatch.expected, "number");
    assert_eq!(mismatch.found, "string");
    assert_eq!((mismatch.line, mismatch.column), (6, 3));
}

#[test]
fn calls_before_the_declaration_are_checked() {
    let (mismatches, _) = checked(check(
        "f(\"2\");\n/** @param {number} x */\nfunction f(x) {}",
    ));
    assert_eq!(subjects(&mismatches), vec!["x"]);
}

#[test]
fn argument_count_is_lenient() {
    let source = "/**\n * @param {number} a\n * @param {number} b\n */\nfunction f(a, b) {}\nf(1);\nf(1, 2, \"x\");";
    let (mismatches, checks) = checked(check(source));
    assert!(mismatches.is_empty());
    assert_eq!(checks, 4);
}

#[test]
fn return_tags_type_call_results() {
    let (mismatches, _) = checked(check(
        "/** @returns {string} */\nfunction name() { return \"x\"; }\nlet n /*: number */ = name();\nlet s /*: string */ = name();",
    ));
    assert_eq!(subjects(&mismatches), vec!["n"]);
    assert_eq!(mismatches[0].found, "string");
}

#[test]
fn arrow_and_exported_functions_register_signatures() {
    let (mismatches, _) = checked(check(
        r#"/** @param {string} s */
const shout = (s) => s;
shout(1);

/** @param {number} n */
export function square(n) { return n * n; }
square("4");
"#,
    ));
    assert_eq!(subjects(&mismatches), vec!["s", "n"]);
}

#[test]
fn uninitialized_and_destructured_declarations_are_skipped() {
    let (mismatches, checks) = checked(check(
        "let a /*: number */;\nlet { b } /*: number */ = obj;",
    ));
    assert!(mismatches.is_empty());
    assert_eq!(checks, 0);
}

#[test]
fn nested_declarations_are_visited() {
    let (mismatches, _) = checked(check(
        "function g() {\n  let x /*: string */ = 1;\n}\nfor (let i /*: string */ = 0; i < 1; i++) {}",
    ));
    assert_eq!(subjects(&mismatches), vec!["x", "i"]);
}

#[test]
fn columns_count_utf16_units() {
    let (mismatches, _) = checked(check("/* 日本 */ let t /*: number */ = \"x\";"));
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].column, 14);
}

#[test]
fn parse_errors_abort_the_file() {
    let outcome = check("let a /*: number */ = \"x\";\nlet = ;");
    let FileOutcome::ParseError { diagnostics } = &outcome else {
        panic!("expected parse error, got {outcome:?}");
    };
    assert!(!diagnostics.is_empty());
    assert_eq!(diagnostics[0].line, 2);
    assert!(outcome.is_failure());
    assert!(outcome.mismatches().is_empty());
}

#[test]
fn end_to_end_counts() {
    let source = r#"
let a1 /*: string */ = "one";
let a2 /*: number */ = 2;
let a3 /*: boolean */ = false;
let a4 /*: null */ = null;
let a5 /*: object */ = { k: 1 };
let a6 /*: array */ = [1];
let a7 /*: function */ = function () {};
let a8 /*: undefined */ = void 0;
let a9 /*: number */ = "nine";
let a10 /*: string[] */ = [10];
"#;
    let (mismatches, checks) = checked(check(source));
    assert!(checks >= 10);
    assert_eq!(subjects(&mismatches), vec!["a9", "a10"]);
}
