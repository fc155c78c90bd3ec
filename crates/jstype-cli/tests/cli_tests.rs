//! End-to-end runs of the `jstype` binary against temporary projects.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jstype"))
        .args(args)
        .arg("--no-pretty")
        .current_dir(dir)
        .env_remove("JSTYPE_LOG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn clean_file_exits_zero() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "app.js", "let name /*: string */ = \"Alice\";\n");

    let output = run(dir.path(), &["app.js"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "Checked app.js successfully! (1 type checks performed)\n"
    );
}

#[test]
fn mismatch_exits_one() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "app.js",
        "let name /*: string */ = \"Alice\";\nlet age /*: number */ = \"twenty\";\n",
    );

    let output = run(dir.path(), &["app.js"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Type mismatch at app.js:2:5:\n  Variable: age\n  Expected: number, Found: string (twenty)\n\
         Found 1 type error(s) in app.js\n"
    );
}

#[test]
fn call_site_mismatch_is_reported() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "math.js",
        "/**\n * @param {number} a\n * @param {number} b\n */\nfunction add(a, b) { return a + b; }\nadd(\"2\", 3);\n",
    );

    let output = run(dir.path(), &["math.js"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Type mismatch at math.js:6:5:\n  Argument for: a\n"));
}

#[test]
fn infer_flag_tracks_aliases() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "alias.js",
        "let a /*: number */ = 5;\nlet b = a;\nb = \"x\";\n",
    );

    assert_eq!(run(dir.path(), &["alias.js"]).status.code(), Some(0));

    let output = run(dir.path(), &["alias.js", "--infer"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Assignment to: b"));
}

#[test]
fn checks_directories_and_writes_report() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "src/a.js", "let a /*: number */ = 1;\n");
    write_file(dir.path(), "src/b.js", "let b /*: boolean */ = 0;\n");
    write_file(dir.path(), "src/node_modules/dep.js", "let d /*: number */ = \"\";\n");

    let output = run(dir.path(), &["src", "--report", "report.json"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Checked src/a.js successfully!"));
    assert!(out.contains("Found 1 type error(s) in src/b.js"));
    assert!(!out.contains("dep.js"));
    assert!(out.ends_with(
        "Checked 2 file(s): 1 type error(s) in 1 file(s), 2 type checks performed\n"
    ));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(report[1]["file"], "src/b.js");
    assert_eq!(report[1]["errors"][0]["loc"], "src/b.js:1:5");
    assert_eq!(report[1]["errors"][0]["found"], "number");
}

#[test]
fn config_file_enables_inference() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "jstype.json", r#"{ "infer": "true" }"#);
    write_file(
        dir.path(),
        "alias.js",
        "let a /*: number */ = 5;\nlet b = a;\nb = \"x\";\n",
    );

    assert_eq!(run(dir.path(), &["alias.js"]).status.code(), Some(1));
}

#[test]
fn missing_path_fails() {
    let dir = TempDir::new().unwrap();

    let output = run(dir.path(), &["missing.js"]);

    assert_ne!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("path not found: missing.js"));
}

#[test]
fn jsx_files_are_discovered_and_checked() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "src/App.jsx",
        "const name /*: string */ = \"a\";\nexport const App = () => <div>{name}</div>;\n",
    );

    let output = run(dir.path(), &["src"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "Checked src/App.jsx successfully! (1 type checks performed)\n"
    );
}

#[test]
fn deeply_nested_file_fails_alone() {
    let dir = TempDir::new().unwrap();
    let depth = 2000;
    write_file(
        dir.path(),
        "src/deep.js",
        &format!("let deep = {}{};\n", "[".repeat(depth), "]".repeat(depth)),
    );
    write_file(dir.path(), "src/typed.js", "let b /*: boolean */ = 0;\n");

    let output = run(dir.path(), &["src"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Maximum nesting depth exceeded."));
    assert!(out.contains("Could not check src/deep.js"));
    assert!(out.contains("Found 1 type error(s) in src/typed.js"));
}
