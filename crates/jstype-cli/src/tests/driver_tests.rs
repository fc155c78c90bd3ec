use clap::Parser;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use jstype_checker::{CheckerOptions, FileOutcome};

use crate::args::CliArgs;
use crate::config::{JsTypeConfig, ResolvedOptions};
use crate::driver::{FileStatus, RunSummary, check_file, check_files, discover_files, display_path};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

fn resolve(argv: &[&str], config: &JsTypeConfig) -> ResolvedOptions {
    let args =
        CliArgs::try_parse_from(std::iter::once("jstype").chain(argv.iter().copied())).unwrap();
    ResolvedOptions::resolve(&args, config)
}

fn relative(files: &[PathBuf], root: &Path) -> Vec<String> {
    files.iter().map(|f| display_path(f, root)).collect()
}

#[test]
fn walks_directories_in_name_order() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "src/b.js", "");
    write_file(root, "src/a.mjs", "");
    write_file(root, "src/nested/c.cjs", "");
    write_file(root, "src/readme.md", "");
    write_file(root, "src/types.ts", "");

    let files = discover_files(&resolve(&["src"], &JsTypeConfig::default()), root).unwrap();

    assert_eq!(
        relative(&files, root),
        vec!["src/a.mjs", "src/b.js", "src/nested/c.cjs"]
    );
}

#[test]
fn skips_ignored_directories() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "app.js", "");
    write_file(root, "node_modules/lib/index.js", "");
    write_file(root, ".cache/tmp.js", "");
    write_file(root, "dist/bundle.js", "");
    write_file(root, "lib/util.js", "");

    let config = JsTypeConfig {
        exclude: Some(vec!["dist".to_string()]),
        ..JsTypeConfig::default()
    };
    let files = discover_files(&resolve(&["."], &config), root).unwrap();

    let names: Vec<String> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["app.js", "util.js"]);
}

#[test]
fn explicit_files_ignore_extension_filter() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "script.es6", "");

    let files = discover_files(&resolve(&["script.es6"], &JsTypeConfig::default()), root).unwrap();

    assert_eq!(relative(&files, root), vec!["script.es6"]);
}

#[test]
fn lists_each_file_once() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "src/a.js", "");

    let files =
        discover_files(&resolve(&["src/a.js", "src"], &JsTypeConfig::default()), root).unwrap();

    assert_eq!(relative(&files, root), vec!["src/a.js"]);
}

#[test]
fn missing_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = discover_files(&resolve(&["nope.js"], &JsTypeConfig::default()), dir.path())
        .unwrap_err();
    assert!(err.to_string().contains("path not found: nope.js"));
}

#[test]
fn checks_files_in_input_order() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let files = vec![
        write_file(root, "ok.js", "let name /*: string */ = \"Alice\";\n"),
        write_file(root, "bad.js", "let age /*: number */ = \"twenty\";\n"),
        write_file(root, "skipped.js", "/*: skip */\nlet x /*: number */ = \"\";\n"),
        write_file(root, "broken.js", "let = ;\n"),
    ];

    let results = check_files(&files, root, &CheckerOptions::default());

    let names: Vec<&str> = results.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, vec!["ok.js", "bad.js", "skipped.js", "broken.js"]);

    assert_eq!(results[0].outcome().unwrap().checks_performed(), 1);
    assert!(!results[0].is_failure());

    let mismatches = results[1].outcome().unwrap().mismatches();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].location(), "bad.js:1:5");

    assert_eq!(results[2].outcome(), Some(&FileOutcome::Skipped));
    assert!(results[3].outcome().unwrap().is_parse_error());

    let summary = RunSummary::from_files(&results);
    assert_eq!(
        summary,
        RunSummary {
            files: 4,
            skipped: 1,
            parse_failures: 1,
            read_errors: 0,
            files_with_errors: 1,
            mismatches: 1,
            checks_performed: 2,
        }
    );
    assert!(summary.has_failures());
}

#[test]
fn unreadable_file_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let result = check_file(&dir.path().join("gone.js"), dir.path(), &CheckerOptions::default());

    assert!(matches!(result.status, FileStatus::ReadError(_)));
    assert!(result.is_failure());
    assert_eq!(RunSummary::from_files(&[result]).read_errors, 1);
}

#[test]
fn clean_run_has_no_failures() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "a.js", "const n /*: number */ = 1;\n");

    let results = check_files(&[file], dir.path(), &CheckerOptions::default());

    assert!(!RunSummary::from_files(&results).has_failures());
}

#[test]
fn display_path_outside_cwd_is_unchanged() {
    assert_eq!(
        display_path(Path::new("/elsewhere/a.js"), Path::new("/project")),
        "/elsewhere/a.js"
    );
    assert_eq!(
        display_path(Path::new("/project/src/a.js"), Path::new("/project")),
        "src/a.js"
    );
}
