use clap::Parser;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::args::CliArgs;
use crate::config::{
    DEFAULT_EXTENSIONS, JsTypeConfig, ResolvedOptions, find_config, load_config, load_for_args,
    parse_config,
};

fn args(argv: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("jstype").chain(argv.iter().copied())).unwrap()
}

#[test]
fn parses_config_fields() {
    let config = parse_config(
        r#"{
          "infer": true,
          "extensions": ["js", "es6"],
          "exclude": ["dist"],
          "report": "report.json"
        }"#,
    )
    .unwrap();

    assert_eq!(config.infer, Some(true));
    assert_eq!(config.verbose, None);
    assert_eq!(
        config.extensions,
        Some(vec!["js".to_string(), "es6".to_string()])
    );
    assert_eq!(config.exclude, Some(vec!["dist".to_string()]));
    assert_eq!(config.report, Some(PathBuf::from("report.json")));
}

#[test]
fn accepts_string_booleans() {
    let config = parse_config(r#"{ "infer": "true", "pretty": "off" }"#).unwrap();
    assert_eq!(config.infer, Some(true));
    assert_eq!(config.pretty, Some(false));
}

#[test]
fn rejects_invalid_boolean_string() {
    let err = parse_config(r#"{ "infer": "sometimes" }"#).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid boolean value"));
}

#[test]
fn rejects_unknown_fields() {
    assert!(parse_config(r#"{ "strict": true }"#).is_err());
}

#[test]
fn defaults_without_config() {
    let options = ResolvedOptions::resolve(&args(&["src"]), &JsTypeConfig::default());

    assert!(!options.infer);
    assert!(!options.verbose);
    assert_eq!(options.pretty, None);
    assert_eq!(options.extensions, DEFAULT_EXTENSIONS);
    assert!(options.exclude.is_empty());
    assert_eq!(options.report, None);
}

#[test]
fn command_line_wins_over_config() {
    let config = JsTypeConfig {
        infer: Some(false),
        pretty: Some(true),
        extensions: Some(vec!["mjs".to_string()]),
        report: Some(PathBuf::from("from-config.json")),
        ..JsTypeConfig::default()
    };
    let options = ResolvedOptions::resolve(
        &args(&["src", "--infer", "--no-pretty", "--ext", ".JS", "--report", "cli.json"]),
        &config,
    );

    assert!(options.infer);
    assert_eq!(options.pretty, Some(false));
    assert_eq!(options.extensions, vec!["js".to_string()]);
    assert_eq!(options.report, Some(PathBuf::from("cli.json")));
}

#[test]
fn config_fills_in_missing_flags() {
    let config = JsTypeConfig {
        infer: Some(true),
        pretty: Some(true),
        extensions: Some(vec![".js".to_string(), "js".to_string(), "cjs".to_string()]),
        exclude: Some(vec!["vendor".to_string()]),
        ..JsTypeConfig::default()
    };
    let options = ResolvedOptions::resolve(&args(&["."]), &config);

    assert!(options.infer);
    assert_eq!(options.pretty, Some(true));
    assert_eq!(options.extensions, vec!["js".to_string(), "cjs".to_string()]);
    assert_eq!(options.exclude, vec!["vendor".to_string()]);
}

#[test]
fn matches_extensions_case_insensitively() {
    let options = ResolvedOptions::resolve(&args(&["."]), &JsTypeConfig::default());

    assert!(options.has_extension(std::path::Path::new("a/b.js")));
    assert!(options.has_extension(std::path::Path::new("App.JSX")));
    assert!(!options.has_extension(std::path::Path::new("types.ts")));
    assert!(!options.has_extension(std::path::Path::new("Makefile")));
}

#[test]
fn finds_and_loads_config_file() {
    let dir = TempDir::new().unwrap();
    assert_eq!(find_config(dir.path()), None);

    let path = dir.path().join("jstype.json");
    std::fs::write(&path, r#"{ "infer": true }"#).unwrap();

    assert_eq!(find_config(dir.path()), Some(path.clone()));
    assert_eq!(load_config(&path).unwrap().infer, Some(true));
    assert_eq!(load_for_args(&args(&["."]), dir.path()).unwrap().infer, Some(true));
}

#[test]
fn explicit_config_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let err = load_for_args(&args(&[".", "--config", "missing.json"]), dir.path()).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}
