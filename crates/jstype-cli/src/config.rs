//! `jstype.json` loading and option resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "jstype.json";

/// Extensions checked when a directory is walked and nothing else is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx"];

/// Accept both `true` and `"true"` (and a few other spellings) for booleans.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                s
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JsTypeConfig {
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub infer: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub verbose: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub pretty: Option<bool>,
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    /// Extra directory names skipped while walking
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    /// Default path of the JSON report
    #[serde(default)]
    pub report: Option<PathBuf>,
}

pub fn parse_config(source: &str) -> Result<JsTypeConfig> {
    let config = serde_json::from_str(source).context("failed to parse jstype.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<JsTypeConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&source).with_context(|| format!("invalid config file {}", path.display()))
}

/// `jstype.json` in `dir`, if there is one.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Options after merging command line, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub paths: Vec<PathBuf>,
    pub infer: bool,
    pub verbose: bool,
    /// `None` leaves the choice to terminal detection.
    pub pretty: Option<bool>,
    /// Lower-case, without the leading dot
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub report: Option<PathBuf>,
}

impl ResolvedOptions {
    /// Command-line flags win over the config file, which wins over defaults.
    pub fn resolve(args: &CliArgs, config: &JsTypeConfig) -> Self {
        let extensions = args
            .extensions
            .clone()
            .or_else(|| config.extensions.clone())
            .map(|list| normalize_extensions(&list))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect());

        ResolvedOptions {
            paths: args.paths.clone(),
            infer: args.infer || config.infer.unwrap_or(false),
            verbose: args.verbose || config.verbose.unwrap_or(false),
            pretty: args.pretty_override().or(config.pretty),
            extensions,
            exclude: config.exclude.clone().unwrap_or_default(),
            report: args.report.clone().or_else(|| config.report.clone()),
        }
    }

    pub fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            })
    }
}

/// Load the config named on the command line, or `jstype.json` from `cwd`.
pub fn load_for_args(args: &CliArgs, cwd: &Path) -> Result<JsTypeConfig> {
    match args.config.as_deref() {
        Some(path) => load_config(&cwd.join(path)),
        None => match find_config(cwd) {
            Some(path) => load_config(&path),
            None => Ok(JsTypeConfig::default()),
        },
    }
}

fn normalize_extensions(list: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(list.len());
    for ext in list {
        let ext = ext.trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && !out.contains(&ext) {
            out.push(ext);
        }
    }
    out
}
