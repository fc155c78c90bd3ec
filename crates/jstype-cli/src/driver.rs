//! File discovery and parallel checking.

use anyhow::{Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span, warn};
use walkdir::{DirEntry, WalkDir};

use jstype_checker::{CheckerOptions, FileOutcome};

use crate::config::ResolvedOptions;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Outcome(FileOutcome),
    /// The file could not be read; the message says why.
    ReadError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedFile {
    pub path: PathBuf,
    /// Path as shown in output, relative to the working directory when possible
    pub display_name: String,
    pub status: FileStatus,
}

impl CheckedFile {
    pub fn outcome(&self) -> Option<&FileOutcome> {
        match &self.status {
            FileStatus::Outcome(outcome) => Some(outcome),
            FileStatus::ReadError(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        match &self.status {
            FileStatus::Outcome(outcome) => outcome.is_failure(),
            FileStatus::ReadError(_) => true,
        }
    }
}

/// Totals over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub skipped: usize,
    pub parse_failures: usize,
    pub read_errors: usize,
    pub files_with_errors: usize,
    pub mismatches: usize,
    pub checks_performed: usize,
}

impl RunSummary {
    pub fn from_files(files: &[CheckedFile]) -> Self {
        let mut summary = RunSummary {
            files: files.len(),
            ..RunSummary::default()
        };
        for file in files {
            match &file.status {
                FileStatus::ReadError(_) => summary.read_errors += 1,
                FileStatus::Outcome(outcome) => {
                    if outcome.is_skipped() {
                        summary.skipped += 1;
                    }
                    if outcome.is_parse_error() {
                        summary.parse_failures += 1;
                    }
                    let mismatches = outcome.mismatches().len();
                    if mismatches > 0 {
                        summary.files_with_errors += 1;
                    }
                    summary.mismatches += mismatches;
                    summary.checks_performed += outcome.checks_performed();
                }
            }
        }
        summary
    }

    /// Whether the run should exit non-zero.
    pub fn has_failures(&self) -> bool {
        self.mismatches > 0 || self.parse_failures > 0 || self.read_errors > 0
    }
}

/// Expand the input paths into the list of files to check.
///
/// Files named explicitly are always checked, whatever their extension.
/// Directories are walked in name order, keeping files with a configured
/// extension and never descending into `node_modules`, hidden directories or
/// excluded directory names. Each file appears once, in first-seen order.
pub fn discover_files(options: &ResolvedOptions, cwd: &Path) -> Result<Vec<PathBuf>> {
    let mut seen = FxHashSet::default();
    let mut files = Vec::new();

    for input in &options.paths {
        let path = cwd.join(input);
        if path.is_file() {
            if seen.insert(path.clone()) {
                files.push(path);
            }
            continue;
        }
        if !path.is_dir() {
            bail!("path not found: {}", input.display());
        }

        let walker = WalkDir::new(&path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_ignored_dir(entry, &options.exclude));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && options.has_extension(entry.path()) {
                let file = entry.into_path();
                if seen.insert(file.clone()) {
                    files.push(file);
                }
            }
        }
    }

    debug!(count = files.len(), "discovered files");
    Ok(files)
}

fn is_ignored_dir(entry: &DirEntry, exclude: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    name == "node_modules" || name.starts_with('.') || exclude.iter().any(|e| e == name)
}

/// Check every file in parallel. Results come back in input order.
pub fn check_files(files: &[PathBuf], cwd: &Path, options: &CheckerOptions) -> Vec<CheckedFile> {
    files
        .par_iter()
        .map(|path| check_file(path, cwd, options))
        .collect()
}

pub fn check_file(path: &Path, cwd: &Path, options: &CheckerOptions) -> CheckedFile {
    let display_name = display_path(path, cwd);
    let _span = info_span!("check_path", file = %display_name).entered();

    let status = match std::fs::read_to_string(path) {
        Ok(source) => FileStatus::Outcome(jstype_checker::check_source(
            &display_name,
            source,
            options,
        )),
        Err(err) => {
            warn!(error = %err, "failed to read file");
            FileStatus::ReadError(err.to_string())
        }
    };

    CheckedFile {
        path: path.to_path_buf(),
        display_name,
        status,
    }
}

/// `path` relative to `cwd` when it lives under it, otherwise as given.
pub fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
