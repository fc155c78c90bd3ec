//! JSON report written by `--report`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::driver::{CheckedFile, FileStatus};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FileReport {
    pub file: String,
    pub errors: Vec<ErrorRecord>,
    /// Parse errors, or the read error, that stopped the file being checked
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorRecord {
    /// `file:line:column`
    pub loc: String,
    pub variable: String,
    pub expected: String,
    pub found: String,
}

pub fn build_report(files: &[CheckedFile]) -> Vec<FileReport> {
    files.iter().map(file_report).collect()
}

fn file_report(file: &CheckedFile) -> FileReport {
    let mut report = FileReport {
        file: file.display_name.clone(),
        errors: Vec::new(),
        failures: Vec::new(),
    };
    match &file.status {
        FileStatus::ReadError(message) => report.failures.push(message.clone()),
        FileStatus::Outcome(outcome) => {
            report.errors = outcome
                .mismatches()
                .iter()
                .map(|mismatch| ErrorRecord {
                    loc: mismatch.location(),
                    variable: mismatch.subject.clone(),
                    expected: mismatch.expected.clone(),
                    found: mismatch.found.clone(),
                })
                .collect();
            if let jstype_checker::FileOutcome::ParseError { diagnostics } = outcome {
                report.failures = diagnostics
                    .iter()
                    .map(|failure| {
                        format!(
                            "{}:{}: {}",
                            failure.line, failure.column, failure.diagnostic.message_text
                        )
                    })
                    .collect();
            }
        }
    }
    report
}

pub fn write_report(path: &Path, files: &[CheckedFile]) -> Result<()> {
    let json = serde_json::to_string_pretty(&build_report(files))
        .context("failed to serialize report")?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    tracing::debug!(path = %path.display(), files = files.len(), "wrote report");
    Ok(())
}
