//! Human-readable output.

use colored::Colorize;

use jstype_checker::{FileOutcome, ParseFailure, TypeMismatch};

use crate::driver::{CheckedFile, FileStatus, RunSummary};

/// Renders results as terminal text, optionally coloured.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// Every block for one file, ending with its summary line.
    pub fn render_file(&self, file: &CheckedFile) -> String {
        let name = &file.display_name;
        match &file.status {
            FileStatus::ReadError(message) => {
                self.error(&format!("Error: could not read {}: {}", name, message))
            }
            FileStatus::Outcome(FileOutcome::Skipped) => {
                self.muted(&format!("Skipped {} (skip directive)", name))
            }
            FileStatus::Outcome(FileOutcome::ParseError { diagnostics }) => {
                let mut out = String::new();
                for failure in diagnostics {
                    out.push_str(&self.render_parse_failure(name, failure));
                    out.push('\n');
                }
                out.push_str(&self.error(&format!(
                    "Could not check {}: {} parse error(s)",
                    name,
                    diagnostics.len()
                )));
                out
            }
            FileStatus::Outcome(FileOutcome::Checked {
                mismatches,
                checks_performed,
            }) => {
                let mut out = String::new();
                for mismatch in mismatches {
                    out.push_str(&self.render_mismatch(mismatch));
                    out.push('\n');
                }
                if mismatches.is_empty() {
                    out.push_str(&self.success(&format!(
                        "Checked {} successfully! ({} type checks performed)",
                        name, checks_performed
                    )));
                } else {
                    out.push_str(&self.error(&format!(
                        "Found {} type error(s) in {}",
                        mismatches.len(),
                        name
                    )));
                }
                out
            }
        }
    }

    /// ```text
    /// Type mismatch at app.js:3:5:
    ///   Variable: age
    ///   Expected: number, Found: string (twenty)
    /// ```
    pub fn render_mismatch(&self, mismatch: &TypeMismatch) -> String {
        let header = self.error(&format!("Type mismatch at {}:", mismatch.location()));
        let value = mismatch
            .value
            .as_ref()
            .map(|value| format!(" ({})", value))
            .unwrap_or_default();
        format!(
            "{}\n  {}: {}\n  Expected: {}, Found: {}{}",
            header,
            mismatch.kind.label(),
            self.emphasis(&mismatch.subject),
            mismatch.expected,
            mismatch.found,
            value
        )
    }

    fn render_parse_failure(&self, name: &str, failure: &ParseFailure) -> String {
        format!(
            "{} {}:{}:{}: {}",
            self.error("Parse error at"),
            name,
            failure.line,
            failure.column,
            failure.diagnostic.message_text
        )
    }

    pub fn render_summary(&self, summary: &RunSummary) -> String {
        let mut line = format!(
            "Checked {} file(s): {} type error(s) in {} file(s), {} type checks performed",
            summary.files, summary.mismatches, summary.files_with_errors, summary.checks_performed
        );
        if summary.parse_failures > 0 {
            line.push_str(&format!(", {} parse failure(s)", summary.parse_failures));
        }
        if summary.read_errors > 0 {
            line.push_str(&format!(", {} unreadable", summary.read_errors));
        }
        if summary.skipped > 0 {
            line.push_str(&format!(", {} skipped", summary.skipped));
        }

        if summary.has_failures() {
            self.error(&line)
        } else {
            self.success(&line)
        }
    }

    fn error(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        text.red().bold().to_string()
    }

    fn success(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        text.green().to_string()
    }

    fn muted(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        text.bright_black().to_string()
    }

    fn emphasis(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        text.bold().to_string()
    }
}
