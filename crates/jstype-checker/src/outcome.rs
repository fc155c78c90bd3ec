//! Per-file results.

use jstype_common::Diagnostic;
use serde::Serialize;

/// What kind of site a mismatch was found at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchKind {
    /// A variable declarator with an initializer
    Declaration,
    /// `name = value`
    Assignment,
    /// An argument of a call to a function with `@param` tags
    Argument,
}

impl MismatchKind {
    /// Label shown in front of the subject name.
    pub fn label(self) -> &'static str {
        match self {
            MismatchKind::Declaration => "Variable",
            MismatchKind::Assignment => "Assignment to",
            MismatchKind::Argument => "Argument for",
        }
    }
}

/// A declared type that the inferred type does not satisfy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeMismatch {
    pub file: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column in UTF-16 code units
    pub column: u32,
    pub kind: MismatchKind,
    /// Variable name, or parameter name for call arguments
    pub subject: String,
    pub expected: String,
    pub found: String,
    /// Source value of a literal or identifier, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TypeMismatch {
    /// `file:line:column`
    pub fn location(&self) -> String {
        format!("{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A scan or parse error with its display position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub diagnostic: Diagnostic,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

/// Result of checking one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file could not be parsed; nothing was checked.
    ParseError { diagnostics: Vec<ParseFailure> },
    /// A `: skip` directive turned checking off.
    Skipped,
    Checked {
        mismatches: Vec<TypeMismatch>,
        checks_performed: usize,
    },
}

impl FileOutcome {
    pub fn mismatches(&self) -> &[TypeMismatch] {
        match self {
            FileOutcome::Checked { mismatches, .. } => mismatches,
            _ => &[],
        }
    }

    pub fn checks_performed(&self) -> usize {
        match self {
            FileOutcome::Checked {
                checks_performed, ..
            } => *checks_performed,
            _ => 0,
        }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, FileOutcome::ParseError { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FileOutcome::Skipped)
    }

    /// Whether this file should make the run fail.
    pub fn is_failure(&self) -> bool {
        self.is_parse_error() || !self.mismatches().is_empty()
    }
}
