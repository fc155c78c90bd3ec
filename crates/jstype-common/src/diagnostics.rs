//! Diagnostic types produced while scanning and parsing.
//!
//! Type mismatches are not diagnostics in this sense: the checker records
//! them as its own `TypeMismatch` values. These records describe why a file
//! could not be turned into a tree.

use serde::Serialize;

/// A scanner or parser error anchored at a byte span.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            start,
            length,
            message_text: message.into(),
        }
    }
}
