//! JavaScript scanner/tokenizer for the jstype checker.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine with comment trivia capture
//! - `char_codes` - Character classification utilities

pub mod char_codes;

mod syntax_kind;
pub use syntax_kind::SyntaxKind;

mod scanner;
pub use scanner::{ScanError, ScannerSnapshot, ScannerState};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
