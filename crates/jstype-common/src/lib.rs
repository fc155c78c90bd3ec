//! Common types and utilities for the jstype checker.
//!
//! This crate provides foundational types used across all jstype crates:
//! - Position/line-map types for line/column source locations
//! - Comment ranges and comment text helpers
//! - Diagnostic records for parse failures

// Position/LineMap types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, SourceLocation};

// Comment ranges recorded by the scanner
pub mod comments;
pub use comments::CommentRange;

// Diagnostics
pub mod diagnostics;
pub use diagnostics::Diagnostic;
