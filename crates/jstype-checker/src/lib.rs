//! Annotation-driven type checking for JavaScript.
//!
//! Types are declared in comments, either inline (`let n /*: number */ = 1;`)
//! or with JSDoc tags (`@type`, `@param`, `@returns`). The checker infers a
//! coarse runtime shape for each annotated value and reports the sites where
//! the shape does not satisfy the declared type.
//!
//! Modules:
//! - `types` - `SemanticType` and parsed `Annotation`s
//! - `annotations` - inline and JSDoc annotation extraction
//! - `infer` - type inference over expression shapes
//! - `compat` - declared/inferred compatibility rules
//! - `bindings` - per-file variable binding tracker
//! - `signatures` - `@param`/`@returns` function signatures
//! - `directives` - `: skip` and `skip-remaining` handling
//! - `context` - `CheckerContext` holding per-file state
//! - `state` - `CheckerState`, the two-pass driver

pub mod annotations;
pub mod bindings;
pub mod compat;
pub mod context;
pub mod directives;
pub mod infer;
pub mod outcome;
pub mod signatures;
pub mod state;
pub mod types;

pub use context::{CheckerContext, CheckerOptions};
pub use outcome::{FileOutcome, MismatchKind, ParseFailure, TypeMismatch};
pub use state::CheckerState;
pub use types::{Annotation, SemanticType};

use jstype_parser::ParsedSource;

/// Parse and check one file.
pub fn check_source(
    file_name: &str,
    source: impl Into<String>,
    options: &CheckerOptions,
) -> FileOutcome {
    let _span = tracing::info_span!("check_file", file = %file_name).entered();
    let parsed = jstype_parser::parse(file_name, source);
    check_parsed(&parsed, options)
}

/// Check an already parsed file. A file with parse errors is not checked.
pub fn check_parsed(parsed: &ParsedSource, options: &CheckerOptions) -> FileOutcome {
    if parsed.has_errors() {
        tracing::debug!(
            file = %parsed.file_name,
            errors = parsed.diagnostics.len(),
            "parse failed"
        );
        let diagnostics = parsed
            .diagnostics
            .iter()
            .map(|diagnostic| {
                let location = parsed.location(diagnostic.start);
                ParseFailure {
                    diagnostic: diagnostic.clone(),
                    line: location.display_line(),
                    column: location.display_column(),
                }
            })
            .collect();
        return FileOutcome::ParseError { diagnostics };
    }
    CheckerState::new(parsed, options).check_source_file()
}
