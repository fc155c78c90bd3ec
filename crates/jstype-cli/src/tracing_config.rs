//! Tracing setup for the jstype binary.
//!
//! Output format is chosen by `JSTYPE_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans and events via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! JSTYPE_LOG=debug JSTYPE_LOG_FORMAT=tree jstype src/
//! JSTYPE_LOG="jstype_checker=trace" jstype app.js
//! ```
//!
//! Nothing is installed unless `JSTYPE_LOG` or `RUST_LOG` is set, or the
//! caller asks for verbose logging. Everything is written to stderr; stdout
//! belongs to the reporter.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `JSTYPE_LOG_FORMAT` value. Unknown values fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("JSTYPE_LOG_FORMAT").unwrap_or_default())
    }
}

/// `JSTYPE_LOG` wins over `RUST_LOG`; `verbose` alone means `debug`.
fn build_filter(verbose: bool) -> Option<EnvFilter> {
    if let Ok(val) = std::env::var("JSTYPE_LOG") {
        Some(EnvFilter::builder().parse_lossy(val))
    } else if std::env::var("RUST_LOG").is_ok() {
        Some(EnvFilter::from_default_env())
    } else if verbose {
        Some(EnvFilter::builder().parse_lossy("jstype_checker=debug,jstype_cli=debug"))
    } else {
        None
    }
}

/// Install the global subscriber, if logging was asked for.
pub fn init_tracing(verbose: bool) {
    let Some(filter) = build_filter(verbose) else {
        return;
    };

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
