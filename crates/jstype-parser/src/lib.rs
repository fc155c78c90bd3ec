//! JavaScript parser for the jstype checker.
//!
//! Produces an arena-allocated syntax tree with byte spans and attached
//! comment trivia. Any scan or parse error is reported as a diagnostic on
//! the returned `ParsedSource`.

pub mod parser;

pub use parser::{Node, NodeArena, NodeData, NodeIndex, NodeList, ParsedSource, ParserState};

/// Parse `source` as an ECMAScript module.
pub fn parse(file_name: impl Into<String>, source: impl Into<String>) -> ParsedSource {
    ParserState::new(file_name, source).parse()
}
