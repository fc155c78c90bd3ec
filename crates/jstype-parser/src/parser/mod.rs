//! Recursive-descent JavaScript parser.
//!
//! `ParserState` pulls tokens from the scanner and builds nodes into a
//! `NodeArena`. The result is a `ParsedSource`: the tree, every comment in
//! the file, and the leading-comment attachment for each node.

pub mod arena;
pub mod base;
pub mod node;
mod parsed;
pub mod state;
mod state_expressions;
mod state_jsx;
mod state_statements;

pub use arena::NodeArena;
pub use base::{NodeIndex, NodeList};
pub use node::{Node, NodeData};
pub use parsed::ParsedSource;
pub use state::ParserState;

#[cfg(test)]
#[path = "../tests/state_statement_tests.rs"]
mod state_statement_tests;

#[cfg(test)]
#[path = "../tests/state_expression_tests.rs"]
mod state_expression_tests;

#[cfg(test)]
#[path = "../tests/state_jsx_tests.rs"]
mod state_jsx_tests;
