//! Rust Parser Library
//!
//! Native side of the Rust language driver. It parses Rust source into a
//! generic syntax tree, recovering from broken function bodies, and serves parse
//! requests as JSON lines.

pub mod ast;
pub mod diagnostic;
mod parse;
pub mod protocol;
pub mod server;

pub use parse::{MAX_NESTING_DEPTH, ParseStatus, ParsedAst, parse_source};
