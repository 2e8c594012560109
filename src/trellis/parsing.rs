//! Parsing engine
//!
//!     Simulates the compiled [ParsingGraph](crate::trellis::grammar::ParsingGraph) over a lazy
//!     token stream and returns the accepted [Derivation]: the chain of steps from the start
//!     rule's START node to its END node. The AST builder replays that chain into a tree.
//!
//!     This is not a backtracking recursive-descent parser. Every alternative is tried in
//!     parallel, one token at a time, so each token is pulled from the stream exactly once.

pub mod engine;
pub mod error;
pub mod step;

pub use engine::{parse, Parser, ParserOptions};
pub use error::ParseError;
pub use step::{Derivation, ParsingStep, StepId};
