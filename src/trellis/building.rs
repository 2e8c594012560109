//! AST building
//!
//!     The builder replays an accepted [Derivation](crate::trellis::parsing::Derivation) from
//!     its last step to its first. Walking backward, a rule's END is met before its START, so an
//!     END opens a node and the matching START closes it. Children are therefore discovered
//!     right to left and are prepended to keep source order.
//!
//!     When a node closes, the factory attached to its rule decides what its parent receives
//!     (see [factories]). The root is never shaped: it is always returned as a node.

pub mod builder;
pub mod factories;

pub use builder::{build, AstBuilder, BuildError};
pub use factories::{NodeFactory, Shaped};
