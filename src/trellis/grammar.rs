//! Grammar and grammar compiler
//!
//!     A grammar is an ordered list of named rules, each with an EBNF-like pattern made of
//!     whitespace-separated identifiers and the operators `( ) | ? * +`. The first rule is the
//!     start rule. Identifiers naming another rule are rule references; any other identifier is
//!     a terminal that must match a token with that exact label.
//!
//! Compilation
//!
//!     All rules compile into a single [ParsingGraph](graph::ParsingGraph), an arena of typed
//!     nodes linked by index. The construction is Thompson's construction extended with named
//!     rule calls:
//!
//!         - every rule gets a RULE_START and RULE_END node, every group a GROUP_START and
//!           GROUP_END node, cross-referencing each other
//!         - alternatives inside a rule or group share its start and end nodes
//!         - `?` adds the predecessors of the preceding element as extra predecessors of
//!           whatever follows it (a skip edge)
//!         - `*` adds a self loop (or a group END → START loop) plus the same skip edge
//!         - `+` is rewritten as the preceding element followed by a copy of it with `*`
//!
//!     The operators `?`, `*` and `+` need exactly one preceding element. Anything else is a
//!     [GrammarError](error::GrammarError), as are unbalanced groups.

pub mod compiler;
pub mod error;
pub mod graph;
pub mod rule;
pub mod symbols;

pub use compiler::compile;
pub use error::GrammarError;
pub use graph::{NodeId, NodeKind, ParsingGraph, ParsingNode};
pub use rule::{Grammar, GrammarRule};
pub use symbols::Symbol;
