//! # trellis
//!
//! A parser generator for small custom languages, template engines and structured text.
//!
//! File Layout
//!
//! A language is described by two ordered lists: a lexicon of regex term rules and a grammar of
//! EBNF-like rules. The grammar is compiled once into a graph of typed nodes, and that graph
//! drives a token-by-token simulation over the lazy token stream. The accepted derivation is
//! then replayed backwards into a syntax tree, which callers render with a delegate table.
//!
//! The layout follows the pipeline stages:
//! src/trellis
//!   ├── lexing       Lexicon and lazy tokenizer
//!   ├── grammar      Pattern symbols, graph arena and grammar compiler
//!   ├── parsing      Graph simulation producing a derivation
//!   ├── building     Derivation replay and node-shaping factories
//!   ├── rendering    Delegate-table tree visitor
//!   └── formats      Treeviz and JSON output
//!
//! For the fluent tree assertions used by the tests, see the [testing module](trellis::testing).

pub mod trellis;
