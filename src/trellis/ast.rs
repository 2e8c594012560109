//! Syntax tree produced by the AST builder
//!
//!     A [SyntaxNode] is either a rule node (type = rule name, no content) or a leaf built from a
//!     matched token (type = term label, content = token text). The tree owns its nodes: each node
//!     owns its children and the caller owns the root. Parent lookups go through the root with
//!     [SyntaxNode::parent_of], and the renderer keeps an explicit ancestor stack while it walks.

pub mod node;

pub use node::SyntaxNode;
