//! Testing utilities for syntax tree assertions
//!
//!     Checking node counts alone says little about a parse. [assert_tree] walks a tree with a
//!     fluent API so a test states the whole expected shape at once:
//!
//!         assert_tree(&tree)
//!             .kind("statement")
//!             .child_count(2)
//!             .child(0, |foo| {
//!                 foo.kind("foo").child_count(2).text("foofoo");
//!             })
//!             .child(1, |bar| {
//!                 bar.kind("bar").leaf_at(0, "BAR", "bar");
//!             });
//!
//!     Failures report the path of the node being checked (`root.children[0]...`).

pub mod matchers;
pub mod tree_assertions;

pub use matchers::TextMatch;
pub use tree_assertions::{assert_tree, TreeAssertion};
