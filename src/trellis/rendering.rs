//! Tree rendering
//!
//!     A [Renderer] walks a [SyntaxNode](crate::trellis::ast::SyntaxNode) tree and dispatches
//!     each node to callbacks looked up by node type in a [Delegate] table:
//!
//!         "before:<type>"   run first, if present
//!         "<type>"          main hook, else the table's fallback, else render the children
//!         "after:<type>"    run last, if present
//!
//!     A single mutable [RenderContext] is threaded through the whole walk: depth, named
//!     variables, the accumulated output and the types of the ancestors of the current node.
//!     Stock callbacks for string output live in [callbacks].

pub mod callbacks;
pub mod context;
pub mod error;
pub mod renderer;

pub use context::RenderContext;
pub use error::RenderError;
pub use renderer::{callback, Callback, Delegate, Renderer};
