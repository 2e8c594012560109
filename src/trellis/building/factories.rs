//! Node-shaping factories
//!
//! A factory runs on a finished node when its rule (or terminal) is spliced into the parent and
//! decides what the parent actually receives: the node itself, nothing, or the node's children.

use crate::trellis::ast::SyntaxNode;
use std::sync::Arc;

/// What a factory hands back to the parent
#[derive(Debug, Clone, PartialEq)]
pub enum Shaped {
    Node(SyntaxNode),
    Nodes(Vec<SyntaxNode>),
}

impl Shaped {
    pub fn into_nodes(self) -> Vec<SyntaxNode> {
        match self {
            Shaped::Node(node) => vec![node],
            Shaped::Nodes(nodes) => nodes,
        }
    }
}

impl From<SyntaxNode> for Shaped {
    fn from(node: SyntaxNode) -> Self {
        Shaped::Node(node)
    }
}

impl From<Vec<SyntaxNode>> for Shaped {
    fn from(nodes: Vec<SyntaxNode>) -> Self {
        Shaped::Nodes(nodes)
    }
}

pub type NodeFactory = Arc<dyn Fn(SyntaxNode) -> Shaped + Send + Sync>;

/// Wrap a closure as a [NodeFactory]
pub fn factory<F>(f: F) -> NodeFactory
where
    F: Fn(SyntaxNode) -> Shaped + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Keep the node as it is
pub fn identity() -> NodeFactory {
    factory(Shaped::Node)
}

/// Prune the node and its subtree
pub fn ignore() -> NodeFactory {
    factory(|_| Shaped::Nodes(Vec::new()))
}

/// Replace the node by its children, spliced in its place
pub fn non_capturing() -> NodeFactory {
    factory(|node| Shaped::Nodes(node.children))
}

pub fn merge_up() -> NodeFactory {
    non_capturing()
}
