//! Fluent assertion API for syntax nodes

use super::matchers::TextMatch;
use crate::trellis::ast::SyntaxNode;

/// Create an assertion builder for a tree root
pub fn assert_tree(node: &SyntaxNode) -> TreeAssertion<'_> {
    TreeAssertion {
        node,
        context: "root".to_string(),
    }
}

pub struct TreeAssertion<'a> {
    node: &'a SyntaxNode,
    context: String,
}

fn summarize(children: &[SyntaxNode]) -> String {
    children
        .iter()
        .map(|c| match &c.content {
            Some(content) => format!("{}({:?})", c.kind, content),
            None => c.kind.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl<'a> TreeAssertion<'a> {
    pub fn node(&self) -> &'a SyntaxNode {
        self.node
    }

    pub fn kind(self, expected: &str) -> Self {
        assert_eq!(
            self.node.kind, expected,
            "{}: Expected node of type '{}', found '{}'",
            self.context, expected, self.node.kind
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(&self.node.children)
        );
        self
    }

    /// Assert the types of all children, in order
    pub fn child_kinds(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.node.children.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(
            actual, expected,
            "{}: Unexpected children [{}]",
            self.context,
            summarize(&self.node.children)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        assert!(
            index < self.node.children.len(),
            "{}: Child index {} out of bounds (node has {} children: [{}])",
            self.context,
            index,
            self.node.children.len(),
            summarize(&self.node.children)
        );
        assertion(TreeAssertion {
            node: &self.node.children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }

    /// Run `assertion` on every child
    pub fn children<F>(self, assertion: F) -> Self
    where
        F: Fn(TreeAssertion<'a>),
    {
        for (index, child) in self.node.children.iter().enumerate() {
            assertion(TreeAssertion {
                node: child,
                context: format!("{}.children[{}]", self.context, index),
            });
        }
        self
    }

    /// Assert the child at `index` is a leaf with this term and content
    pub fn leaf_at(self, index: usize, term: &str, content: &str) -> Self {
        self.child(index, |leaf| {
            leaf.kind(term).content(content);
        })
    }

    pub fn content(self, expected: &str) -> Self {
        let actual = self.node.content.as_deref();
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected leaf content {:?}, found {:?}",
            self.context,
            expected,
            actual
        );
        self
    }

    pub fn is_leaf(self) -> Self {
        assert!(
            self.node.is_leaf(),
            "{}: Expected a leaf, found rule node '{}'",
            self.context,
            self.node.kind
        );
        self
    }

    /// Assert the concatenated content of all leaves
    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.node.text(), &self.context);
        self
    }

    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(&self.node.text(), &self.context);
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        TextMatch::Contains(substring.to_string()).assert(&self.node.text(), &self.context);
        self
    }

    /// Assert no node of type `kind` appears anywhere below this one
    pub fn lacks_kind(self, kind: &str) -> Self {
        let found = self.node.descendants().skip(1).find(|n| n.kind == kind);
        assert!(
            found.is_none(),
            "{}: Expected no '{}' node in the subtree",
            self.context,
            kind
        );
        self
    }
}
