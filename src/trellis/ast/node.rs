//! Syntax node

use crate::trellis::token::Token;
use serde::Serialize;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    /// Unique within one tree, assigned in construction order
    #[serde(skip)]
    pub id: usize,
    /// Rule name for rule nodes, term label for leaves
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Source span of a leaf's token
    #[serde(skip)]
    pub span: Option<Range<usize>>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// A rule node with no children yet
    pub fn rule(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: name.into(),
            content: None,
            span: None,
            children: Vec::new(),
        }
    }

    /// A leaf carrying a matched token
    pub fn leaf(id: usize, token: &Token) -> Self {
        Self {
            id,
            kind: token.term.clone(),
            content: Some(token.content.clone()),
            span: Some(token.span.clone()),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.content.is_some()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Children whose type is `kind`
    pub fn children_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a SyntaxNode> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// First child of type `kind`
    pub fn child(&self, kind: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Pre-order iterator over this node and all descendants
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Leaves from left to right
    pub fn leaves(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.descendants().filter(|n| n.is_leaf())
    }

    /// Concatenated content of all leaves, left to right
    pub fn text(&self) -> String {
        self.leaves()
            .filter_map(|n| n.content.as_deref())
            .collect()
    }

    pub fn find(&self, id: usize) -> Option<&SyntaxNode> {
        self.descendants().find(|n| n.id == id)
    }

    /// The node that holds `id` among its children, searching from this node down
    pub fn parent_of(&self, id: usize) -> Option<&SyntaxNode> {
        self.descendants()
            .find(|n| n.children.iter().any(|c| c.id == id))
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SyntaxNode {
        let mut root = SyntaxNode::rule(0, "pair");
        let mut left = SyntaxNode::rule(1, "word");
        left.children
            .push(SyntaxNode::leaf(2, &Token::new("W", "ab", 0..2)));
        root.children.push(left);
        root.children
            .push(SyntaxNode::leaf(3, &Token::new("W", "cd", 2..4)));
        root
    }

    #[test]
    fn test_text_concatenates_leaves_in_order() {
        assert_eq!(sample().text(), "abcd");
    }

    #[test]
    fn test_parent_lookup() {
        let root = sample();
        assert_eq!(root.parent_of(2).map(|n| n.kind.as_str()), Some("word"));
        assert_eq!(root.parent_of(1).map(|n| n.id), Some(0));
        assert!(root.parent_of(0).is_none());
    }

    #[test]
    fn test_descendants_are_pre_order() {
        let ids: Vec<usize> = sample().descendants().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_serializes_type_content_children() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "pair");
        assert!(json.get("content").is_none());
        assert_eq!(json["children"][1]["content"], "cd");
        assert!(json.get("id").is_none());
    }
}
