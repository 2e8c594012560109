//! Treeviz formatter for syntax trees
//!
//! One line per node, nesting drawn with box connectors. Rule nodes show their type, leaves
//! show their term and content (truncated).
//!
//!   ○ statement
//!   ├─ ○ foo
//!   │ ├─ ◦ FOO "foo"
//!   │ └─ ◦ FOO "foo"
//!   └─ ○ bar
//!     └─ ◦ BAR "bar"

use super::registry::{FormatError, Formatter};
use crate::trellis::ast::SyntaxNode;

pub const DEFAULT_TRUNCATE: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(node: &SyntaxNode) -> &'static str {
    if node.is_leaf() {
        "◦"
    } else {
        "○"
    }
}

fn label(node: &SyntaxNode, max_chars: usize) -> String {
    match &node.content {
        Some(content) => format!("{} {:?}", node.kind, truncate(content, max_chars)),
        None => node.kind.clone(),
    }
}

fn format_node(
    node: &SyntaxNode,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    max_chars: usize,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon(node),
        label(node, max_chars)
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        output.push_str(&format_node(child, &child_prefix, i, child_count, max_chars));
    }
    output
}

pub fn to_treeviz_str(root: &SyntaxNode) -> String {
    to_treeviz_str_with_truncation(root, DEFAULT_TRUNCATE)
}

pub fn to_treeviz_str_with_truncation(root: &SyntaxNode, max_chars: usize) -> String {
    let mut output = format!("{} {}\n", icon(root), label(root, max_chars));
    let child_count = root.children.len();
    for (i, child) in root.children.iter().enumerate() {
        output.push_str(&format_node(child, "", i, child_count, max_chars));
    }
    output
}

pub struct TreevizFormatter {
    truncate: usize,
}

impl TreevizFormatter {
    pub fn new(truncate: usize) -> Self {
        Self { truncate }
    }
}

impl Default for TreevizFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TRUNCATE)
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, node: &SyntaxNode) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_truncation(node, self.truncate))
    }

    fn description(&self) -> &str {
        "Visual tree representation with box connectors"
    }
}
