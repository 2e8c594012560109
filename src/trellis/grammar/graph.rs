//! Compiled parsing graph
//!
//! Nodes live in a single arena and refer to each other by [NodeId]. Edges are stored on both
//! endpoints (`parents` and `children`), so the graph can be walked forward by the engine and
//! backward for diagnostics without any reference cycles. Child order is insertion order and is
//! significant: the engine explores children in that order.

use crate::trellis::building::factories::NodeFactory;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node kind with its kind-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    RuleStart { end: NodeId },
    RuleEnd { start: NodeId },
    GroupStart { end: NodeId },
    GroupEnd { start: NodeId },
    /// Consumes one token whose term equals `term`
    Terminal { term: String },
    /// Calls the rule whose start node is `target`
    RuleReference { rule: String, target: NodeId },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::RuleStart { .. } => "RULE_START",
            NodeKind::RuleEnd { .. } => "RULE_END",
            NodeKind::GroupStart { .. } => "GROUP_START",
            NodeKind::GroupEnd { .. } => "GROUP_END",
            NodeKind::Terminal { .. } => "TERMINAL",
            NodeKind::RuleReference { .. } => "RULE_REFERENCE",
        }
    }

    /// Every kind except TERMINAL is crossed without consuming a token
    pub fn is_epsilon(&self) -> bool {
        !matches!(self, NodeKind::Terminal { .. })
    }
}

pub struct ParsingNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    /// Rule whose pattern produced this node
    pub rule: String,
    pub parents: Vec<NodeId>,
    pub children: Vec<NodeId>,
    /// Shaping factory: set on rule START/END pairs and on terminals with a registered factory
    pub factory: Option<NodeFactory>,
}

impl fmt::Debug for ParsingNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsingNode")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("rule", &self.rule)
            .field("parents", &self.parents)
            .field("children", &self.children)
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct ParsingGraph {
    nodes: Vec<ParsingNode>,
    rules: Vec<NodeId>,
    by_name: HashMap<String, NodeId>,
}

impl ParsingGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Node by id.
    ///
    /// Panics if `id` was not issued by this graph.
    pub fn node(&self, id: NodeId) -> &ParsingNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&ParsingNode> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ParsingNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// START node of the first rule
    pub fn start(&self) -> NodeId {
        self.rules.first().copied().unwrap_or(NodeId(0))
    }

    pub fn start_rule(&self) -> Option<&str> {
        self.rules.first().map(|id| self.node(*id).rule.as_str())
    }

    /// START node of the rule named `name`
    pub fn rule_start(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Rule names in declaration order
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|id| self.node(*id).rule.as_str())
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &ParsingNode> {
        self.node(id).children.iter().map(|c| self.node(*c))
    }

    /// One line per node: its label, then the labels of its children
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            let children: Vec<&str> = node
                .children
                .iter()
                .map(|c| self.node(*c).label.as_str())
                .collect();
            out.push_str(&format!(" {:<35} → {}\n", node.label, children.join(", ")));
        }
        out
    }

    pub(crate) fn add_node(
        &mut self,
        label: String,
        rule: &str,
        kind: NodeKind,
        factory: Option<NodeFactory>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ParsingNode {
            id,
            label,
            kind,
            rule: rule.to_string(),
            parents: Vec::new(),
            children: Vec::new(),
            factory,
        });
        id
    }

    /// Add a START/END pair that reference each other
    pub(crate) fn add_pair(
        &mut self,
        labels: (String, String),
        rule: &str,
        group: bool,
        factory: Option<NodeFactory>,
    ) -> (NodeId, NodeId) {
        let start = NodeId(self.nodes.len());
        let end = NodeId(start.0 + 1);
        let (start_kind, end_kind) = if group {
            (NodeKind::GroupStart { end }, NodeKind::GroupEnd { start })
        } else {
            (NodeKind::RuleStart { end }, NodeKind::RuleEnd { start })
        };
        self.add_node(labels.0, rule, start_kind, factory.clone());
        self.add_node(labels.1, rule, end_kind, factory);
        (start, end)
    }

    pub(crate) fn register_rule(&mut self, name: &str, start: NodeId) {
        self.rules.push(start);
        self.by_name.insert(name.to_string(), start);
    }

    /// Add the edge `parent → child`, once
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.nodes[parent.0].children;
        if !children.contains(&child) {
            children.push(child);
        }
        let parents = &mut self.nodes[child.0].parents;
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }
}
