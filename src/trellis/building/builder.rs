//! Derivation replay

use super::factories::NodeFactory;
use crate::trellis::ast::SyntaxNode;
use crate::trellis::grammar::{NodeKind, ParsingGraph};
use crate::trellis::parsing::{Derivation, StepId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("derivation is empty")]
    EmptyDerivation,

    #[error("step {step} closes a rule that was never opened")]
    UnbalancedRule { step: StepId },

    #[error("step {step} matched a token outside of any rule")]
    OrphanTerminal { step: StepId },

    #[error("terminal step {step} carries no token")]
    MissingToken { step: StepId },

    #[error("derivation does not close its start rule")]
    MissingRoot,
}

/// A rule node being filled, children collected right to left
struct Frame {
    node: SyntaxNode,
    factory: Option<NodeFactory>,
    reversed: Vec<SyntaxNode>,
}

impl Frame {
    fn prepend(&mut self, nodes: Vec<SyntaxNode>) {
        self.reversed.extend(nodes.into_iter().rev());
    }

    fn finish(mut self) -> (SyntaxNode, Option<NodeFactory>) {
        self.reversed.reverse();
        self.node.children = self.reversed;
        (self.node, self.factory)
    }
}

fn shape(node: SyntaxNode, factory: Option<&NodeFactory>) -> Vec<SyntaxNode> {
    match factory {
        Some(factory) => factory(node).into_nodes(),
        None => vec![node],
    }
}

/// Replay `derivation` against the graph it was produced from
pub fn build(graph: &ParsingGraph, derivation: &Derivation) -> Result<SyntaxNode, BuildError> {
    AstBuilder::new(graph).build(derivation)
}

pub struct AstBuilder<'g> {
    graph: &'g ParsingGraph,
}

impl<'g> AstBuilder<'g> {
    pub fn new(graph: &'g ParsingGraph) -> Self {
        Self { graph }
    }

    pub fn build(&self, derivation: &Derivation) -> Result<SyntaxNode, BuildError> {
        if derivation.is_empty() {
            return Err(BuildError::EmptyDerivation);
        }

        let mut next_id = 0usize;
        let mut stack: Vec<Frame> = Vec::new();
        let mut root: Option<SyntaxNode> = None;

        for step in derivation.steps().iter().rev() {
            let node = self.graph.node(step.node);
            match &node.kind {
                NodeKind::RuleEnd { .. } => {
                    stack.push(Frame {
                        node: SyntaxNode::rule(next_id, node.rule.clone()),
                        factory: node.factory.clone(),
                        reversed: Vec::new(),
                    });
                    next_id += 1;
                }
                NodeKind::RuleStart { .. } => {
                    let frame = stack
                        .pop()
                        .ok_or(BuildError::UnbalancedRule { step: step.id })?;
                    let (finished, factory) = frame.finish();
                    match stack.last_mut() {
                        Some(parent) => parent.prepend(shape(finished, factory.as_ref())),
                        None => root = Some(finished),
                    }
                }
                NodeKind::Terminal { .. } => {
                    let token = derivation
                        .token(step)
                        .ok_or(BuildError::MissingToken { step: step.id })?;
                    let leaf = SyntaxNode::leaf(next_id, token);
                    next_id += 1;
                    let parent = stack
                        .last_mut()
                        .ok_or(BuildError::OrphanTerminal { step: step.id })?;
                    parent.prepend(shape(leaf, node.factory.as_ref()));
                }
                NodeKind::GroupStart { .. }
                | NodeKind::GroupEnd { .. }
                | NodeKind::RuleReference { .. } => {}
            }
        }

        let root = root.ok_or(BuildError::MissingRoot)?;
        tracing::debug!(
            root = %root.kind,
            nodes = next_id,
            "syntax tree built"
        );
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trellis::building::factories;
    use crate::trellis::grammar::Grammar;
    use crate::trellis::parsing::{parse, ParsingStep};
    use crate::trellis::token::Token;

    fn tree(grammar: Grammar, terms: &[&str]) -> SyntaxNode {
        let graph = grammar.compile().unwrap();
        let mut tokens = terms
            .iter()
            .enumerate()
            .map(|(i, t)| Token::new(*t, format!("{}{}", t.to_lowercase(), i), i..i + 1));
        let derivation = parse(&graph, &mut tokens).unwrap();
        build(&graph, &derivation).unwrap()
    }

    fn kinds(node: &SyntaxNode) -> Vec<&str> {
        node.children.iter().map(|c| c.kind.as_str()).collect()
    }

    #[test]
    fn test_leaves_keep_source_order() {
        let root = tree(Grammar::new().rule("s", "A B C"), &["A", "B", "C"]);
        assert_eq!(root.kind, "s");
        assert_eq!(kinds(&root), vec!["A", "B", "C"]);
        assert_eq!(root.text(), "a0b1c2");
    }

    #[test]
    fn test_nested_rules() {
        let root = tree(
            Grammar::new().rule("s", "t C").rule("t", "A B"),
            &["A", "B", "C"],
        );
        assert_eq!(kinds(&root), vec!["t", "C"]);
        assert_eq!(kinds(&root.children[0]), vec!["A", "B"]);
    }

    #[test]
    fn test_groups_do_not_create_nodes() {
        let root = tree(Grammar::new().rule("s", "(A B)+"), &["A", "B", "A", "B"]);
        assert_eq!(kinds(&root), vec!["A", "B", "A", "B"]);
    }

    #[test]
    fn test_ignore_factory_prunes_rule() {
        let grammar = Grammar::new()
            .rule("s", "t C")
            .rule_with("t", "A B", factories::ignore());
        let root = tree(grammar, &["A", "B", "C"]);
        assert_eq!(kinds(&root), vec!["C"]);
    }

    #[test]
    fn test_non_capturing_factory_splices_children() {
        let grammar = Grammar::new()
            .rule("s", "X t C")
            .rule_with("t", "A B", factories::non_capturing());
        let root = tree(grammar, &["X", "A", "B", "C"]);
        assert_eq!(kinds(&root), vec!["X", "A", "B", "C"]);
    }

    #[test]
    fn test_terminal_factory() {
        let grammar = Grammar::new()
            .rule("s", "A B")
            .terminal_with("A", factories::ignore());
        let root = tree(grammar, &["A", "B"]);
        assert_eq!(kinds(&root), vec!["B"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let root = tree(
            Grammar::new().rule("s", "t t").rule("t", "A"),
            &["A", "A"],
        );
        let mut ids: Vec<usize> = root.descendants().map(|n| n.id).collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_orphan_terminal_is_an_error() {
        let graph = Grammar::new().rule("s", "A").compile().unwrap();
        let terminal = graph
            .nodes()
            .find(|n| matches!(n.kind, NodeKind::Terminal { .. }))
            .unwrap()
            .id;
        let step = ParsingStep {
            id: StepId(0),
            depth: 0,
            previous: None,
            ret: None,
            node: terminal,
            active_rule: graph.start(),
            token: Some(0),
        };
        let derivation = Derivation::new(vec![step], vec![Token::new("A", "a", 0..1)]);
        assert_eq!(
            build(&graph, &derivation).unwrap_err(),
            BuildError::OrphanTerminal { step: StepId(0) }
        );
    }
}
