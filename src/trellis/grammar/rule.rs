//! Grammar rules and the grammar builder

use super::compiler;
use super::error::GrammarError;
use super::graph::ParsingGraph;
use crate::trellis::building::factories::NodeFactory;
use std::fmt;

/// A named production: `name := pattern`
#[derive(Clone)]
pub struct GrammarRule {
    pub(crate) name: String,
    pub(crate) pattern: String,
    pub(crate) factory: Option<NodeFactory>,
}

impl GrammarRule {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            factory: None,
        }
    }

    pub fn with_factory(mut self, factory: NodeFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn factory(&self) -> Option<&NodeFactory> {
        self.factory.as_ref()
    }
}

impl fmt::Debug for GrammarRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

impl fmt::Display for GrammarRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.name, self.pattern)
    }
}

/// Ordered list of rules; the first one is the start rule.
///
///     let grammar = Grammar::new()
///         .rule("statement", "(foo|bar)+")
///         .rule("foo", "FOO+")
///         .rule("bar", "BAR+");
#[derive(Clone, Default)]
pub struct Grammar {
    rules: Vec<GrammarRule>,
    terminal_factories: Vec<(String, NodeFactory)>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.push(GrammarRule::new(name, pattern))
    }

    pub fn rule_with(
        self,
        name: impl Into<String>,
        pattern: impl Into<String>,
        factory: NodeFactory,
    ) -> Self {
        self.push(GrammarRule::new(name, pattern).with_factory(factory))
    }

    pub fn push(mut self, rule: GrammarRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Shape every leaf of term `term` with `factory`
    pub fn terminal_with(mut self, term: impl Into<String>, factory: NodeFactory) -> Self {
        let term = term.into();
        self.terminal_factories.retain(|(t, _)| *t != term);
        self.terminal_factories.push((term, factory));
        self
    }

    pub fn rules(&self) -> &[GrammarRule] {
        &self.rules
    }

    pub fn start_rule(&self) -> Option<&GrammarRule> {
        self.rules.first()
    }

    pub fn terminal_factory(&self, term: &str) -> Option<&NodeFactory> {
        self.terminal_factories
            .iter()
            .find(|(t, _)| t == term)
            .map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn compile(&self) -> Result<ParsingGraph, GrammarError> {
        compiler::compile(self)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terminals: Vec<&str> = self
            .terminal_factories
            .iter()
            .map(|(t, _)| t.as_str())
            .collect();
        f.debug_struct("Grammar")
            .field("rules", &self.rules)
            .field("terminal_factories", &terminals)
            .finish()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
