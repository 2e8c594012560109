//! Simulation steps and the accepted derivation

use crate::trellis::grammar::NodeId;
use crate::trellis::token::Token;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub usize);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One visit of a graph node during simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingStep {
    pub id: StepId,
    /// Nesting of rules and groups, for tracing only
    pub depth: usize,
    pub previous: Option<StepId>,
    /// The RULE_REFERENCE step to resume from when the current rule ends
    pub ret: Option<StepId>,
    pub node: NodeId,
    /// START node of the innermost open rule
    pub active_rule: NodeId,
    /// Index of the consumed token, for matched TERMINAL visits
    pub token: Option<usize>,
}

/// The accepted chain of steps, from the start rule's START to its END, and the tokens it
/// consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub(crate) steps: Vec<ParsingStep>,
    pub(crate) tokens: Vec<Token>,
}

impl Derivation {
    pub fn new(steps: Vec<ParsingStep>, tokens: Vec<Token>) -> Self {
        Self { steps, tokens }
    }

    /// Steps in derivation order
    pub fn steps(&self) -> &[ParsingStep] {
        &self.steps
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, step: &ParsingStep) -> Option<&Token> {
        step.token.and_then(|i| self.tokens.get(i))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}
