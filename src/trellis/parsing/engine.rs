//! Graph simulation
//!
//!     The engine walks the compiled graph in lockstep with the token stream. At each token
//!     position it expands a frontier of steps across every non-consuming node (rule and group
//!     boundaries, rule references) until only TERMINAL steps are left. Each terminal step whose
//!     term equals the current token survives into the next position's frontier with its
//!     continuations; the others are dropped.
//!
//!     Rule calls are encoded per step: entering a RULE_REFERENCE makes that step the return
//!     target of everything inside the called rule, and reaching the rule's END resumes at the
//!     reference's children. A RULE_END with no return target is the end of the start rule and
//!     records a candidate end step.
//!
//! Ordering
//!
//!     Newly generated continuations are explored first (the frontier is used as a stack), in
//!     graph child order. Terminal continuations enter the next frontier in the order their
//!     terminals were reached. Within one position, a step whose (graph node, return step) was
//!     already generated is dropped: it has the same future as the earlier one, so the first
//!     discovered derivation wins. This makes the choice between ambiguous derivations fixed
//!     and documented rather than scored.
//!
//! Termination
//!
//!     Deduplication bounds plain epsilon cycles. Cycles through rule references (left
//!     recursion) create fresh return targets forever, so expansions at one position are also
//!     capped by [ParserOptions::max_steps_per_token].

use super::error::ParseError;
use super::step::{Derivation, ParsingStep, StepId};
use crate::trellis::grammar::{NodeId, NodeKind, ParsingGraph};
use crate::trellis::token::{self, Token};
use serde::Deserialize;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Cap on epsilon expansions at a single token position
    pub max_steps_per_token: usize,
    /// Tokens shown in error previews, the offending one included
    pub lookahead_tokens: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_steps_per_token: 100_000,
            lookahead_tokens: 6,
        }
    }
}

/// Parse `tokens` against `graph` with default options
pub fn parse<I>(graph: &ParsingGraph, tokens: &mut I) -> Result<Derivation, ParseError>
where
    I: Iterator<Item = Token>,
{
    Parser::new(graph).parse(tokens)
}

pub struct Parser<'g> {
    graph: &'g ParsingGraph,
    options: ParserOptions,
}

impl<'g> Parser<'g> {
    pub fn new(graph: &'g ParsingGraph) -> Self {
        Self::with_options(graph, ParserOptions::default())
    }

    pub fn with_options(graph: &'g ParsingGraph, options: ParserOptions) -> Self {
        Self { graph, options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Find the accepted derivation of the whole token stream.
    ///
    /// Tokens are pulled one at a time. On failure up to `lookahead_tokens - 1` further tokens
    /// are pulled for the error preview; whatever is left stays in `tokens`.
    pub fn parse<I>(&self, tokens: &mut I) -> Result<Derivation, ParseError>
    where
        I: Iterator<Item = Token>,
    {
        Simulation::new(self.graph, &self.options).run(tokens)
    }
}

/// State of one parse call
struct Simulation<'a> {
    graph: &'a ParsingGraph,
    options: &'a ParserOptions,
    steps: Vec<ParsingStep>,
    tokens: Vec<Token>,
    /// Candidate end step and the position it was found at
    end: Option<(StepId, usize)>,
}

impl<'a> Simulation<'a> {
    fn new(graph: &'a ParsingGraph, options: &'a ParserOptions) -> Self {
        Self {
            graph,
            options,
            steps: Vec::new(),
            tokens: Vec::new(),
            end: None,
        }
    }

    fn run<I>(mut self, tokens: &mut I) -> Result<Derivation, ParseError>
    where
        I: Iterator<Item = Token>,
    {
        let start = self.graph.start();
        let mut seen = HashSet::new();
        let root = self.spawn(&mut seen, None, start, None, start, 0);
        let mut frontier: VecDeque<StepId> = root.into_iter().collect();

        loop {
            let position = self.tokens.len();
            let terminals = self.expand(&mut frontier, &mut seen, position)?;

            let Some(token) = tokens.next() else {
                return self.finish(position, &terminals);
            };
            tracing::debug!(
                position,
                token = %token,
                candidates = terminals.len(),
                "parse position"
            );
            self.tokens.push(token);

            let mut next_seen = HashSet::new();
            for terminal in &terminals {
                let step = &self.steps[terminal.0];
                let matches = match &self.graph.node(step.node).kind {
                    NodeKind::Terminal { term } => *term == self.tokens[position].term,
                    _ => false,
                };
                if !matches {
                    continue;
                }
                tracing::trace!(step = %terminal, term = %self.tokens[position].term, "match");
                self.steps[terminal.0].token = Some(position);

                let step = self.steps[terminal.0].clone();
                for child in self.graph.node(step.node).children.clone() {
                    if let Some(id) = self.spawn(
                        &mut next_seen,
                        Some(step.id),
                        child,
                        step.ret,
                        step.active_rule,
                        step.depth,
                    ) {
                        frontier.push_back(id);
                    }
                }
            }

            if frontier.is_empty() {
                return Err(self.stopped_at(position, &terminals, tokens));
            }
            seen = next_seen;
        }
    }

    /// Create a step unless its (node, return) pair was already generated at this position
    fn spawn(
        &mut self,
        seen: &mut HashSet<(NodeId, Option<StepId>)>,
        previous: Option<StepId>,
        node: NodeId,
        ret: Option<StepId>,
        active_rule: NodeId,
        depth: usize,
    ) -> Option<StepId> {
        if !seen.insert((node, ret)) {
            return None;
        }
        let id = StepId(self.steps.len());
        self.steps.push(ParsingStep {
            id,
            depth,
            previous,
            ret,
            node,
            active_rule,
            token: None,
        });
        Some(id)
    }

    /// Run epsilon transitions until only terminal steps remain, returned in discovery order
    fn expand(
        &mut self,
        frontier: &mut VecDeque<StepId>,
        seen: &mut HashSet<(NodeId, Option<StepId>)>,
        position: usize,
    ) -> Result<Vec<StepId>, ParseError> {
        let mut terminals = Vec::new();
        let mut expansions = 0usize;

        while let Some(id) = frontier.pop_front() {
            let step = self.steps[id.0].clone();
            let node = self.graph.node(step.node);
            tracing::trace!("{}({}) {}", " ".repeat(step.depth), step.id, node.label);

            expansions += 1;
            if expansions > self.options.max_steps_per_token {
                return Err(ParseError::StepBudgetExceeded {
                    position,
                    budget: self.options.max_steps_per_token,
                });
            }

            // (node, return target, active rule, depth) for each continuation
            let continuations: Vec<(NodeId, Option<StepId>, NodeId, usize)> = match &node.kind {
                NodeKind::Terminal { .. } => {
                    terminals.push(id);
                    continue;
                }
                NodeKind::RuleStart { .. } | NodeKind::GroupStart { .. } => node
                    .children
                    .iter()
                    .map(|c| (*c, step.ret, step.active_rule, step.depth + 1))
                    .collect(),
                NodeKind::GroupEnd { .. } => node
                    .children
                    .iter()
                    .map(|c| (*c, step.ret, step.active_rule, step.depth.saturating_sub(1)))
                    .collect(),
                NodeKind::RuleReference { target, .. } => {
                    vec![(*target, Some(id), *target, step.depth + 1)]
                }
                NodeKind::RuleEnd { .. } => match step.ret {
                    Some(ret) => {
                        let caller = &self.steps[ret.0];
                        self.graph
                            .node(caller.node)
                            .children
                            .iter()
                            .map(|c| (*c, caller.ret, caller.active_rule, caller.depth))
                            .collect()
                    }
                    None => {
                        if self.end.map(|(_, at)| at) != Some(position) {
                            tracing::debug!(position, step = %id, "end of start rule reached");
                            self.end = Some((id, position));
                        }
                        continue;
                    }
                },
            };

            let mut spawned = Vec::with_capacity(continuations.len());
            for (child, ret, active_rule, depth) in continuations {
                if let Some(new) = self.spawn(seen, Some(id), child, ret, active_rule, depth) {
                    spawned.push(new);
                }
            }
            for new in spawned.into_iter().rev() {
                frontier.push_front(new);
            }
        }

        Ok(terminals)
    }

    /// End of input reached after expanding `position`
    fn finish(self, position: usize, terminals: &[StepId]) -> Result<Derivation, ParseError> {
        let accepted = self.end.filter(|(id, at)| {
            *at == position && self.steps[id.0].active_rule == self.graph.start()
        });
        match accepted {
            Some((id, _)) => Ok(self.derivation(id)),
            None => Err(ParseError::NoMatch {
                found: None,
                position,
                expected: self.expected_terms(terminals),
                preview: String::new(),
            }),
        }
    }

    /// No terminal accepted the token at `position`
    fn stopped_at<I>(&self, position: usize, terminals: &[StepId], rest: &mut I) -> ParseError
    where
        I: Iterator<Item = Token>,
    {
        let offending = self.tokens[position].clone();
        let mut window = vec![offending.clone()];
        window.extend(rest.take(self.options.lookahead_tokens.saturating_sub(1)));
        let preview = token::preview(&window);
        let expected = self.expected_terms(terminals);

        if self.end.is_some() {
            ParseError::UnexpectedToken {
                token: offending,
                position,
                expected,
                preview,
            }
        } else {
            ParseError::NoMatch {
                found: Some(offending),
                position,
                expected,
                preview,
            }
        }
    }

    fn expected_terms(&self, terminals: &[StepId]) -> Vec<String> {
        let mut expected: Vec<String> = Vec::new();
        for id in terminals {
            if let NodeKind::Terminal { term } = &self.graph.node(self.steps[id.0].node).kind {
                if !expected.contains(term) {
                    expected.push(term.clone());
                }
            }
        }
        expected
    }

    /// Collect the chain ending at `end`, root first
    fn derivation(self, end: StepId) -> Derivation {
        let mut chain = Vec::new();
        let mut cursor = Some(end);
        while let Some(id) = cursor {
            let step = self.steps[id.0].clone();
            cursor = step.previous;
            chain.push(step);
        }
        chain.reverse();
        tracing::debug!(
            steps = chain.len(),
            tokens = self.tokens.len(),
            explored = self.steps.len(),
            "derivation accepted"
        );
        Derivation::new(chain, self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trellis::grammar::Grammar;

    fn tokens(terms: &[&str]) -> Vec<Token> {
        terms
            .iter()
            .enumerate()
            .map(|(i, t)| Token::new(*t, t.to_lowercase(), i..i + 1))
            .collect()
    }

    fn run(grammar: Grammar, terms: &[&str]) -> Result<Derivation, ParseError> {
        let graph = grammar.compile().unwrap();
        parse(&graph, &mut tokens(terms).into_iter())
    }

    fn consumed_terms(derivation: &Derivation) -> Vec<String> {
        derivation
            .steps()
            .iter()
            .filter_map(|s| derivation.token(s))
            .map(|t| t.term.clone())
            .collect()
    }

    #[test]
    fn test_sequence_accepted() {
        let derivation = run(Grammar::new().rule("s", "A B"), &["A", "B"]).unwrap();
        assert_eq!(consumed_terms(&derivation), vec!["A", "B"]);
        let graph = Grammar::new().rule("s", "A B").compile().unwrap();
        let first = &derivation.steps()[0];
        assert_eq!(first.node, graph.start());
        assert!(matches!(
            graph.node(derivation.steps().last().unwrap().node).kind,
            NodeKind::RuleEnd { .. }
        ));
    }

    #[test]
    fn test_rule_call_returns_to_caller() {
        let grammar = Grammar::new().rule("s", "t C").rule("t", "A B");
        let derivation = run(grammar, &["A", "B", "C"]).unwrap();
        assert_eq!(consumed_terms(&derivation), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_input_with_nullable_start() {
        let derivation = run(Grammar::new().rule("s", "A*"), &[]).unwrap();
        assert!(derivation.tokens().is_empty());
    }

    #[test]
    fn test_premature_end_of_input() {
        let err = run(Grammar::new().rule("s", "A B"), &["A"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::NoMatch {
                found: None,
                position: 1,
                expected: vec!["B".into()],
                preview: String::new(),
            }
        );
    }

    #[test]
    fn test_unknown_first_token() {
        let err = run(Grammar::new().rule("s", "A | B"), &["C", "A"]).unwrap_err();
        match err {
            ParseError::NoMatch {
                found: Some(token),
                position,
                expected,
                preview,
            } => {
                assert_eq!(token.term, "C");
                assert_eq!(position, 0);
                assert_eq!(expected, vec!["A", "B"]);
                assert_eq!(preview, "c a");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_trailing_input() {
        let err = run(Grammar::new().rule("s", "A"), &["A", "A"]).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { position: 1, .. }));
    }

    #[test]
    fn test_lookahead_leaves_rest_in_iterator() {
        let graph = Grammar::new().rule("s", "A").compile().unwrap();
        let mut stream = tokens(&["B", "A", "A", "A"]).into_iter();
        let options = ParserOptions {
            lookahead_tokens: 2,
            ..ParserOptions::default()
        };
        let err = Parser::with_options(&graph, options)
            .parse(&mut stream)
            .unwrap_err();
        assert!(matches!(err, ParseError::NoMatch { ref preview, .. } if preview == "b a"));
        assert_eq!(stream.count(), 2);
    }

    #[test]
    fn test_left_recursion_hits_step_budget() {
        let graph = Grammar::new().rule("s", "s A | A").compile().unwrap();
        let options = ParserOptions {
            max_steps_per_token: 500,
            ..ParserOptions::default()
        };
        let err = Parser::with_options(&graph, options)
            .parse(&mut tokens(&["A"]).into_iter())
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::StepBudgetExceeded {
                position: 0,
                budget: 500
            }
        );
    }

    #[test]
    fn test_nullable_group_star_terminates() {
        let derivation = run(Grammar::new().rule("s", "(A?)* B"), &["A", "A", "B"]).unwrap();
        assert_eq!(consumed_terms(&derivation), vec!["A", "A", "B"]);
    }

    #[test]
    fn test_graph_reusable_across_parses() {
        let graph = Grammar::new().rule("s", "A+").compile().unwrap();
        for n in 1..4 {
            let terms = vec!["A"; n];
            let derivation = parse(&graph, &mut tokens(&terms).into_iter()).unwrap();
            assert_eq!(derivation.tokens().len(), n);
        }
    }
}
