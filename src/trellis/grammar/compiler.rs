//! Grammar → parsing graph compiler
//!
//! Compilation runs in two passes. The first allocates the START/END pair of every rule, so a
//! pattern may reference rules declared after it. The second walks each pattern's symbols and
//! wires the graph fragment between the rule's pair.
//!
//! The walk keeps a stack of open contexts (the rule itself, then one per open group) and the
//! set of nodes the next element must be attached to. Postfix operators only ever look at the
//! element just compiled, which is tracked separately so `+` can replay its symbols.

use super::error::GrammarError;
use super::graph::{NodeId, NodeKind, ParsingGraph};
use super::rule::{Grammar, GrammarRule};
use super::symbols::{scan, Symbol};

pub fn compile(grammar: &Grammar) -> Result<ParsingGraph, GrammarError> {
    if grammar.is_empty() {
        return Err(GrammarError::EmptyGrammar);
    }

    let mut graph = ParsingGraph::new();
    for rule in grammar.rules() {
        if graph.rule_start(rule.name()).is_some() {
            return Err(GrammarError::DuplicateRule {
                rule: rule.name().to_string(),
            });
        }
        let labels = (
            format!("{}_$BEGIN", rule.name()),
            format!("{}_$END", rule.name()),
        );
        let (start, _) = graph.add_pair(labels, rule.name(), false, rule.factory().cloned());
        graph.register_rule(rule.name(), start);
    }

    for rule in grammar.rules() {
        RuleCompiler::new(&mut graph, grammar, rule)?.run()?;
    }

    tracing::debug!(
        rules = grammar.len(),
        nodes = graph.len(),
        "compiled grammar"
    );
    Ok(graph)
}

/// An open rule or group
struct Context {
    start: NodeId,
    end: NodeId,
    /// Attachment set in front of the `(`; empty for the rule context
    before: Vec<NodeId>,
    /// Symbols consumed inside this context, including its `(`
    symbols: Vec<Symbol>,
}

/// The element a postfix operator applies to
struct Element {
    /// The node itself, or the START of a group
    first: NodeId,
    /// The node itself, or the END of a group
    last: NodeId,
    /// Attachment set the element was linked from
    before: Vec<NodeId>,
    symbols: Vec<Symbol>,
}

struct RuleCompiler<'g> {
    graph: &'g mut ParsingGraph,
    grammar: &'g Grammar,
    rule: &'g GrammarRule,
    end: NodeId,
    contexts: Vec<Context>,
    previous: Vec<NodeId>,
    last: Option<Element>,
    /// Pending symbols, top of the stack is the next one to compile
    pending: Vec<(usize, Symbol)>,
    counter: usize,
}

impl<'g> RuleCompiler<'g> {
    fn new(
        graph: &'g mut ParsingGraph,
        grammar: &'g Grammar,
        rule: &'g GrammarRule,
    ) -> Result<Self, GrammarError> {
        let start = graph
            .rule_start(rule.name())
            .ok_or_else(|| GrammarError::DuplicateRule {
                rule: rule.name().to_string(),
            })?;
        let end = match graph.node(start).kind {
            NodeKind::RuleStart { end } => end,
            _ => start,
        };

        let mut pending: Vec<(usize, Symbol)> =
            scan(rule.pattern()).into_iter().enumerate().collect();
        pending.reverse();

        Ok(Self {
            graph,
            grammar,
            rule,
            end,
            contexts: vec![Context {
                start,
                end,
                before: Vec::new(),
                symbols: Vec::new(),
            }],
            previous: vec![start],
            last: None,
            pending,
            counter: 0,
        })
    }

    fn run(mut self) -> Result<(), GrammarError> {
        tracing::debug!(rule = %self.rule, "compiling rule");

        while let Some((position, symbol)) = self.pending.pop() {
            match symbol {
                Symbol::Open => self.open_group(),
                Symbol::Close => self.close_group(position)?,
                Symbol::Alt => self.alternative(),
                Symbol::Optional => self.optional(position)?,
                Symbol::Star => self.star(position)?,
                Symbol::Plus => self.plus(position)?,
                Symbol::Ident(name) => self.identifier(name),
            }
        }

        if self.contexts.len() > 1 {
            return Err(GrammarError::UnclosedGroup {
                rule: self.rule.name().to_string(),
                open: self.contexts.len() - 1,
            });
        }

        let end = self.end;
        self.attach(end);
        Ok(())
    }

    fn next_index(&mut self) -> usize {
        let index = self.counter;
        self.counter += 1;
        index
    }

    /// Link the current attachment set to `node`
    fn attach(&mut self, node: NodeId) {
        for parent in std::mem::take(&mut self.previous) {
            self.graph.link(parent, node);
        }
    }

    fn context(&mut self) -> &mut Context {
        // The rule context is never popped
        let last = self.contexts.len() - 1;
        &mut self.contexts[last]
    }

    fn identifier(&mut self, name: String) {
        let index = self.next_index();
        let label = format!("{}_{}_{}", self.rule.name(), name, index);
        let node = match self.graph.rule_start(&name) {
            Some(target) => self.graph.add_node(
                label,
                self.rule.name(),
                NodeKind::RuleReference {
                    rule: name.clone(),
                    target,
                },
                None,
            ),
            None => {
                let factory = self.grammar.terminal_factory(&name).cloned();
                self.graph.add_node(
                    label,
                    self.rule.name(),
                    NodeKind::Terminal { term: name.clone() },
                    factory,
                )
            }
        };

        let before = self.previous.clone();
        self.attach(node);
        self.previous = vec![node];

        let symbol = Symbol::Ident(name);
        self.context().symbols.push(symbol.clone());
        self.last = Some(Element {
            first: node,
            last: node,
            before,
            symbols: vec![symbol],
        });
    }

    fn open_group(&mut self) {
        let index = self.next_index();
        let labels = (
            format!("{}_(_{}_$BEGIN", self.rule.name(), index),
            format!("{}_)_{}_$END", self.rule.name(), index),
        );
        let (start, end) = self.graph.add_pair(labels, self.rule.name(), true, None);

        let before = self.previous.clone();
        self.attach(start);
        self.contexts.push(Context {
            start,
            end,
            before,
            symbols: vec![Symbol::Open],
        });
        self.previous = vec![start];
        self.last = None;
    }

    fn close_group(&mut self, position: usize) -> Result<(), GrammarError> {
        if self.contexts.len() == 1 {
            return Err(GrammarError::UnbalancedClose {
                rule: self.rule.name().to_string(),
                position,
            });
        }

        let end = self.context().end;
        self.attach(end);

        let Some(mut closed) = self.contexts.pop() else {
            return Ok(());
        };
        closed.symbols.push(Symbol::Close);
        self.context().symbols.extend(closed.symbols.iter().cloned());

        self.previous = vec![closed.end];
        self.last = Some(Element {
            first: closed.start,
            last: closed.end,
            before: closed.before,
            symbols: closed.symbols,
        });
        Ok(())
    }

    fn alternative(&mut self) {
        let (start, end) = {
            let ctx = self.context();
            ctx.symbols.push(Symbol::Alt);
            (ctx.start, ctx.end)
        };
        self.attach(end);
        self.previous = vec![start];
        self.last = None;
    }

    /// The element a postfix operator applies to, checked for a single predecessor
    fn operand(&mut self, operator: char, position: usize) -> Result<Element, GrammarError> {
        if self.previous.len() != 1 {
            return Err(GrammarError::AmbiguousOperand {
                rule: self.rule.name().to_string(),
                operator,
                position,
                predecessors: self.previous.len(),
            });
        }
        self.last.take().ok_or_else(|| GrammarError::MissingOperand {
            rule: self.rule.name().to_string(),
            operator,
            position,
        })
    }

    /// Make whatever follows `element` also reachable from the element's own predecessors
    fn skip(&mut self, element: &Element) {
        for node in &element.before {
            if !self.previous.contains(node) {
                self.previous.push(*node);
            }
        }
    }

    fn optional(&mut self, position: usize) -> Result<(), GrammarError> {
        let element = self.operand('?', position)?;
        self.skip(&element);
        self.context().symbols.push(Symbol::Optional);
        Ok(())
    }

    fn star(&mut self, position: usize) -> Result<(), GrammarError> {
        let element = self.operand('*', position)?;
        self.graph.link(element.last, element.first);
        self.skip(&element);
        self.context().symbols.push(Symbol::Star);
        Ok(())
    }

    /// `X+` compiles as `X X*`
    fn plus(&mut self, position: usize) -> Result<(), GrammarError> {
        let element = self.operand('+', position)?;
        self.pending.push((position, Symbol::Star));
        for symbol in element.symbols.into_iter().rev() {
            self.pending.push((position, symbol));
        }
        Ok(())
    }
}
