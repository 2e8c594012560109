//! Lexicon definition
//!
//! A lexicon is the ordered list of [TermRule]s a [Lexer](super::Lexer) scans with. This module
//! also holds the [LexerContext] that predicates and side-effects see while a scan is running.

use crate::trellis::token::Token;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Side-effect run when a term rule matches. It decides which tokens, if any, are produced.
pub type OnMatch = Arc<dyn Fn(&mut LexerContext, &TermMatch<'_>) + Send + Sync>;

/// Predicate deciding whether a term rule takes part in matching at the current position.
pub type EnablePredicate = Arc<dyn Fn(&LexerContext) -> bool + Send + Sync>;

/// A single `(term, regex, on_match?, enable?)` entry of a lexicon
#[derive(Clone)]
pub struct TermRule {
    pub(crate) term: String,
    pub(crate) pattern: String,
    pub(crate) on_match: Option<OnMatch>,
    pub(crate) enable: Option<EnablePredicate>,
}

impl TermRule {
    pub fn new(term: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            pattern: pattern.into(),
            on_match: None,
            enable: None,
        }
    }

    pub fn on_match<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut LexerContext, &TermMatch<'_>) + Send + Sync + 'static,
    {
        self.on_match = Some(Arc::new(f));
        self
    }

    pub fn enable<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&LexerContext) -> bool + Send + Sync + 'static,
    {
        self.enable = Some(Arc::new(predicate));
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Debug for TermRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermRule")
            .field("term", &self.term)
            .field("pattern", &self.pattern)
            .field("on_match", &self.on_match.is_some())
            .field("enable", &self.enable.is_some())
            .finish()
    }
}

/// Ordered list of term rules. List order is match priority.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    rules: Vec<TermRule>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule that emits one `{term, content}` token per match
    pub fn term(self, term: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.rule(TermRule::new(term, pattern))
    }

    /// Add a rule whose matches are handed to a side-effect
    pub fn term_with<F>(self, term: impl Into<String>, pattern: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut LexerContext, &TermMatch<'_>) + Send + Sync + 'static,
    {
        self.rule(TermRule::new(term, pattern).on_match(f))
    }

    pub fn rule(mut self, rule: TermRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[TermRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// What a side-effect gets to see about the match that triggered it
#[derive(Debug, Clone)]
pub struct TermMatch<'a> {
    pub term: &'a str,
    pub text: &'a str,
    /// Capture groups, index 0 being the whole match
    pub captures: Vec<Option<&'a str>>,
    pub span: Range<usize>,
}

impl TermMatch<'_> {
    /// The token that would be emitted if the rule had no side-effect
    pub fn token(&self) -> Token {
        Token::new(self.term, self.text, self.span.clone())
    }

    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).copied().flatten()
    }
}

/// In-flight tokenizer state visible to predicates and side-effects.
///
/// Besides the output buffer it carries free-form string variables, which languages use as
/// lexer modes (for example "inside a code block" for a template language).
#[derive(Debug, Clone)]
pub struct LexerContext {
    pub(crate) buffer: VecDeque<Token>,
    capacity: usize,
    variables: HashMap<String, String>,
}

impl LexerContext {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::new(),
            capacity,
            variables: HashMap::new(),
        }
    }

    /// Queue a token for output
    pub fn push(&mut self, token: Token) {
        self.buffer.push_back(token);
    }

    /// The most recently produced token that has not been yielded yet
    pub fn last(&self) -> Option<&Token> {
        self.buffer.back()
    }

    pub fn last_mut(&mut self) -> Option<&mut Token> {
        self.buffer.back_mut()
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn remove_var(&mut self, name: &str) -> Option<String> {
        self.variables.remove(name)
    }

    /// A flag is a variable whose presence means "on"
    pub fn flag(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn set_flag(&mut self, name: impl Into<String>, on: bool) {
        let name = name.into();
        if on {
            self.variables.insert(name, "true".to_string());
        } else {
            self.variables.remove(&name);
        }
    }

    pub(crate) fn pop_front(&mut self) -> Option<Token> {
        self.buffer.pop_front()
    }

    pub(crate) fn overflowing(&self) -> bool {
        self.buffer.len() > self.capacity
    }
}

impl Default for LexerContext {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_keeps_declaration_order() {
        let lexicon = Lexicon::new().term("A", "a").term("B", "b").term("C", "c");
        let terms: Vec<&str> = lexicon.rules().iter().map(|r| r.term()).collect();
        assert_eq!(terms, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_flags_toggle() {
        let mut ctx = LexerContext::default();
        assert!(!ctx.flag("code"));
        ctx.set_flag("code", true);
        assert!(ctx.flag("code"));
        ctx.set_flag("code", false);
        assert!(!ctx.flag("code"));
    }

    #[test]
    fn test_overflow_respects_capacity() {
        let mut ctx = LexerContext::new(1);
        ctx.push(Token::new("A", "a", 0..1));
        assert!(!ctx.overflowing());
        ctx.push(Token::new("A", "a", 1..2));
        assert!(ctx.overflowing());
        assert_eq!(ctx.pop_front().map(|t| t.span), Some(0..1));
    }

    #[test]
    fn test_term_match_capture_lookup() {
        let m = TermMatch {
            term: "STRING",
            text: "\"hi\"",
            captures: vec![Some("\"hi\""), Some("hi"), None],
            span: 0..4,
        };
        assert_eq!(m.capture(1), Some("hi"));
        assert_eq!(m.capture(2), None);
        assert_eq!(m.capture(9), None);
        assert_eq!(m.token().content, "\"hi\"");
    }
}
