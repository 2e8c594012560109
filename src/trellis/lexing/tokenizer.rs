//! Lazy, pull-driven tokenizer over a compiled lexicon

use super::error::LexError;
use super::lexicon::{EnablePredicate, LexerContext, Lexicon, OnMatch, TermMatch};
use crate::trellis::token::Token;
use regex::Regex;
use serde::Deserialize;

/// Tunables for the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LexerOptions {
    /// Tokens kept back for side-effects before they are yielded
    pub buffer_size: usize,
    /// Characters of unconsumed text reported by a lexing error
    pub preview_chars: usize,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            buffer_size: 1,
            preview_chars: 25,
        }
    }
}

struct CompiledTerm {
    term: String,
    regex: Regex,
    on_match: Option<OnMatch>,
    enable: Option<EnablePredicate>,
}

/// A lexicon with every pattern compiled and anchored.
pub struct Lexer {
    terms: Vec<CompiledTerm>,
    options: LexerOptions,
}

impl Lexer {
    pub fn new(lexicon: &Lexicon) -> Result<Self, LexError> {
        Self::with_options(lexicon, LexerOptions::default())
    }

    pub fn with_options(lexicon: &Lexicon, options: LexerOptions) -> Result<Self, LexError> {
        let terms = lexicon
            .rules()
            .iter()
            .map(|rule| {
                // Anchor at the cursor: a rule matches only where the scan currently stands
                let regex = Regex::new(&format!(r"\A(?:{})", rule.pattern)).map_err(|source| {
                    LexError::InvalidPattern {
                        term: rule.term.clone(),
                        source,
                    }
                })?;
                Ok(CompiledTerm {
                    term: rule.term.clone(),
                    regex,
                    on_match: rule.on_match.clone(),
                    enable: rule.enable.clone(),
                })
            })
            .collect::<Result<Vec<_>, LexError>>()?;
        Ok(Self { terms, options })
    }

    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LexerOptions) {
        self.options = options;
    }

    /// Start a single pass over `source`.
    pub fn tokenize<'l, 's>(&'l self, source: &'s str) -> Tokens<'l, 's> {
        self.tokenize_with(source, LexerContext::new(self.options.buffer_size))
    }

    /// Start a pass with a caller-prepared context, e.g. to seed lexer modes.
    pub fn tokenize_with<'l, 's>(&'l self, source: &'s str, context: LexerContext) -> Tokens<'l, 's> {
        Tokens {
            lexer: self,
            source,
            cursor: 0,
            context,
            finished: false,
            error: None,
        }
    }
}

/// Lazy token sequence. Finite and not restartable.
pub struct Tokens<'l, 's> {
    lexer: &'l Lexer,
    source: &'s str,
    cursor: usize,
    context: LexerContext,
    finished: bool,
    error: Option<LexError>,
}

impl<'l, 's> Tokens<'l, 's> {
    /// The error that stopped the scan, available once the sequence is drained
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<LexError> {
        self.error.take()
    }

    /// Byte offset of the scan cursor
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn context(&self) -> &LexerContext {
        &self.context
    }

    /// Drain the sequence, failing if the text was not fully tokenized
    pub fn into_result(mut self) -> Result<Vec<Token>, LexError> {
        let tokens: Vec<Token> = self.by_ref().collect();
        match self.error {
            Some(err) => Err(err),
            None => Ok(tokens),
        }
    }

    /// Try the rules in order at the cursor. Returns false when none of them advances it.
    fn advance(&mut self) -> bool {
        let lexer = self.lexer;
        let source = self.source;
        let rest = &source[self.cursor..];
        for compiled in &lexer.terms {
            if let Some(enable) = &compiled.enable {
                if !enable(&self.context) {
                    continue;
                }
            }
            let Some(caps) = compiled.regex.captures(rest) else {
                continue;
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.end() == 0 {
                // an empty match cannot move the cursor
                continue;
            }
            let span = self.cursor..self.cursor + whole.end();
            match &compiled.on_match {
                Some(on_match) => {
                    let matched = TermMatch {
                        term: &compiled.term,
                        text: whole.as_str(),
                        captures: caps.iter().map(|c| c.map(|c| c.as_str())).collect(),
                        span: span.clone(),
                    };
                    on_match(&mut self.context, &matched);
                }
                None => self
                    .context
                    .push(Token::new(compiled.term.as_str(), whole.as_str(), span.clone())),
            }
            tracing::trace!(term = %compiled.term, start = span.start, end = span.end, "term matched");
            self.cursor = span.end;
            return true;
        }
        false
    }

    fn halt(&mut self) {
        let rest = &self.source[self.cursor..];
        let preview: String = rest.chars().take(self.lexer.options.preview_chars).collect();
        tracing::debug!(position = self.cursor, "no term matches, tokenization halted");
        self.error = Some(LexError::NoMatch {
            position: self.cursor,
            remaining: rest.len(),
            preview,
        });
        self.finished = true;
    }
}

impl Iterator for Tokens<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if self.finished {
                return self.context.pop_front();
            }
            if self.context.overflowing() {
                return self.context.pop_front();
            }
            if self.cursor >= self.source.len() {
                self.finished = true;
                continue;
            }
            if !self.advance() {
                self.halt();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trellis::lexing::{on_match, TermRule};
    use rstest::rstest;

    fn foobar_lexicon() -> Lexicon {
        Lexicon::new()
            .term("FOO", "foo")
            .term("BAR", "bar")
            .term_with("SPACE", r"\s+", on_match::ignore)
    }

    fn terms(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.term.as_str()).collect()
    }

    #[test]
    fn test_tokenize_foo_bar_string() {
        let lexer = Lexer::new(&foobar_lexicon()).unwrap();
        let tokens = lexer
            .tokenize("foo foo bar foo bar foo foo")
            .into_result()
            .unwrap();
        assert_eq!(tokens.len(), 7);
        assert_eq!(
            terms(&tokens),
            vec!["FOO", "FOO", "BAR", "FOO", "BAR", "FOO", "FOO"]
        );
        assert_eq!(tokens[2].span, 8..11);
    }

    #[test]
    fn test_first_rule_wins() {
        let lexicon = Lexicon::new().term("KEYWORD", "if").term("IDENT", "[a-z]+");
        let lexer = Lexer::new(&lexicon).unwrap();
        let tokens = lexer.tokenize("if").into_result().unwrap();
        assert_eq!(terms(&tokens), vec!["KEYWORD"]);
    }

    #[test]
    fn test_match_is_anchored_at_cursor() {
        // "bar" appears later in the text but must not be found from position 0
        let lexicon = Lexicon::new().term("BAR", "bar");
        let lexer = Lexer::new(&lexicon).unwrap();
        let mut tokens = lexer.tokenize("xbar");
        assert_eq!(tokens.next(), None);
        assert!(matches!(
            tokens.error(),
            Some(LexError::NoMatch { position: 0, .. })
        ));
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let lexicon = Lexicon::new()
            .rule(TermRule::new("BAZ", "baz").enable(|_| false))
            .term("WORD", "[a-z]+");
        let lexer = Lexer::new(&lexicon).unwrap();
        let tokens = lexer.tokenize("baz").into_result().unwrap();
        assert_eq!(terms(&tokens), vec!["WORD"]);
    }

    #[test]
    fn test_partial_tokens_survive_error() {
        let lexer = Lexer::new(&foobar_lexicon()).unwrap();
        let mut tokens = lexer.tokenize("foo bar ??? foo");
        let produced: Vec<Token> = tokens.by_ref().collect();
        assert_eq!(terms(&produced), vec!["FOO", "BAR"]);
        match tokens.error() {
            Some(LexError::NoMatch {
                position,
                remaining,
                preview,
            }) => {
                assert_eq!(*position, 8);
                assert_eq!(*remaining, 7);
                assert_eq!(preview, "??? foo");
            }
            other => panic!("expected NoMatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_match_does_not_stall() {
        let lexicon = Lexicon::new().term("MAYBE", "a*").term("B", "b");
        let lexer = Lexer::new(&lexicon).unwrap();
        let tokens = lexer.tokenize("bab").into_result().unwrap();
        assert_eq!(terms(&tokens), vec!["B", "MAYBE", "B"]);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let lexicon = Lexicon::new().term("BROKEN", "(");
        match Lexer::new(&lexicon) {
            Err(LexError::InvalidPattern { term, .. }) => assert_eq!(term, "BROKEN"),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("pattern should not compile"),
        }
    }

    #[test]
    fn test_tokenize_is_lazy() {
        let lexer = Lexer::new(&foobar_lexicon()).unwrap();
        let mut tokens = lexer.tokenize("foo bar foo");
        assert_eq!(tokens.next().map(|t| t.term), Some("FOO".to_string()));
        // only enough text was scanned to fill the buffer past capacity
        assert!(tokens.position() < "foo bar foo".len());
    }

    #[rstest]
    #[case(0, &["a", "b", "1", "c", "d", "2", "e"])]
    #[case(1, &["ab", "1", "cd", "2", "e"])]
    #[case(3, &["ab", "1", "cd", "2", "e"])]
    fn test_buffer_size_bounds_concatenation(#[case] buffer_size: usize, #[case] expected: &[&str]) {
        let lexicon = Lexicon::new()
            .term_with("WORD", "[a-z]", on_match::concat_same_term)
            .term_with("NUM", "[0-9]", on_match::concat_same_term);
        let options = LexerOptions {
            buffer_size,
            ..LexerOptions::default()
        };
        let lexer = Lexer::with_options(&lexicon, options).unwrap();
        let source = "ab1cd2e";
        let mut tokens = lexer.tokenize(source);

        let first = tokens.next().unwrap();
        assert!(tokens.position() < source.len());
        assert_eq!(tokens.context().buffered(), buffer_size.min(expected.len() - 1));

        let mut contents = vec![first.content];
        contents.extend(tokens.by_ref().map(|t| t.content));
        assert_eq!(contents, expected);
        assert_eq!(tokens.position(), source.len());
        assert!(tokens.error().is_none());
    }
}
