//! Token type shared by the lexer, the parsing engine and the AST builder.
//!
//! A token is a labeled span of matched input. The label (`term`) is what grammar rules refer
//! to; the content is the matched text, possibly rewritten by a lexicon side-effect. Emission
//! order is meaningful: it is the input stream the parsing engine consumes.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub term: String,
    pub content: String,
    /// Byte range of the source text this token covers
    pub span: Range<usize>,
    /// Free-form fields attached by lexicon side-effects
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Token {
    pub fn new(term: impl Into<String>, content: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            term: term.into(),
            content: content.into(),
            span,
            extra: BTreeMap::new(),
        }
    }

    /// Attach an extra field to this token
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.term, self.content)
    }
}

/// Join the content of a token window with spaces, for diagnostics.
pub fn preview(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
