//! Lexing errors

use thiserror::Error;

/// Errors that can occur while building a lexer or scanning text
#[derive(Debug, Clone, Error)]
pub enum LexError {
    /// No term rule advances the cursor at `position`
    #[error("text not fully tokenized, {remaining} bytes left at byte {position}, unknown token: {preview:?}")]
    NoMatch {
        position: usize,
        remaining: usize,
        preview: String,
    },
    /// A term rule carries a regex that does not compile
    #[error("invalid pattern for term '{term}': {source}")]
    InvalidPattern {
        term: String,
        #[source]
        source: regex::Error,
    },
}

impl LexError {
    /// Byte offset of the failure in the source, when it comes from scanning
    pub fn position(&self) -> Option<usize> {
        match self {
            LexError::NoMatch { position, .. } => Some(*position),
            LexError::InvalidPattern { .. } => None,
        }
    }
}

impl From<LexError> for String {
    fn from(err: LexError) -> Self {
        err.to_string()
    }
}
