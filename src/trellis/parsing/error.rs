//! Parse errors

use crate::trellis::token::Token;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No derivation of the start rule covers the input
    #[error("input doesn't match the grammar: no match for {} at token {position}{}, near {preview:?}", describe_found(.found), describe_expected(.expected))]
    NoMatch {
        /// Offending token, `None` at end of input
        found: Option<Token>,
        position: usize,
        expected: Vec<String>,
        preview: String,
    },

    /// The start rule matched a prefix but `token` is left over
    #[error("parser stops, no match for term '{}': {:?} at token {position}{}, near {preview:?}", .token.term, .token.content, describe_expected(.expected))]
    UnexpectedToken {
        token: Token,
        position: usize,
        expected: Vec<String>,
        preview: String,
    },

    #[error("more than {budget} expansions without consuming token {position}, the grammar probably loops")]
    StepBudgetExceeded { position: usize, budget: usize },
}

impl ParseError {
    /// Index of the token where parsing stopped
    pub fn position(&self) -> usize {
        match self {
            ParseError::NoMatch { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::StepBudgetExceeded { position, .. } => *position,
        }
    }

    /// The token parsing stopped at, if any
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseError::NoMatch { found, .. } => found.as_ref(),
            ParseError::UnexpectedToken { token, .. } => Some(token),
            ParseError::StepBudgetExceeded { .. } => None,
        }
    }

    pub fn expected(&self) -> &[String] {
        match self {
            ParseError::NoMatch { expected, .. } | ParseError::UnexpectedToken { expected, .. } => {
                expected
            }
            ParseError::StepBudgetExceeded { .. } => &[],
        }
    }
}

fn describe_found(found: &Option<Token>) -> String {
    match found {
        Some(token) => format!("term '{}' ({:?})", token.term, token.content),
        None => "end of input".to_string(),
    }
}

fn describe_expected(expected: &[String]) -> String {
    if expected.is_empty() {
        String::new()
    } else {
        format!(", expected one of: {}", expected.join(", "))
    }
}
