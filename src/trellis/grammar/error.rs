//! Grammar compilation errors

use thiserror::Error;

/// Errors raised while compiling a grammar. Compilation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("grammar has no rules")]
    EmptyGrammar,

    #[error("rule '{rule}' is defined more than once")]
    DuplicateRule { rule: String },

    #[error("rule '{rule}': ')' at symbol {position} closes no group")]
    UnbalancedClose { rule: String, position: usize },

    #[error("rule '{rule}': {open} group(s) left open at end of pattern")]
    UnclosedGroup { rule: String, open: usize },

    #[error("rule '{rule}': '{operator}' at symbol {position} needs exactly one preceding element, found {predecessors}")]
    AmbiguousOperand {
        rule: String,
        operator: char,
        position: usize,
        predecessors: usize,
    },

    #[error("rule '{rule}': '{operator}' at symbol {position} has nothing to apply to")]
    MissingOperand {
        rule: String,
        operator: char,
        position: usize,
    },
}
