//! Lexer
//!
//!     This module turns raw text into the lazy token stream the parsing engine pulls from.
//!     A lexicon is an ordered list of term rules; order is priority. At every position the
//!     first rule whose enable predicate passes and whose regex matches exactly at the cursor
//!     wins, and the cursor advances by the matched length.
//!
//! Side-effects
//!
//!     A rule may carry an on-match side-effect. When present it is solely responsible for
//!     producing tokens: it can discard the match (see [ignore](on_match::ignore)), merge it
//!     into the previously produced token (see [concat_same_term](on_match::concat_same_term)),
//!     rewrite the content from a capture group, or flip lexer modes through the context
//!     variables. Without a side-effect a single `{term, content}` token is emitted.
//!
//! Buffering
//!
//!     Produced tokens sit in a small output buffer so side-effects can see and modify the most
//!     recent one. Tokens leave the buffer once it exceeds its capacity, and the whole buffer is
//!     flushed at end of input. The default capacity of one is the smallest that still allows
//!     merging runs of the same term.
//!
//! Errors
//!
//!     When no rule can advance the cursor, tokenization halts. Tokens produced so far are still
//!     yielded, and the [LexError](error::LexError) is kept on the iterator for the caller to
//!     inspect once it is drained.

pub mod error;
pub mod lexicon;
pub mod on_match;
pub mod tokenizer;

pub use error::LexError;
pub use lexicon::{EnablePredicate, LexerContext, Lexicon, OnMatch, TermMatch, TermRule};
pub use tokenizer::{Lexer, LexerOptions, Tokens};
