//! Main module for trellis library functionality

pub mod ast;
pub mod building;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod language;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod rendering;
pub mod testing;
pub mod token;

pub use ast::SyntaxNode;
pub use error::{Error, Result};
pub use grammar::Grammar;
pub use language::Language;
pub use lexing::{Lexer, Lexicon};
pub use token::Token;
